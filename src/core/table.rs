//! Declarative table selection over a parsed page.
//!
//! A [`TableSpec`] names one site-specific table layout. The extraction
//! functions turn whatever the spec matches into plain [`Cell`] rows, so the
//! domain parsers work on owned data and can be tested without a document.

use log::{debug, error};
use scraper::{ElementRef, Html, Selector};

use crate::model::ordered_map::OrderedMap;

/// How rows (or cells) are found below their parent element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every descendant matching the selector, nested tables included.
    Select(&'static str),
    /// Only direct children (`> tr`, `> tbody > tr`, `> td`).
    Direct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    /// Label used in log lines.
    pub name: &'static str,
    /// CSS selector for the table element(s).
    pub table: &'static str,
    /// Keep only the n-th match (document order) instead of all of them.
    pub position: Option<usize>,
    pub rows: Scope,
    pub cells: Scope,
    /// Elements inside a cell whose text is captured on its own, e.g. the
    /// `<font>` annotation in a course code cell.
    pub emphasis: &'static str,
}

impl TableSpec {
    /// A spec matching every table for `table`, `tr`/`td` descendants and no
    /// emphasis element of note.
    pub const fn new(name: &'static str, table: &'static str) -> Self {
        Self {
            name,
            table,
            position: None,
            rows: Scope::Select("tr"),
            cells: Scope::Select("td"),
            emphasis: "font",
        }
    }
}

/// Text content of one table cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    /// All descendant text, trimmed.
    pub text: String,
    /// Text of the spec's emphasis elements, trimmed.
    pub emphasis: String,
    /// Descendant text with the emphasis elements left out, trimmed.
    pub plain: String,
    /// Cells of any table nested in this one.
    pub nested: Vec<Cell>,
}

impl Cell {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.trim().to_string(),
            plain: text.trim().to_string(),
            ..Default::default()
        }
    }

    pub fn with_emphasis(mut self, emphasis: &str) -> Self {
        self.emphasis = emphasis.trim().to_string();
        self
    }

    pub fn with_nested(mut self, nested: Vec<Cell>) -> Self {
        self.nested = nested;
        self
    }
}

pub type Row = Vec<Cell>;

/// One matched table with its caption.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub caption: String,
    pub rows: Vec<Row>,
}

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(err) => {
            error!("invalid selector {:?}: {}", css, err);
            None
        }
    }
}

/// Concatenated text of an element, trimmed.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Concatenated text of every element matching `css` in the document.
pub fn select_text(document: &Html, css: &str) -> String {
    let Some(selector) = selector(css) else {
        return String::new();
    };
    document
        .select(&selector)
        .flat_map(|element| element.text())
        .collect::<String>()
        .trim()
        .to_string()
}

fn direct_children<'a>(parent: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == tag)
        .collect()
}

fn scoped<'a>(parent: ElementRef<'a>, scope: Scope, tag: &str) -> Vec<ElementRef<'a>> {
    match scope {
        Scope::Select(css) => match selector(css) {
            Some(selector) => parent.select(&selector).collect(),
            None => Vec::new(),
        },
        Scope::Direct if tag == "tr" => parent
            .children()
            .filter_map(ElementRef::wrap)
            .flat_map(|child| match child.value().name() {
                "tr" => vec![child],
                "tbody" => direct_children(child, "tr"),
                _ => Vec::new(),
            })
            .collect(),
        Scope::Direct => direct_children(parent, tag),
    }
}

struct CellReader {
    emphasis: Selector,
    table: Selector,
    td: Selector,
}

impl CellReader {
    fn new(emphasis: &str) -> Option<Self> {
        Some(Self {
            emphasis: selector(emphasis)?,
            table: selector("table")?,
            td: selector("td")?,
        })
    }

    fn read(&self, cell: ElementRef<'_>, with_nested: bool) -> Cell {
        let marked: Vec<_> = cell.select(&self.emphasis).map(|e| e.id()).collect();

        let emphasis = cell
            .select(&self.emphasis)
            .flat_map(|e| e.text())
            .collect::<String>();

        let plain = cell
            .descendants()
            .filter_map(|node| {
                let text = node.value().as_text()?;
                let hidden = node
                    .ancestors()
                    .take_while(|ancestor| ancestor.id() != cell.id())
                    .any(|ancestor| marked.contains(&ancestor.id()));
                (!hidden).then_some(&**text)
            })
            .collect::<String>();

        let nested = if with_nested {
            cell.select(&self.table)
                .flat_map(|table| table.select(&self.td))
                .map(|td| self.read(td, false))
                .collect()
        } else {
            Vec::new()
        };

        Cell {
            text: element_text(cell),
            emphasis: emphasis.trim().to_string(),
            plain: plain.trim().to_string(),
            nested,
        }
    }
}

/// Every table the spec matches, in document order, with its rows.
///
/// No match is not an error: the page may simply have no records.
pub fn extract_tables(document: &Html, spec: &TableSpec) -> Vec<Table> {
    let (Some(table_selector), Some(caption), Some(reader)) = (
        selector(spec.table),
        selector("caption"),
        CellReader::new(spec.emphasis),
    ) else {
        return Vec::new();
    };

    let matched: Vec<ElementRef<'_>> = match spec.position {
        Some(position) => document.select(&table_selector).skip(position).take(1).collect(),
        None => document.select(&table_selector).collect(),
    };

    if matched.is_empty() {
        debug!("{}: no table matches {:?}", spec.name, spec.table);
    }

    matched
        .into_iter()
        .map(|table| Table {
            caption: table
                .select(&caption)
                .flat_map(|c| c.text())
                .collect::<String>()
                .trim()
                .to_string(),
            rows: scoped(table, spec.rows, "tr")
                .into_iter()
                .map(|row| {
                    scoped(row, spec.cells, "td")
                        .into_iter()
                        .map(|cell| reader.read(cell, true))
                        .collect()
                })
                .collect(),
        })
        .collect()
}

/// Rows of all matching tables, concatenated. Row 0 is normally the header.
pub fn extract_rows(document: &Html, spec: &TableSpec) -> Vec<Row> {
    extract_tables(document, spec)
        .into_iter()
        .flat_map(|table| table.rows)
        .collect()
}

/// Reads `label | value` (or `label | value | label | value`) rows.
pub fn key_value_pairs(rows: &[Row]) -> OrderedMap<String> {
    let mut pairs = OrderedMap::new();
    for row in rows {
        let cells = match row.len() {
            2 | 4 => row.as_slice(),
            _ => continue,
        };
        for pair in cells.chunks(2) {
            let key = pair[0].text.replacen(':', "", 1).trim().to_string();
            if !key.is_empty() {
                pairs.insert(key, pair[1].text.clone());
            }
        }
    }
    pairs
}

pub fn extract_key_value_rows(document: &Html, spec: &TableSpec) -> OrderedMap<String> {
    key_value_pairs(&extract_rows(document, spec))
}
