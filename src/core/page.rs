//! Locates the usable HTML inside a raw portal response.
//!
//! Portal pages arrive as a script that hands an escaped string literal to
//! `pageSanitizer.sanitize(...)`. The literal is the real page; everything
//! around it is boilerplate.

use log::{debug, warn};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::core::text::{decode_hex, resolve_entities, unescape};
use crate::error::{PageError, StructureReason};

static SANITIZED_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)pageSanitizer\.sanitize\(\s*'(.*)'\s*\);").expect("sanitizer pattern")
});

/// How the sanitizer literal of a page is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// JavaScript backslash escapes (attendance, timetable pages).
    Backslash,
    /// `\xHH` escapes over entity-encoded markup (academic planner).
    HexEntities,
}

/// Containers that hold the page body when it is served without the
/// sanitizer script, tried in order.
const FALLBACK_CONTAINERS: [&str; 2] = ["#zcPageContent", "#elementsContainer"];
const MAIN_DIV: &str = "div.mainDiv";

/// The raw sanitizer literal, still escaped.
pub fn sanitized_literal(raw: &str) -> Option<&str> {
    SANITIZED_LITERAL
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|literal| !literal.is_empty())
}

fn inner_html_of(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    document
        .select(&selector)
        .next()
        .map(|element| element.inner_html())
        .filter(|html| !html.is_empty())
}

fn main_div_parent(document: &Html) -> Option<String> {
    let selector = Selector::parse(MAIN_DIV).ok()?;
    let main = document.select(&selector).next()?;
    main.parent()
        .and_then(ElementRef::wrap)
        .map(|parent| parent.inner_html())
        .filter(|html| !html.is_empty())
}

/// Looks for a known page container in an unwrapped response.
pub fn fallback_container(resolved: &str) -> Option<String> {
    let document = Html::parse_document(resolved);
    FALLBACK_CONTAINERS
        .iter()
        .find_map(|css| inner_html_of(&document, css))
        .or_else(|| main_div_parent(&document))
}

/// Decoded page HTML for `page`.
///
/// The sanitizer literal wins when present. Otherwise entities are resolved
/// over the whole body and a known container is looked up. When neither
/// exists the response is classified (login page, error page, or changed
/// template) and reported as [`PageError::StructureNotFound`].
pub fn locate_html(page: &'static str, raw: &str, encoding: Encoding) -> Result<String, PageError> {
    if let Some(literal) = sanitized_literal(raw) {
        debug!("{}: found sanitizer literal ({} bytes)", page, literal.len());
        return Ok(match encoding {
            Encoding::Backslash => unescape(literal),
            Encoding::HexEntities => resolve_entities(&decode_hex(literal)),
        });
    }

    if let Some(container) = fallback_container(&resolve_entities(raw)) {
        debug!("{}: no sanitizer literal, using page container", page);
        return Ok(container);
    }

    let reason = StructureReason::classify(raw);
    warn!("{}: no sanitizer literal or page container: {}", page, reason.describe());
    Err(PageError::StructureNotFound { page, reason })
}
