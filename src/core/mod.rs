pub mod metrics;
pub mod page;
pub mod parser;
pub mod portal;
pub mod scrape;
pub mod slots;
pub mod table;
pub mod text;
