//! Data module - Text parsing and series assembly

mod document;
mod parser;
mod series;

pub use document::InputDocument;
pub use parser::{InputParser, ParseWarning, ParsedInput};
pub use series::{HexColor, Series};
