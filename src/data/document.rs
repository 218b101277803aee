//! Input Document Module
//! Host-owned input state handed to the chart builder on every render cycle.

use crate::charts::ChartOptions;
use crate::data::{InputParser, ParsedInput};
use serde::{Deserialize, Serialize};

/// Raw form state: three text blocks plus the chart options.
/// Serializable so a host can snapshot it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputDocument {
    pub values_text: String,
    pub labels_text: String,
    pub colors_text: String,
    pub options: ChartOptions,
}

impl InputDocument {
    pub fn new(values: &str, labels: &str, colors: &str, options: ChartOptions) -> Self {
        Self {
            values_text: values.to_string(),
            labels_text: labels.to_string(),
            colors_text: colors.to_string(),
            options,
        }
    }

    pub fn parse(&self) -> ParsedInput {
        InputParser::parse_input(&self.values_text, &self.labels_text, &self.colors_text)
    }
}
