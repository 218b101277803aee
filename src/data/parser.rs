//! Text Input Parser Module
//! Turns the newline-delimited value, label and color blocks into typed lists.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric line that could not be parsed and was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseWarning {
    /// 1-based line number inside the value block.
    pub line: usize,
    pub text: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: '{}' is not a number", self.line, self.text)
    }
}

/// Parsed numeric block together with the lines that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedValues {
    pub values: Vec<f64>,
    pub warnings: Vec<ParseWarning>,
}

impl ParsedValues {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// All three input blocks after parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedInput {
    pub values: ParsedValues,
    pub labels: Vec<String>,
    pub colors: Vec<String>,
}

/// Parses the raw text blocks entered in the control panel.
pub struct InputParser;

impl InputParser {
    /// Parse one floating-point value per non-blank line.
    ///
    /// Lines that fail to parse (or parse to NaN/infinity) are dropped from the
    /// series and reported as warnings; they never fail the parse.
    pub fn parse_values(text: &str) -> ParsedValues {
        let mut parsed = ParsedValues::default();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            match line.parse::<f64>() {
                Ok(v) if v.is_finite() => parsed.values.push(v),
                _ => parsed.warnings.push(ParseWarning {
                    line: idx + 1,
                    text: line.to_string(),
                }),
            }
        }

        parsed
    }

    /// Trimmed lines with blanks removed.
    pub fn parse_lines(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn parse_input(values: &str, labels: &str, colors: &str) -> ParsedInput {
        ParsedInput {
            values: Self::parse_values(values),
            labels: Self::parse_lines(labels),
            colors: Self::parse_lines(colors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_non_numeric_lines() {
        let parsed = InputParser::parse_values("1\nabc\n3");
        assert_eq!(parsed.values, vec![1.0, 3.0]);
        assert_eq!(
            parsed.warnings,
            vec![ParseWarning {
                line: 2,
                text: "abc".to_string()
            }]
        );
    }

    #[test]
    fn blank_lines_are_not_warnings() {
        let parsed = InputParser::parse_values("\n  4.5 \n\n-2\n   \n");
        assert_eq!(parsed.values, vec![4.5, -2.0]);
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn length_equals_successful_lines() {
        let text = "10\n1e3\nx\n.5\n--1\n7";
        let parsed = InputParser::parse_values(text);
        assert_eq!(parsed.values.len(), 4);
        assert_eq!(parsed.warnings.len(), 2);
    }

    #[test]
    fn non_finite_values_are_skipped() {
        let parsed = InputParser::parse_values("NaN\ninf\n2");
        assert_eq!(parsed.values, vec![2.0]);
        assert_eq!(parsed.warnings.len(), 2);
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(InputParser::parse_values("").is_empty());
        assert!(InputParser::parse_values("\n \n").is_empty());
    }

    #[test]
    fn label_lines_are_trimmed() {
        let labels = InputParser::parse_lines(" A \n\nB\n  C");
        assert_eq!(labels, vec!["A", "B", "C"]);
    }

    #[test]
    fn parse_input_handles_all_blocks() {
        let input = InputParser::parse_input("1\n2", "A\nB", "#fff\n");
        assert_eq!(input.values.values, vec![1.0, 2.0]);
        assert_eq!(input.labels, vec!["A", "B"]);
        assert_eq!(input.colors, vec!["#fff"]);
    }
}
