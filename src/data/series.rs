//! Series Module
//! Assembles parsed values, labels and colors into the ordered series a chart is drawn from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default point colors, used by position when the user supplies fewer colors than values.
pub const DEFAULT_PALETTE: [&str; 5] = ["#FF5733", "#33FF57", "#3357FF", "#FF33F5", "#F5FF33"];

/// One entry of the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub value: f64,
    pub label: String,
    pub color: String,
}

/// Ordered data points; position defines the x-axis slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub points: Vec<DataPoint>,
    /// True when the user gave exactly one label per value.
    pub labels_match: bool,
}

impl Series {
    /// Build a series, padding or truncating labels and colors independently.
    pub fn assemble(values: &[f64], labels: &[String], colors: &[String]) -> Self {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &value)| DataPoint {
                value,
                label: labels
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("Item {}", i + 1)),
                color: colors
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_PALETTE[i % DEFAULT_PALETTE.len()].to_string()),
            })
            .collect();

        Self {
            points,
            labels_match: labels.len() == values.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Category tick labels, only when every value got its own user label.
    pub fn tick_labels(&self) -> Option<Vec<String>> {
        if self.labels_match {
            Some(self.points.iter().map(|p| p.label.clone()).collect())
        } else {
            None
        }
    }
}

/// RGB color parsed from `#RRGGBB` or `#RGB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const WHITE: HexColor = HexColor::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn parse(text: &str) -> Option<Self> {
        let hex = text.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        match hex.len() {
            6 => Some(Self {
                r: u8::from_str_radix(&hex[0..2], 16).ok()?,
                g: u8::from_str_radix(&hex[2..4], 16).ok()?,
                b: u8::from_str_radix(&hex[4..6], 16).ok()?,
            }),
            3 => {
                // #abc == #aabbcc
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|d| d * 17);
                Some(Self {
                    r: digit(0).ok()?,
                    g: digit(1).ok()?,
                    b: digit(2).ok()?,
                })
            }
            _ => None,
        }
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn labels_and_palette_defaults() {
        let series = Series::assemble(&[1.0, 2.0, 3.0], &strings(&["A", "B", "C"]), &[]);
        let labels: Vec<&str> = series.points.iter().map(|p| p.label.as_str()).collect();
        let colors: Vec<&str> = series.points.iter().map(|p| p.color.as_str()).collect();

        assert_eq!(series.values(), vec![1.0, 2.0, 3.0]);
        assert_eq!(labels, vec!["A", "B", "C"]);
        assert_eq!(colors, vec!["#FF5733", "#33FF57", "#3357FF"]);
        assert_eq!(series.tick_labels(), Some(strings(&["A", "B", "C"])));
    }

    #[test]
    fn missing_labels_get_item_names() {
        let series = Series::assemble(&[5.0, 6.0, 7.0], &strings(&["first"]), &[]);
        assert_eq!(series.points[0].label, "first");
        assert_eq!(series.points[1].label, "Item 2");
        assert_eq!(series.points[2].label, "Item 3");
        assert_eq!(series.tick_labels(), None);
    }

    #[test]
    fn extra_labels_are_truncated_but_disable_ticks() {
        let series = Series::assemble(&[1.0], &strings(&["A", "B"]), &strings(&["#000", "#111"]));
        assert_eq!(series.len(), 1);
        assert_eq!(series.points[0].label, "A");
        assert_eq!(series.points[0].color, "#000");
        assert_eq!(series.tick_labels(), None);
    }

    #[test]
    fn short_color_list_continues_with_palette() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let series = Series::assemble(&values, &[], &strings(&["#000000", "#111111"]));
        let colors: Vec<&str> = series.points.iter().map(|p| p.color.as_str()).collect();
        assert_eq!(
            colors,
            vec![
                "#000000", "#111111", "#3357FF", "#FF33F5", "#F5FF33", "#FF5733", "#33FF57"
            ]
        );
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(HexColor::parse("#FF5733"), Some(HexColor::new(255, 87, 51)));
        assert_eq!(HexColor::parse("#abc"), Some(HexColor::new(0xaa, 0xbb, 0xcc)));
        assert_eq!(HexColor::parse(" #ffffff "), Some(HexColor::WHITE));
        assert_eq!(HexColor::parse("FF5733"), None);
        assert_eq!(HexColor::parse("#GG0000"), None);
        assert_eq!(HexColor::parse("#12345"), None);
        assert_eq!(HexColor::parse("red"), None);
        assert_eq!(HexColor::new(255, 87, 51).to_string(), "#FF5733");
    }
}
