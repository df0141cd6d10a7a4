use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::constants::MISSING_TOKENS;

/// An untyped cell as it comes out of the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Missing,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Infer the cell type from raw field text.
    ///
    /// Empty fields and the usual NA spellings become `Missing`, anything that
    /// parses as a float becomes `Number`, the rest is kept verbatim as `Text`.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if MISSING_TOKENS.contains(&trimmed) {
            return CellValue::Missing;
        }

        match trimmed.parse::<f64>() {
            Ok(value) if !value.is_nan() => CellValue::Number(value),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Missing
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(CellValue::Missing, CellValue::Number)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Missing => write!(f, ""),
            CellValue::Number(value) => write!(f, "{}", value),
            CellValue::Text(text) => write!(f, "{}", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_numbers() {
        assert_eq!(CellValue::infer("7.2"), CellValue::Number(7.2));
        assert_eq!(CellValue::infer(" 10 "), CellValue::Number(10.0));
        assert_eq!(CellValue::infer("-1e2"), CellValue::Number(-100.0));
    }

    #[test]
    fn test_infer_missing_tokens() {
        for token in ["", "  ", "NA", "N/A", "nan", "NaN", "null", "None", "#N/A"] {
            assert!(CellValue::infer(token).is_missing(), "token {:?}", token);
        }
    }

    #[test]
    fn test_infer_text_kept_verbatim() {
        assert_eq!(CellValue::infer(" Yes "), CellValue::Text(" Yes ".to_string()));
        assert_eq!(CellValue::infer("abc").as_text(), Some("abc"));
    }
}
