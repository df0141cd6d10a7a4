use crate::models::{CellValue, TsunamiFlag};
use crate::utils::constants::{TSUNAMI_NO_TOKENS, TSUNAMI_YES_TOKENS};

/// Coerce a cell into a number. Anything unparseable becomes `None`.
pub fn normalize_numeric(cell: &CellValue) -> Option<f64> {
    let value = match cell {
        CellValue::Missing => return None,
        CellValue::Number(value) => *value,
        CellValue::Text(text) => text.trim().parse::<f64>().ok()?,
    };

    (!value.is_nan()).then_some(value)
}

/// Coerce a heterogeneous tsunami indicator into a tri-state flag.
///
/// Numbers count as a tsunami when strictly positive. Text is matched
/// case-insensitively against yes/no spellings, then retried as a number.
pub fn normalize_tsunami(cell: &CellValue) -> Option<TsunamiFlag> {
    match cell {
        CellValue::Missing => None,
        CellValue::Number(value) if value.is_nan() => None,
        CellValue::Number(value) => Some(TsunamiFlag::from_positive(*value)),
        CellValue::Text(text) => {
            let token = text.trim().to_lowercase();
            if TSUNAMI_YES_TOKENS.contains(&token.as_str()) {
                Some(TsunamiFlag::Yes)
            } else if TSUNAMI_NO_TOKENS.contains(&token.as_str()) {
                Some(TsunamiFlag::No)
            } else {
                token
                    .parse::<f64>()
                    .ok()
                    .filter(|value| !value.is_nan())
                    .map(TsunamiFlag::from_positive)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn test_normalize_numeric() {
        assert_eq!(normalize_numeric(&text("7.2")), Some(7.2));
        assert_eq!(normalize_numeric(&text(" 33 ")), Some(33.0));
        assert_eq!(normalize_numeric(&CellValue::Number(-4.5)), Some(-4.5));
        assert_eq!(normalize_numeric(&text("abc")), None);
        assert_eq!(normalize_numeric(&text("")), None);
        assert_eq!(normalize_numeric(&text("nan")), None);
        assert_eq!(normalize_numeric(&CellValue::Missing), None);
    }

    #[test]
    fn test_tsunami_text_tokens() {
        assert_eq!(normalize_tsunami(&text("Yes")), Some(TsunamiFlag::Yes));
        assert_eq!(normalize_tsunami(&text("NO")), Some(TsunamiFlag::No));
        assert_eq!(normalize_tsunami(&text(" t ")), Some(TsunamiFlag::Yes));
        assert_eq!(normalize_tsunami(&text("False")), Some(TsunamiFlag::No));
        assert_eq!(normalize_tsunami(&text("")), None);
        assert_eq!(normalize_tsunami(&text("maybe")), None);
    }

    #[test]
    fn test_tsunami_numeric_rule() {
        assert_eq!(normalize_tsunami(&CellValue::Number(2.5)), Some(TsunamiFlag::Yes));
        assert_eq!(normalize_tsunami(&CellValue::Number(-1.0)), Some(TsunamiFlag::No));
        assert_eq!(normalize_tsunami(&CellValue::Number(0.0)), Some(TsunamiFlag::No));
        assert_eq!(normalize_tsunami(&CellValue::Number(f64::NAN)), None);
        assert_eq!(normalize_tsunami(&CellValue::Missing), None);
    }

    #[test]
    fn test_tsunami_numeric_text_fallback() {
        assert_eq!(normalize_tsunami(&text("3")), Some(TsunamiFlag::Yes));
        assert_eq!(normalize_tsunami(&text("0.0")), Some(TsunamiFlag::No));
        assert_eq!(normalize_tsunami(&text("-2")), Some(TsunamiFlag::No));
    }
}
