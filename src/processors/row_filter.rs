use crate::models::CleanRow;

/// Drops rows that cannot take part in the magnitude/depth/tsunami analysis.
/// Coordinates are optional. Surviving rows keep their relative order.
pub struct RowFilter;

impl RowFilter {
    pub fn new() -> Self {
        Self
    }

    pub fn keeps(&self, row: &CleanRow) -> bool {
        row.is_complete()
    }

    pub fn filter(&self, rows: Vec<CleanRow>) -> Vec<CleanRow> {
        rows.into_iter().filter(|row| self.keeps(row)).collect()
    }
}

impl Default for RowFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TsunamiFlag;

    #[test]
    fn test_keeps_complete_rows_in_order() {
        let rows = vec![
            CleanRow::new(7.5, 10.0, TsunamiFlag::Yes),
            CleanRow {
                magnitude: None,
                ..CleanRow::new(5.0, 5.0, TsunamiFlag::No)
            },
            CleanRow::new(6.1, 30.0, TsunamiFlag::No),
            CleanRow {
                tsunami_flag: None,
                ..CleanRow::new(6.0, 12.0, TsunamiFlag::No)
            },
            CleanRow::new(8.0, 20.0, TsunamiFlag::Yes),
        ];

        let kept = RowFilter::new().filter(rows.clone());

        assert_eq!(kept, vec![rows[0], rows[2], rows[4]]);
    }

    #[test]
    fn test_coordinates_not_required() {
        let row = CleanRow::new(6.5, 15.0, TsunamiFlag::No);
        assert_eq!(row.latitude, None);
        assert_eq!(RowFilter::new().filter(vec![row]).len(), 1);
    }

    #[test]
    fn test_empty_output_is_valid() {
        let row = CleanRow::default();
        assert!(RowFilter::new().filter(vec![row]).is_empty());
    }
}
