use crate::analyzers::stats::DescriptiveStats;
use crate::error::{ProcessingError, Result};
use crate::models::{Role, TsunamiFlag};
use crate::processors::CleanedData;
use crate::utils::constants::{SHALLOW_DEPTH_KM, STRONG_MAGNITUDE};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Serialize)]
pub struct GroupStatistics {
    pub flag: TsunamiFlag,
    pub magnitude: DescriptiveStats,
    pub depth: DescriptiveStats,
}

/// Tsunami rate inside and outside the strong-and-shallow event class
#[derive(Debug, Clone, Default, Serialize)]
pub struct ThresholdComparison {
    pub strong_magnitude: f64,
    pub shallow_depth_km: f64,
    pub matching_events: usize,
    pub matching_tsunamis: usize,
    pub other_events: usize,
    pub other_tsunamis: usize,
}

impl ThresholdComparison {
    pub fn matching_rate(&self) -> Option<f64> {
        rate(self.matching_tsunamis, self.matching_events)
    }

    pub fn other_rate(&self) -> Option<f64> {
        rate(self.other_tsunamis, self.other_events)
    }
}

fn rate(part: usize, total: usize) -> Option<f64> {
    (total > 0).then(|| part as f64 / total as f64)
}

#[derive(Debug, Clone, Serialize)]
pub struct TsunamiStatistics {
    pub total_events: usize,
    pub tsunami_events: usize,
    pub magnitude_column: String,
    pub depth_column: String,
    pub groups: Vec<GroupStatistics>,
    pub thresholds: ThresholdComparison,
    /// Tsunami events carrying both coordinates; `None` when the table has
    /// no coordinate columns at all
    pub located_tsunami_events: Option<usize>,
}

pub struct TsunamiAnalyzer {
    strong_magnitude: f64,
    shallow_depth_km: f64,
}

impl TsunamiAnalyzer {
    pub fn new() -> Self {
        Self::with_thresholds(STRONG_MAGNITUDE, SHALLOW_DEPTH_KM)
    }

    pub fn with_thresholds(strong_magnitude: f64, shallow_depth_km: f64) -> Self {
        Self {
            strong_magnitude,
            shallow_depth_km,
        }
    }

    /// Group the clean rows by tsunami flag and compute per-group statistics
    pub fn analyze(&self, data: &CleanedData) -> Result<TsunamiStatistics> {
        if data.is_empty() {
            return Err(ProcessingError::MissingData(
                "No rows survived cleaning; nothing to analyze".to_string(),
            ));
        }

        let events: Vec<(f64, f64, TsunamiFlag)> = data
            .rows
            .iter()
            .filter_map(|row| Some((row.magnitude?, row.depth?, row.tsunami_flag?)))
            .collect();

        let groups = TsunamiFlag::ALL
            .iter()
            .filter_map(|flag| {
                let (magnitudes, depths): (Vec<f64>, Vec<f64>) = events
                    .iter()
                    .filter(|(_, _, f)| f == flag)
                    .map(|(m, d, _)| (*m, *d))
                    .unzip();

                Some(GroupStatistics {
                    flag: *flag,
                    magnitude: DescriptiveStats::from_values(&magnitudes)?,
                    depth: DescriptiveStats::from_values(&depths)?,
                })
            })
            .collect();

        let mut thresholds = ThresholdComparison {
            strong_magnitude: self.strong_magnitude,
            shallow_depth_km: self.shallow_depth_km,
            ..Default::default()
        };
        for (magnitude, depth, flag) in &events {
            let is_tsunami = *flag == TsunamiFlag::Yes;
            if *magnitude >= self.strong_magnitude && *depth <= self.shallow_depth_km {
                thresholds.matching_events += 1;
                thresholds.matching_tsunamis += usize::from(is_tsunami);
            } else {
                thresholds.other_events += 1;
                thresholds.other_tsunamis += usize::from(is_tsunami);
            }
        }

        let located_tsunami_events = data.assignment.has_coordinates().then(|| {
            data.rows
                .iter()
                .filter(|row| row.is_tsunami() && row.geo_point().is_some())
                .count()
        });

        let tsunami_events = events
            .iter()
            .filter(|(_, _, flag)| *flag == TsunamiFlag::Yes)
            .count();
        debug!(
            "Analyzed {} events, {} flagged as tsunami",
            events.len(),
            tsunami_events
        );

        Ok(TsunamiStatistics {
            total_events: events.len(),
            tsunami_events,
            magnitude_column: column_label(data, Role::Magnitude),
            depth_column: column_label(data, Role::Depth),
            groups,
            thresholds,
            located_tsunami_events,
        })
    }
}

impl Default for TsunamiAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn column_label(data: &CleanedData, role: Role) -> String {
    data.assignment
        .get(role)
        .unwrap_or(role.as_str())
        .to_string()
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", precision, v),
        _ => "n/a".to_string(),
    }
}

impl TsunamiStatistics {
    pub fn group(&self, flag: TsunamiFlag) -> Option<&GroupStatistics> {
        self.groups.iter().find(|g| g.flag == flag)
    }

    pub fn tsunami_share(&self) -> f64 {
        self.tsunami_events as f64 / self.total_events as f64
    }

    /// Per-flag statistics table for magnitude and depth
    pub fn summary_table(&self) -> String {
        let mut table = String::new();
        table.push_str("=== Magnitude and Depth by Tsunami Flag ===\n");
        table.push_str(&format!(
            "{:<6} {:<10} {:>7} {:>9} {:>9} {:>9} {:>9} {:>9}\n",
            "flag", "stat", "count", "mean", "median", "min", "max", "std"
        ));

        for group in &self.groups {
            for (label, stats) in [("magnitude", &group.magnitude), ("depth", &group.depth)] {
                table.push_str(&format!(
                    "{:<6} {:<10} {:>7} {:>9.3} {:>9.3} {:>9.3} {:>9.3} {:>9}\n",
                    group.flag.as_u8(),
                    label,
                    stats.count,
                    stats.mean,
                    stats.median,
                    stats.min,
                    stats.max,
                    fmt_opt(stats.std, 3)
                ));
            }
        }

        table.push_str(&format!(
            "\nmagnitude column: {}, depth column: {}",
            self.magnitude_column, self.depth_column
        ));
        table
    }

    pub fn key_findings(&self) -> String {
        let mean_magnitude = |flag: TsunamiFlag| self.group(flag).map(|g| g.magnitude.mean);
        let median_depth = |flag: TsunamiFlag| self.group(flag).map(|g| g.depth.median);
        let thresholds = &self.thresholds;

        let mut findings = vec![
            format!(
                "{:.1}% of events were associated with tsunamis.",
                self.tsunami_share() * 100.0
            ),
            format!(
                "Average magnitude: {} (tsunami) vs {} (non-tsunami).",
                fmt_opt(mean_magnitude(TsunamiFlag::Yes), 2),
                fmt_opt(mean_magnitude(TsunamiFlag::No), 2)
            ),
            format!(
                "Median depth: {} km (tsunami) vs {} km (non-tsunami).",
                fmt_opt(median_depth(TsunamiFlag::Yes), 1),
                fmt_opt(median_depth(TsunamiFlag::No), 1)
            ),
            format!(
                "Events with Mw >= {} and depth <= {} km: {}% tsunami (n={}) vs {}% for all other events (n={}).",
                thresholds.strong_magnitude,
                thresholds.shallow_depth_km,
                fmt_opt(thresholds.matching_rate().map(|r| r * 100.0), 1),
                thresholds.matching_events,
                fmt_opt(thresholds.other_rate().map(|r| r * 100.0), 1),
                thresholds.other_events
            ),
        ];

        if let Some(located) = self.located_tsunami_events {
            findings.push(format!(
                "{} of {} tsunami events carry coordinates for geographic plotting.",
                located, self.tsunami_events
            ));
        }

        let mut text = String::from("===== Key Findings =====\n");
        for (i, finding) in findings.iter().enumerate() {
            text.push_str(&format!("{}. {}\n", i + 1, finding));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CellValue, RawTable};
    use crate::processors::CleaningPipeline;

    fn cleaned(rows: &[(f64, f64, &str)]) -> CleanedData {
        let table = RawTable::new(
            vec!["magnitude".to_string(), "depth".to_string(), "tsunami".to_string()],
            rows.iter()
                .map(|(m, d, t)| {
                    vec![
                        CellValue::Number(*m),
                        CellValue::Number(*d),
                        CellValue::Text(t.to_string()),
                    ]
                })
                .collect(),
        )
        .unwrap();
        CleaningPipeline::new().run(&table)
    }

    #[test]
    fn test_grouped_statistics() {
        let data = cleaned(&[
            (7.5, 10.0, "yes"),
            (8.1, 30.0, "yes"),
            (6.0, 100.0, "no"),
            (6.4, 20.0, "no"),
            (6.2, 60.0, "no"),
        ]);

        let stats = TsunamiAnalyzer::new().analyze(&data).unwrap();

        assert_eq!(stats.total_events, 5);
        assert_eq!(stats.tsunami_events, 2);
        assert!((stats.tsunami_share() - 0.4).abs() < 1e-12);

        let yes = stats.group(TsunamiFlag::Yes).unwrap();
        assert_eq!(yes.magnitude.count, 2);
        assert!((yes.magnitude.mean - 7.8).abs() < 1e-12);
        assert_eq!(yes.depth.median, 20.0);

        let no = stats.group(TsunamiFlag::No).unwrap();
        assert_eq!(no.depth.median, 60.0);
        assert_eq!(no.magnitude.min, 6.0);
        assert_eq!(no.magnitude.max, 6.4);
    }

    #[test]
    fn test_threshold_comparison() {
        let data = cleaned(&[
            (7.5, 10.0, "yes"),
            (7.2, 40.0, "no"),
            (7.0, 200.0, "yes"),
            (6.0, 10.0, "no"),
        ]);

        let stats = TsunamiAnalyzer::new().analyze(&data).unwrap();
        let thresholds = &stats.thresholds;

        assert_eq!(thresholds.matching_events, 2);
        assert_eq!(thresholds.matching_tsunamis, 1);
        assert_eq!(thresholds.other_events, 2);
        assert_eq!(thresholds.matching_rate(), Some(0.5));
        assert_eq!(stats.located_tsunami_events, None);
    }

    #[test]
    fn test_missing_group_is_reported_not_fatal() {
        let data = cleaned(&[(6.0, 10.0, "no"), (6.3, 12.0, "no")]);

        let stats = TsunamiAnalyzer::new().analyze(&data).unwrap();
        let findings = stats.key_findings();

        assert!(stats.group(TsunamiFlag::Yes).is_none());
        assert!(findings.contains("0.0% of events"));
        assert!(findings.contains("n/a (tsunami) vs 6.15 (non-tsunami)"));
    }

    #[test]
    fn test_empty_data_is_an_error() {
        let data = cleaned(&[]);
        let result = TsunamiAnalyzer::new().analyze(&data);

        assert!(matches!(result, Err(ProcessingError::MissingData(_))));
    }

    #[test]
    fn test_summary_table_lists_both_groups() {
        let data = cleaned(&[(7.5, 10.0, "1"), (6.0, 100.0, "0")]);
        let table = TsunamiAnalyzer::new().analyze(&data).unwrap().summary_table();

        assert!(table.contains("magnitude column: magnitude"));
        assert_eq!(table.lines().filter(|l| l.starts_with('0')).count(), 2);
        assert_eq!(table.lines().filter(|l| l.starts_with('1')).count(), 2);
    }
}
