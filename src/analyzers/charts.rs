use crate::analyzers::stats::BoxSummary;
use crate::models::{CleanRow, Role, TsunamiFlag};
use crate::processors::CleanedData;
use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{debug, warn};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxGroup {
    pub label: String,
    pub summary: BoxSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub label: String,
    /// `[x, y]` pairs
    pub points: Vec<[f64; 2]>,
}

/// Renderer-agnostic description of a single chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    Bar {
        title: String,
        x_label: String,
        y_label: String,
        bars: Vec<Bar>,
    },
    BoxPlot {
        title: String,
        y_label: String,
        source_column: String,
        groups: Vec<BoxGroup>,
    },
    Scatter {
        title: String,
        x_label: String,
        y_label: String,
        x_column: String,
        y_column: String,
        series: Vec<ScatterSeries>,
    },
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::Bar { title, .. } | Chart::BoxPlot { title, .. } | Chart::Scatter { title, .. } => {
                title
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSet {
    pub generated_at: DateTime<Local>,
    pub charts: Vec<Chart>,
}

impl ChartSet {
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

/// Builds the chart data for the tsunami comparison plots.
pub struct ChartBuilder;

impl ChartBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, data: &CleanedData) -> ChartSet {
        let mut charts = vec![
            self.event_counts(data),
            self.box_plot(
                data,
                Role::Magnitude,
                |row| row.magnitude,
                "Magnitude Distribution by Tsunami Flag",
                "Magnitude (Mw)",
            ),
            self.box_plot(
                data,
                Role::Depth,
                |row| row.depth,
                "Depth Distribution by Tsunami Flag",
                "Depth (km)",
            ),
            self.depth_vs_magnitude(data),
        ];

        if data.assignment.has_coordinates() {
            charts.push(self.tsunami_locations(data));
        } else {
            debug!("No coordinate columns resolved; skipping geographic chart");
        }

        ChartSet {
            generated_at: Local::now(),
            charts,
        }
    }

    fn event_counts(&self, data: &CleanedData) -> Chart {
        let bars = TsunamiFlag::ALL
            .iter()
            .map(|flag| Bar {
                label: flag.to_string(),
                value: data
                    .rows
                    .iter()
                    .filter(|row| row.tsunami_flag == Some(*flag))
                    .count(),
            })
            .filter(|bar| bar.value > 0)
            .collect();

        Chart::Bar {
            title: "Count of Events: Tsunami (1) vs Non-Tsunami (0)".to_string(),
            x_label: "Tsunami Flag".to_string(),
            y_label: "Count".to_string(),
            bars,
        }
    }

    fn box_plot(
        &self,
        data: &CleanedData,
        role: Role,
        value: fn(&CleanRow) -> Option<f64>,
        title: &str,
        y_label: &str,
    ) -> Chart {
        let groups = TsunamiFlag::ALL
            .iter()
            .filter_map(|flag| {
                let values: Vec<f64> = rows_with_flag(data, *flag)
                    .filter_map(value)
                    .collect();
                Some(BoxGroup {
                    label: flag.label().to_string(),
                    summary: BoxSummary::from_values(&values)?,
                })
            })
            .collect();

        Chart::BoxPlot {
            title: title.to_string(),
            y_label: y_label.to_string(),
            source_column: source_column(data, role),
            groups,
        }
    }

    fn depth_vs_magnitude(&self, data: &CleanedData) -> Chart {
        let series = TsunamiFlag::ALL
            .iter()
            .map(|flag| ScatterSeries {
                label: format!("Tsunami={}", flag),
                points: rows_with_flag(data, *flag)
                    .filter_map(|row| Some([row.magnitude?, row.depth?]))
                    .collect(),
            })
            .filter(|series| !series.points.is_empty())
            .collect();

        Chart::Scatter {
            title: "Depth vs Magnitude by Tsunami Flag".to_string(),
            x_label: "Magnitude (Mw)".to_string(),
            y_label: "Depth (km)".to_string(),
            x_column: source_column(data, Role::Magnitude),
            y_column: source_column(data, Role::Depth),
            series,
        }
    }

    fn tsunami_locations(&self, data: &CleanedData) -> Chart {
        let mut skipped = 0usize;
        let points: Vec<[f64; 2]> = rows_with_flag(data, TsunamiFlag::Yes)
            .filter_map(CleanRow::geo_point)
            .filter(|point| {
                let valid = point.validate().is_ok();
                if !valid {
                    skipped += 1;
                }
                valid
            })
            .map(|point| [point.longitude, point.latitude])
            .collect();

        if skipped > 0 {
            warn!(
                "Skipped {} tsunami events with out-of-range coordinates",
                skipped
            );
        }

        Chart::Scatter {
            title: "Geographic Scatter of Tsunami-Generating Earthquakes".to_string(),
            x_label: "Longitude".to_string(),
            y_label: "Latitude".to_string(),
            x_column: source_column(data, Role::Longitude),
            y_column: source_column(data, Role::Latitude),
            series: vec![ScatterSeries {
                label: "Tsunami=1".to_string(),
                points,
            }],
        }
    }
}

impl Default for ChartBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn rows_with_flag(data: &CleanedData, flag: TsunamiFlag) -> impl Iterator<Item = &CleanRow> {
    data.rows
        .iter()
        .filter(move |row| row.tsunami_flag == Some(flag))
}

fn source_column(data: &CleanedData, role: Role) -> String {
    data.assignment.get(role).unwrap_or_default().to_string()
}
