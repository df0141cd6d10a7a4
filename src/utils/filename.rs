use crate::utils::constants::OUTPUT_DIR;
use chrono::{Datelike, Local};
use std::path::PathBuf;

/// Generate default chart data filename with format: quake-charts-{YYMMDD}.json
pub fn generate_default_charts_filename() -> PathBuf {
    let now = Local::now();
    let filename = format!(
        "quake-charts-{:02}{:02}{:02}.json",
        now.year() % 100,
        now.month(),
        now.day()
    );
    PathBuf::from(OUTPUT_DIR).join(filename)
}
