use crate::analyzers::ChartSet;
use crate::error::{ProcessingError, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes chart data as JSON for an external renderer.
pub struct ChartWriter {
    pretty: bool,
}

impl ChartWriter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn write_charts(&self, charts: &ChartSet, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(path)?);
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, charts)?;
        } else {
            serde_json::to_writer(&mut writer, charts)?;
        }
        writer.flush()?;

        info!("Wrote {} charts to {}", charts.len(), path.display());
        Ok(())
    }

    pub fn get_file_info(&self, path: &Path) -> Result<ChartFileInfo> {
        let file_size = std::fs::metadata(path)?.len();
        let document: serde_json::Value = serde_json::from_reader(BufReader::new(File::open(path)?))?;

        let titles = document["charts"]
            .as_array()
            .ok_or_else(|| {
                ProcessingError::InvalidFormat(format!(
                    "{} does not contain a chart list",
                    path.display()
                ))
            })?
            .iter()
            .map(|chart| chart["title"].as_str().unwrap_or("(untitled)").to_string())
            .collect();

        Ok(ChartFileInfo {
            path: path.to_path_buf(),
            file_size,
            titles,
        })
    }
}

impl Default for ChartWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct ChartFileInfo {
    pub path: PathBuf,
    pub file_size: u64,
    pub titles: Vec<String>,
}

impl ChartFileInfo {
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Chart Data Summary:\n\
            - File: {}\n\
            - File size: {:.1} KB\n\
            - Charts: {}",
            self.path.display(),
            self.file_size as f64 / 1024.0,
            self.titles.len()
        );
        for title in &self.titles {
            summary.push_str(&format!("\n  * {}", title));
        }
        summary
    }
}
