pub mod charts;
pub mod stats;
pub mod tsunami_analyzer;

pub use charts::{Chart, ChartBuilder, ChartSet};
pub use stats::{BoxSummary, DescriptiveStats};
pub use tsunami_analyzer::{GroupStatistics, ThresholdComparison, TsunamiAnalyzer, TsunamiStatistics};
