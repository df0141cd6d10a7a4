pub mod column_resolver;
pub mod normalizer;
pub mod pipeline;
pub mod row_filter;

pub use column_resolver::{normalize_column_name, ColumnResolver};
pub use normalizer::{normalize_numeric, normalize_tsunami};
pub use pipeline::{CleanedData, CleaningPipeline};
pub use row_filter::RowFilter;
