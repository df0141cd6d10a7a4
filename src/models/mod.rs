pub mod cell;
pub mod clean;
pub mod role;
pub mod table;

pub use cell::CellValue;
pub use clean::{CleanRow, GeoPoint, TsunamiFlag};
pub use role::{CandidateTable, Role, RoleAssignment};
pub use table::RawTable;
