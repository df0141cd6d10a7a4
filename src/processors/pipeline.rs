use crate::models::{CandidateTable, CellValue, CleanRow, RawTable, Role, RoleAssignment};
use crate::processors::column_resolver::{normalize_column_name, ColumnResolver};
use crate::processors::normalizer::{normalize_numeric, normalize_tsunami};
use crate::processors::row_filter::RowFilter;
use tracing::{debug, info, warn};

/// A resolved column carried over into the clean table, in input order.
#[derive(Debug, Clone)]
struct ProjectedColumn {
    name: String,
    roles: Vec<Role>,
    source_index: usize,
}

impl ProjectedColumn {
    fn is_shared(&self) -> bool {
        self.roles.len() > 1
    }
}

/// Output of one cleaning run, handed read-only to analysis and charting.
#[derive(Debug, Clone)]
pub struct CleanedData {
    pub assignment: RoleAssignment,
    pub rows: Vec<CleanRow>,
    pub input_rows: usize,
    projection: Vec<ProjectedColumn>,
    // Raw cells of shared columns, one entry per kept row
    shared_cells: Vec<Vec<CellValue>>,
}

impl CleanedData {
    pub fn dropped_rows(&self) -> usize {
        self.input_rows - self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Project the clean rows back onto the resolved columns, keeping their
    /// input order.
    ///
    /// The tsunami column carries the 0/1 flag. A column that serves several
    /// roles gets its original cell back, since no single role's value
    /// reproduces the others on a rerun.
    pub fn to_raw_table(&self) -> RawTable {
        let columns = self.projection.iter().map(|c| c.name.clone()).collect();

        let rows = self
            .rows
            .iter()
            .zip(&self.shared_cells)
            .map(|(row, shared)| {
                let mut shared = shared.iter();
                self.projection
                    .iter()
                    .map(|column| match column.roles.as_slice() {
                        [role] => project_cell(row, *role),
                        _ => shared.next().cloned().unwrap_or_default(),
                    })
                    .collect()
            })
            .collect();

        RawTable::new(columns, rows).unwrap_or_default()
    }
}

fn project_cell(row: &CleanRow, role: Role) -> CellValue {
    match role {
        Role::Magnitude => row.magnitude.into(),
        Role::Depth => row.depth.into(),
        Role::Latitude => row.latitude.into(),
        Role::Longitude => row.longitude.into(),
        Role::TsunamiIndicator => row.tsunami_flag.map(|f| f.as_u8() as f64).into(),
    }
}

/// Raw table -> role resolution -> normalization -> filtering.
pub struct CleaningPipeline {
    resolver: ColumnResolver,
    filter: RowFilter,
}

impl CleaningPipeline {
    pub fn new() -> Self {
        Self::with_candidates(CandidateTable::default())
    }

    pub fn with_candidates(candidates: CandidateTable) -> Self {
        Self {
            resolver: ColumnResolver::with_candidates(candidates),
            filter: RowFilter::new(),
        }
    }

    pub fn run(&self, table: &RawTable) -> CleanedData {
        let columns: Vec<String> = table
            .columns()
            .iter()
            .map(|c| normalize_column_name(c))
            .collect();
        let assignment = self.resolver.resolve(&columns);

        let missing = assignment.unassigned_required();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|r| r.as_str()).collect();
            warn!(
                "No column found for required role(s): {}; no rows can survive",
                names.join(", ")
            );
        }

        let index_of = |role: Role| {
            assignment
                .get(role)
                .and_then(|name| columns.iter().position(|c| c == name))
        };
        let magnitude = index_of(Role::Magnitude);
        let depth = index_of(Role::Depth);
        let latitude = index_of(Role::Latitude);
        let longitude = index_of(Role::Longitude);
        let tsunami = index_of(Role::TsunamiIndicator);

        let projection: Vec<ProjectedColumn> = columns
            .iter()
            .enumerate()
            .filter(|(index, name)| columns.iter().position(|c| c == *name) == Some(*index))
            .filter_map(|(index, name)| {
                let roles: Vec<Role> = Role::ALL
                    .into_iter()
                    .filter(|role| assignment.get(*role) == Some(name.as_str()))
                    .collect();
                (!roles.is_empty()).then(|| ProjectedColumn {
                    name: name.clone(),
                    roles,
                    source_index: index,
                })
            })
            .collect();

        let (rows, shared_cells): (Vec<CleanRow>, Vec<Vec<CellValue>>) = table
            .rows()
            .iter()
            .map(|cells| {
                let numeric = |index: Option<usize>| {
                    index.and_then(|i| cells.get(i)).and_then(normalize_numeric)
                };
                let row = CleanRow {
                    magnitude: numeric(magnitude),
                    depth: numeric(depth),
                    latitude: numeric(latitude),
                    longitude: numeric(longitude),
                    tsunami_flag: tsunami
                        .and_then(|i| cells.get(i))
                        .and_then(normalize_tsunami),
                };
                let shared = projection
                    .iter()
                    .filter(|column| column.is_shared())
                    .map(|column| cells.get(column.source_index).cloned().unwrap_or_default())
                    .collect();
                (row, shared)
            })
            .filter(|(row, _)| self.filter.keeps(row))
            .unzip();

        let cleaned = CleanedData {
            assignment,
            rows,
            input_rows: table.row_count(),
            projection,
            shared_cells,
        };

        debug!(
            "Dropped {} of {} rows missing magnitude, depth or tsunami flag",
            cleaned.dropped_rows(),
            cleaned.input_rows
        );
        info!(
            "Cleaned table has {} rows ({} dropped)",
            cleaned.rows.len(),
            cleaned.dropped_rows()
        );

        cleaned
    }
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::new()
    }
}
