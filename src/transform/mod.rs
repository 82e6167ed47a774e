//! Transformation of validated CSV rows into import-ready records.
//!
//! Runs after validation, so cells are assumed well-formed; anything that
//! still fails to parse falls back to the documented default instead of
//! erroring. Per-row entities (sites, entry types, filesystems, assets) live
//! in [`rows`]; sections group multiple rows per handle in [`grouper`]; the
//! end-to-end parse, validate, transform flow lives in [`pipeline`].

pub mod grouper;
pub mod pipeline;
pub mod rows;

use std::collections::HashMap;

use crate::validators::is_truthy;

pub use grouper::transform_sections;
pub use pipeline::{run_bytes, run_file, PipelineReport, TransformedRecords};
pub use rows::{transform_assets, transform_entry_types, transform_filesystems, transform_sites};

/// A row's cells keyed by column name.
///
/// Absent column and empty cell are distinct: flags default differently
/// depending on whether their column exists in the file at all.
pub(crate) struct RowView<'a> {
    cells: HashMap<&'a str, &'a str>,
}

impl<'a> RowView<'a> {
    pub(crate) fn new(columns: &'a [String], row: &'a [String]) -> Self {
        let mut cells = HashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            cells.insert(column.as_str(), row.get(i).map(String::as_str).unwrap_or(""));
        }
        Self { cells }
    }

    /// The cell value, or `""` when the column is absent.
    pub(crate) fn get(&self, column: &str) -> &'a str {
        self.cells.get(column).copied().unwrap_or("")
    }

    /// The cell as an owned string, `None` when empty or absent.
    pub(crate) fn opt(&self, column: &str) -> Option<String> {
        let value = self.get(column);
        (!value.is_empty()).then(|| value.to_string())
    }

    /// The cell as a required owned string (empty when absent).
    pub(crate) fn required(&self, column: &str) -> String {
        self.get(column).to_string()
    }

    /// Flag that defaults to true: only an explicit non-truthy cell (or an
    /// empty cell under a present column) turns it off.
    pub(crate) fn flag_or_true(&self, column: &str) -> bool {
        match self.cells.get(column) {
            None => true,
            Some(value) => is_truthy(value),
        }
    }

    /// Flag that defaults to false: only an explicit truthy cell turns it on.
    pub(crate) fn flag_or_false(&self, column: &str) -> bool {
        self.cells.get(column).is_some_and(|value| is_truthy(value))
    }
}
