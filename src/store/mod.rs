pub mod models;
pub mod sheets;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

/// Worksheets in the backing spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    Attendance,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Attendance => "attendance",
        }
    }
}

/// Position of a stored record: worksheet plus 1-indexed sheet row, counting
/// the header as row 1. Row position is not a stable identity; a handle is
/// only valid until the table is next appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHandle {
    pub table: Table,
    pub row: usize,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("row store unavailable: {0}")]
    Unavailable(String),

    #[error("malformed row {row} in `{table}`: {reason}")]
    MalformedRow {
        table: &'static str,
        row: usize,
        reason: String,
    },
}

/// Row-level operations over the external tabular store. Every call is a
/// remote round trip with no transactional guarantees. A failed `append` may
/// or may not have been applied, so record-creating callers must not blindly
/// retry it; read-only calls can be retried freely.
#[async_trait]
pub trait RowStore: Send + Sync {
    async fn append(&self, table: Table, row: Vec<String>) -> Result<(), StoreError>;

    /// All logical rows of a table in store order, header row excluded.
    async fn read_all(&self, table: Table) -> Result<Vec<Vec<String>>, StoreError>;

    /// Writes one cell of the row named by `handle`. `col` is 1-indexed.
    async fn update_cell(
        &self,
        handle: RecordHandle,
        col: usize,
        value: &str,
    ) -> Result<(), StoreError>;
}
