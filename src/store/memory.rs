use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::store::{RecordHandle, RowStore, StoreError, Table};

/// In-memory stand-in for the remote spreadsheet, mirroring its layout
/// (header included, 1-indexed rows). Backs the unit tests.
pub struct MemoryStore {
    tables: Mutex<HashMap<Table, Vec<Vec<String>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let header = |names: &[&str]| names.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let mut tables = HashMap::new();
        tables.insert(
            Table::Users,
            vec![header(&["userId", "alias", "branch", "role"])],
        );
        tables.insert(
            Table::Attendance,
            vec![header(&[
                "userId",
                "alias",
                "branch",
                "storeName",
                "area",
                "locationLink",
                "checkinTimestamp",
                "checkoutTimestamp",
                "order",
                "invoice",
                "blockers",
            ])],
        );
        MemoryStore {
            tables: Mutex::new(tables),
        }
    }

    /// Raw sheet contents, header row included.
    pub fn raw(&self, table: Table) -> Vec<Vec<String>> {
        self.tables.lock().unwrap()[&table].clone()
    }
}

#[async_trait]
impl RowStore for MemoryStore {
    async fn append(&self, table: Table, row: Vec<String>) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        tables.get_mut(&table).unwrap().push(row);
        Ok(())
    }

    async fn read_all(&self, table: Table) -> Result<Vec<Vec<String>>, StoreError> {
        Ok(self.tables.lock().unwrap()[&table][1..].to_vec())
    }

    async fn update_cell(
        &self,
        handle: RecordHandle,
        col: usize,
        value: &str,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.get_mut(&handle.table).unwrap();
        let row = rows
            .get_mut(handle.row - 1)
            .ok_or_else(|| StoreError::Unavailable(format!("row {} out of range", handle.row)))?;
        if row.len() < col {
            row.resize(col, String::new());
        }
        row[col - 1] = value.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_and_read_back() {
        let store = MemoryStore::new();
        let row = vec!["1".to_string(), "a".to_string(), "b".to_string(), "user".to_string()];
        store.append(Table::Users, row.clone()).await.unwrap();

        let rows = store.read_all(Table::Users).await.unwrap();
        assert_eq!(rows, vec![row]);
        // Header stays at row 1.
        assert_eq!(store.raw(Table::Users).len(), 2);
    }

    #[tokio::test]
    async fn test_update_cell_extends_short_rows() {
        let store = MemoryStore::new();
        store
            .append(Table::Attendance, vec!["1".to_string(); 7])
            .await
            .unwrap();

        let handle = RecordHandle {
            table: Table::Attendance,
            row: 2,
        };
        store.update_cell(handle, 8, "2024-05-20 12:30:00").await.unwrap();

        let rows = store.read_all(Table::Attendance).await.unwrap();
        assert_eq!(rows[0][7], "2024-05-20 12:30:00");
    }

    #[tokio::test]
    async fn test_update_cell_out_of_range() {
        let store = MemoryStore::new();
        let handle = RecordHandle {
            table: Table::Attendance,
            row: 9,
        };
        assert!(matches!(
            store.update_cell(handle, 8, "x").await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
