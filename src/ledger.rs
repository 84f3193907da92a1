use std::sync::Arc;

use crate::error::BotError;
use crate::store::models::{
    AttendanceRecord, COL_BLOCKERS, COL_CHECKOUT_TS, COL_INVOICE, COL_ORDER, UserRecord,
};
use crate::store::{RecordHandle, RowStore, Table};

/// Check-in/check-out operations over the `attendance` table. Owns the
/// invariant that a user has at most one open record at a time.
#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn RowStore>,
}

impl Ledger {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Ledger { store }
    }

    /// Appends a new attendance row with empty checkout cells.
    pub async fn open_checkin(
        &self,
        user: &UserRecord,
        store_name: &str,
        area: &str,
        location_link: &str,
        timestamp: &str,
    ) -> Result<(), BotError> {
        if self.find_open_record(&user.user_id).await?.is_some() {
            return Err(BotError::DuplicateOpenRecord);
        }
        let record = AttendanceRecord {
            user_id: user.user_id.clone(),
            alias: user.alias.clone(),
            branch: user.branch.clone(),
            store_name: store_name.to_string(),
            area: area.to_string(),
            location_link: location_link.to_string(),
            checkin_ts: timestamp.to_string(),
            checkout_ts: None,
            order: None,
            invoice: None,
            blockers: None,
        };
        self.store.append(Table::Attendance, record.to_row()).await?;
        tracing::info!("Check-in recorded for user {}", user.user_id);
        Ok(())
    }

    /// Newest open record for `user_id`, scanning tail to head. A row is
    /// open when its checkout-timestamp cell is empty or the row is too
    /// short to contain it. Scanning from the tail keeps the newest open
    /// record authoritative even if an older row was never closed.
    pub async fn find_open_record(
        &self,
        user_id: &str,
    ) -> Result<Option<(RecordHandle, AttendanceRecord)>, BotError> {
        let rows = self.store.read_all(Table::Attendance).await?;
        for (i, row) in rows.iter().enumerate().rev() {
            if row.first().map(String::as_str) != Some(user_id) {
                continue;
            }
            // Sheet rows are 1-indexed with the header at row 1.
            let sheet_row = i + 2;
            let record = AttendanceRecord::from_row(row, sheet_row)?;
            if !record.is_open() {
                continue;
            }
            let handle = RecordHandle {
                table: Table::Attendance,
                row: sheet_row,
            };
            return Ok(Some((handle, record)));
        }
        Ok(None)
    }

    /// Writes the four checkout cells of the user's open record. The writes
    /// are separate round trips; a failure mid-way leaves a partially
    /// closed row, which is surfaced but not repaired.
    pub async fn close_checkin(
        &self,
        user_id: &str,
        timestamp: &str,
        order: &str,
        invoice: &str,
        blockers: &str,
    ) -> Result<(), BotError> {
        let (handle, _) = self
            .find_open_record(user_id)
            .await?
            .ok_or(BotError::NoOpenRecord)?;

        self.store.update_cell(handle, COL_CHECKOUT_TS, timestamp).await?;
        self.store.update_cell(handle, COL_ORDER, order).await?;
        self.store.update_cell(handle, COL_INVOICE, invoice).await?;
        self.store.update_cell(handle, COL_BLOCKERS, blockers).await?;
        tracing::info!("Check-out recorded for user {} at row {}", user_id, handle.row);
        Ok(())
    }
}
