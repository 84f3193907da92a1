use crate::store::{StoreError, Table};

// 1-indexed column positions of the checkout cells in the attendance sheet.
pub const COL_CHECKOUT_TS: usize = 8;
pub const COL_ORDER: usize = 9;
pub const COL_INVOICE: usize = 10;
pub const COL_BLOCKERS: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
    Owner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Owner => "owner",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            "owner" => Some(Role::Owner),
            _ => None,
        }
    }

    pub fn can_approve(&self) -> bool {
        matches!(self, Role::Admin | Role::Owner)
    }
}

/// One row of the `users` sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: String,
    pub alias: String,
    pub branch: String,
    pub role: Role,
}

impl UserRecord {
    pub fn from_row(row: &[String], sheet_row: usize) -> Result<Self, StoreError> {
        if row.len() < 4 {
            return Err(StoreError::MalformedRow {
                table: Table::Users.name(),
                row: sheet_row,
                reason: format!("expected 4 columns, got {}", row.len()),
            });
        }
        let role = Role::parse(&row[3]).ok_or_else(|| StoreError::MalformedRow {
            table: Table::Users.name(),
            row: sheet_row,
            reason: format!("unknown role `{}`", row[3]),
        })?;
        Ok(UserRecord {
            user_id: row[0].clone(),
            alias: row[1].clone(),
            branch: row[2].clone(),
            role,
        })
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.user_id.clone(),
            self.alias.clone(),
            self.branch.clone(),
            self.role.as_str().to_string(),
        ]
    }
}

/// One row of the `attendance` sheet. The checkout cells are `None` while
/// the record is open; the store may also leave them off the row entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub user_id: String,
    pub alias: String,
    pub branch: String,
    pub store_name: String,
    pub area: String,
    pub location_link: String,
    pub checkin_ts: String,
    pub checkout_ts: Option<String>,
    pub order: Option<String>,
    pub invoice: Option<String>,
    pub blockers: Option<String>,
}

impl AttendanceRecord {
    pub fn from_row(row: &[String], sheet_row: usize) -> Result<Self, StoreError> {
        if row.len() < 7 {
            return Err(StoreError::MalformedRow {
                table: Table::Attendance.name(),
                row: sheet_row,
                reason: format!("expected at least 7 columns, got {}", row.len()),
            });
        }
        let cell = |i: usize| row.get(i).filter(|s| !s.is_empty()).cloned();
        Ok(AttendanceRecord {
            user_id: row[0].clone(),
            alias: row[1].clone(),
            branch: row[2].clone(),
            store_name: row[3].clone(),
            area: row[4].clone(),
            location_link: row[5].clone(),
            checkin_ts: row[6].clone(),
            checkout_ts: cell(COL_CHECKOUT_TS - 1),
            order: cell(COL_ORDER - 1),
            invoice: cell(COL_INVOICE - 1),
            blockers: cell(COL_BLOCKERS - 1),
        })
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.user_id.clone(),
            self.alias.clone(),
            self.branch.clone(),
            self.store_name.clone(),
            self.area.clone(),
            self.location_link.clone(),
            self.checkin_ts.clone(),
            self.checkout_ts.clone().unwrap_or_default(),
            self.order.clone().unwrap_or_default(),
            self.invoice.clone().unwrap_or_default(),
            self.blockers.clone().unwrap_or_default(),
        ]
    }

    pub fn is_open(&self) -> bool {
        self.checkout_ts.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_user_row() {
        let row = cells(&["12345", "Budi", "Kandangan", "admin"]);
        let user = UserRecord::from_row(&row, 2).unwrap();
        assert_eq!(user.user_id, "12345");
        assert_eq!(user.alias, "Budi");
        assert_eq!(user.branch, "Kandangan");
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn test_user_row_too_short() {
        let row = cells(&["12345", "Budi"]);
        assert!(matches!(
            UserRecord::from_row(&row, 3),
            Err(StoreError::MalformedRow { row: 3, .. })
        ));
    }

    #[test]
    fn test_user_row_unknown_role() {
        let row = cells(&["12345", "Budi", "Kandangan", "manager"]);
        assert!(matches!(
            UserRecord::from_row(&row, 2),
            Err(StoreError::MalformedRow { .. })
        ));
    }

    #[test]
    fn test_role_parse_and_permissions() {
        assert_eq!(Role::parse("owner"), Some(Role::Owner));
        assert_eq!(Role::parse("supervisor"), None);
        assert!(Role::Admin.can_approve());
        assert!(Role::Owner.can_approve());
        assert!(!Role::User.can_approve());
    }

    #[test]
    fn test_open_attendance_row_with_missing_trailing_cells() {
        // An appended open record may be stored with only 7 cells.
        let row = cells(&[
            "12345",
            "Budi",
            "Kandangan",
            "Toko Abadi",
            "Kandangan",
            "https://www.google.com/maps?q=1,2",
            "2024-05-20 10:00:00",
        ]);
        let record = AttendanceRecord::from_row(&row, 2).unwrap();
        assert!(record.is_open());
        assert_eq!(record.checkout_ts, None);
        assert_eq!(record.order, None);
    }

    #[test]
    fn test_closed_attendance_row() {
        let row = cells(&[
            "12345",
            "Budi",
            "Kandangan",
            "Toko Abadi",
            "Kandangan",
            "https://www.google.com/maps?q=1,2",
            "2024-05-20 10:00:00",
            "2024-05-20 12:30:00",
            "150000",
            "100000",
            "Tidak ada",
        ]);
        let record = AttendanceRecord::from_row(&row, 5).unwrap();
        assert!(!record.is_open());
        assert_eq!(record.checkout_ts.as_deref(), Some("2024-05-20 12:30:00"));
        assert_eq!(record.blockers.as_deref(), Some("Tidak ada"));
    }

    #[test]
    fn test_attendance_row_too_short() {
        let row = cells(&["12345", "Budi", "Kandangan"]);
        assert!(matches!(
            AttendanceRecord::from_row(&row, 4),
            Err(StoreError::MalformedRow { row: 4, .. })
        ));
    }

    #[test]
    fn test_attendance_row_round_trip() {
        let record = AttendanceRecord {
            user_id: "12345".into(),
            alias: "Budi".into(),
            branch: "Kandangan".into(),
            store_name: "Toko Abadi".into(),
            area: "".into(),
            location_link: "https://www.google.com/maps?q=1,2".into(),
            checkin_ts: "2024-05-20 10:00:00".into(),
            checkout_ts: None,
            order: None,
            invoice: None,
            blockers: None,
        };
        let row = record.to_row();
        assert_eq!(row.len(), 11);
        assert_eq!(AttendanceRecord::from_row(&row, 2).unwrap(), record);
    }
}
