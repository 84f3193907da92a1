use std::sync::Arc;

use crate::error::BotError;
use crate::store::models::{Role, UserRecord};
use crate::store::{RowStore, Table};

/// Registered-user lookup and registration over the `users` table.
#[derive(Clone)]
pub struct Directory {
    store: Arc<dyn RowStore>,
}

impl Directory {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Directory { store }
    }

    /// Appends a user row. The store has no uniqueness constraint, so
    /// callers verify absence first.
    pub async fn register(&self, user: &UserRecord) -> Result<(), BotError> {
        self.store.append(Table::Users, user.to_row()).await?;
        tracing::info!("Registered user {} (ID {})", user.alias, user.user_id);
        Ok(())
    }

    /// First row matching `user_id`, scanning in store order. Only the
    /// matching row is parsed, so unrelated malformed rows do not break
    /// lookups.
    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<UserRecord>, BotError> {
        let rows = self.store.read_all(Table::Users).await?;
        for (i, row) in rows.iter().enumerate() {
            if row.first().map(String::as_str) == Some(user_id) {
                // Sheet rows are 1-indexed with the header at row 1.
                return Ok(Some(UserRecord::from_row(row, i + 2)?));
            }
        }
        Ok(None)
    }

    /// Role of a registered user; `None` means no permission, never `user`.
    pub async fn role_of(&self, user_id: &str) -> Result<Option<Role>, BotError> {
        Ok(self.find_by_id(user_id).await?.map(|user| user.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn directory() -> (Arc<MemoryStore>, Directory) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), Directory::new(store))
    }

    fn user(id: &str, alias: &str, role: Role) -> UserRecord {
        UserRecord {
            user_id: id.to_string(),
            alias: alias.to_string(),
            branch: "Kandangan".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_register_then_find() {
        let (_, directory) = directory();
        directory.register(&user("12", "Budi", Role::User)).await.unwrap();

        let found = directory.find_by_id("12").await.unwrap().unwrap();
        assert_eq!(found.alias, "Budi");
        assert_eq!(found.role, Role::User);
    }

    #[tokio::test]
    async fn test_find_absent() {
        let (_, directory) = directory();
        assert!(directory.find_by_id("99").await.unwrap().is_none());
        assert!(directory.role_of("99").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_first_matching_row_wins() {
        let (_, directory) = directory();
        directory.register(&user("12", "Budi", Role::User)).await.unwrap();
        directory.register(&user("12", "Budi II", Role::Admin)).await.unwrap();

        let found = directory.find_by_id("12").await.unwrap().unwrap();
        assert_eq!(found.alias, "Budi");
    }

    #[tokio::test]
    async fn test_role_of() {
        let (_, directory) = directory();
        directory.register(&user("7", "Ibu Sri", Role::Owner)).await.unwrap();
        assert_eq!(directory.role_of("7").await.unwrap(), Some(Role::Owner));
    }

    #[tokio::test]
    async fn test_malformed_matching_row_is_an_error() {
        let (store, directory) = directory();
        store
            .append(Table::Users, vec!["12".to_string(), "Budi".to_string()])
            .await
            .unwrap();

        assert!(matches!(
            directory.find_by_id("12").await,
            Err(BotError::Store(_))
        ));
    }
}
