use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::store::{RecordHandle, RowStore, StoreError, Table};

const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Gateway to the Google Sheets values API: one spreadsheet, one worksheet
/// per table, bearer-token auth. Any transport or API failure is reported as
/// `StoreError::Unavailable`.
pub struct SheetsStore {
    http: reqwest::Client,
    token: String,
    spreadsheet_id: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetsStore {
    /// Builds the gateway and verifies the spreadsheet is reachable.
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(20))
            .build()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let store = SheetsStore {
            http,
            token: config.sheets_token.clone(),
            spreadsheet_id: config.spreadsheet_id.clone(),
        };
        store.probe().await?;
        Ok(store)
    }

    async fn probe(&self) -> Result<(), StoreError> {
        let url = format!("{API_BASE}/{}?fields=spreadsheetId", self.spreadsheet_id);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Unavailable(format!("{status}: {body}")))
    }

    // 1 -> A, 26 -> Z, 27 -> AA
    fn column_letter(mut col: usize) -> String {
        let mut letters = String::new();
        while col > 0 {
            let rem = (col - 1) % 26;
            letters.insert(0, (b'A' + rem as u8) as char);
            col = (col - 1) / 26;
        }
        letters
    }
}

#[async_trait]
impl RowStore for SheetsStore {
    async fn append(&self, table: Table, row: Vec<String>) -> Result<(), StoreError> {
        let url = format!(
            "{API_BASE}/{}/values/{}!A:K:append?valueInputOption=RAW",
            self.spreadsheet_id,
            table.name()
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({ "values": [row] }))
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn read_all(&self, table: Table) -> Result<Vec<Vec<String>>, StoreError> {
        let url = format!(
            "{API_BASE}/{}/values/{}!A:K",
            self.spreadsheet_id,
            table.name()
        );
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let response = Self::check_status(response).await?;
        let range: ValueRange = response
            .json()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let mut rows = range.values;
        // Row 1 is the header, excluded from logical reads.
        if !rows.is_empty() {
            rows.remove(0);
        }
        Ok(rows)
    }

    async fn update_cell(
        &self,
        handle: RecordHandle,
        col: usize,
        value: &str,
    ) -> Result<(), StoreError> {
        let range = format!(
            "{}!{}{}",
            handle.table.name(),
            Self::column_letter(col),
            handle.row
        );
        let url = format!(
            "{API_BASE}/{}/values/{}?valueInputOption=RAW",
            self.spreadsheet_id, range
        );
        let response = self
            .http
            .put(&url)
            .bearer_auth(&self.token)
            .json(&json!({ "values": [[value]] }))
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Self::check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letter() {
        assert_eq!(SheetsStore::column_letter(1), "A");
        assert_eq!(SheetsStore::column_letter(8), "H");
        assert_eq!(SheetsStore::column_letter(11), "K");
        assert_eq!(SheetsStore::column_letter(26), "Z");
        assert_eq!(SheetsStore::column_letter(27), "AA");
    }
}
