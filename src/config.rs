use anyhow::Result;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub admin_chat_id: Option<i64>,
    pub sheets_token: String,
    pub spreadsheet_id: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let bot_token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow::anyhow!("TELEGRAM_BOT_TOKEN environment variable is required"))?;

        let admin_chat_id = match env::var("ADMIN_CHAT_ID") {
            Ok(raw) => Some(
                raw.parse::<i64>()
                    .map_err(|_| anyhow::anyhow!("ADMIN_CHAT_ID must be a numeric chat id"))?,
            ),
            Err(_) => None,
        };

        let sheets_token = env::var("SHEETS_ACCESS_TOKEN")
            .map_err(|_| anyhow::anyhow!("SHEETS_ACCESS_TOKEN environment variable is required"))?;

        let spreadsheet_id = env::var("SPREADSHEET_ID")
            .map_err(|_| anyhow::anyhow!("SPREADSHEET_ID environment variable is required"))?;

        Ok(Config {
            bot_token,
            admin_chat_id,
            sheets_token,
            spreadsheet_id,
        })
    }
}
