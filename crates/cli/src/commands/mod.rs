use chrono::Datelike;
use ledger::{BookId, LedgerError};
use serde::Serialize;

use crate::{
    client::Client,
    config::AppConfig,
    error::{AppError, Result},
};

pub mod add;
pub mod browse;
pub mod history;
pub mod stats;

/// What every command runs against.
pub struct Context {
    pub config: AppConfig,
    pub client: Client,
    /// Print raw read models as JSON instead of text.
    pub json: bool,
}

impl Context {
    pub fn new(config: AppConfig, json: bool) -> Result<Self> {
        let client = Client::new(&config.base_url, &config.token)?;
        Ok(Self {
            config,
            client,
            json,
        })
    }

    /// The configured book; commands that post or query need one.
    pub fn book_id(&self) -> Result<BookId> {
        self.config
            .book_id
            .as_deref()
            .and_then(BookId::parse)
            .ok_or(AppError::Ledger(LedgerError::NoBook))
    }

    /// Year and month to report on, defaulting to the current ones.
    pub fn period(&self, year: Option<i32>, month: Option<u32>) -> Result<(i32, u32)> {
        let now = self.config.now()?;
        let year = year.unwrap_or(now.year());
        let month = month.unwrap_or(now.month());
        if !(1..=12).contains(&month) {
            return Err(AppError::Usage(format!("month must be 1-12, got {month}")));
        }
        Ok((year, month))
    }

    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
