use chrono::NaiveDateTime;
use chrono_tz::Tz;
use clap::Args;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/bookkeep.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Bearer token issued by the service's login endpoint.
    pub token: String,
    /// Book used when a command does not name one.
    pub book_id: Option<String>,
    pub timezone: String,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9000".to_string(),
            token: String::new(),
            book_id: None,
            timezone: "Asia/Shanghai".to_string(),
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|err| AppError::Usage(format!("invalid timezone {}: {err}", self.timezone)))
    }

    /// Current wall-clock time in the configured timezone.
    pub fn now(&self) -> Result<NaiveDateTime> {
        Ok(chrono::Utc::now().with_timezone(&self.tz()?).naive_local())
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:9000).
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Override the default book id.
    #[arg(long, global = true)]
    pub book: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long, global = true)]
    pub timezone: Option<String>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub level: Option<String>,
}

/// Layers: config file, then `BOOKKEEP_*` environment variables, then flags.
/// The token is never read from flags.
pub fn load(args: &ConfigArgs) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("BOOKKEEP"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = &args.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(book) = &args.book {
        settings.book_id = Some(book.clone());
    }
    if let Some(timezone) = &args.timezone {
        settings.timezone = timezone.clone();
    }
    if let Some(level) = &args.level {
        settings.level = level.clone();
    }

    Ok(settings)
}
