use crate::config::toml_config::MenuConfig;
use crate::domain::model::MealKind;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "snu-menu")]
#[command(about = "Shows today's SNU cafeteria menus")]
pub struct CliConfig {
    /// Path to the TOML settings file (optional)
    #[arg(short, long, default_value = "snu-menu.toml")]
    pub config: PathBuf,

    /// Date to show, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Meal to show (defaults to the meal being served now)
    #[arg(short, long, value_enum)]
    pub meal: Option<MealKind>,

    /// Extra days to fetch ahead, overriding the settings file
    #[arg(long)]
    pub prefetch: Option<u32>,

    /// Print the whole day's menu as JSON
    #[arg(long)]
    pub json: bool,

    /// Step through days and meals interactively
    #[arg(long)]
    pub browse: bool,

    /// Log as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Folds command-line overrides into the loaded settings so they go
    /// through the same validation.
    pub fn apply_overrides(&self, config: &mut MenuConfig) {
        if let Some(prefetch) = self.prefetch {
            tracing::info!("prefetch overridden to {} days", prefetch);
            config.prefetch_days = prefetch;
        }
    }
}
