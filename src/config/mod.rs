pub mod toml_config;

use crate::app::session::YearBounds;
use crate::core::client::{DEFAULT_API_BASE, DEFAULT_IMAGE_BASE};
use crate::utils::error::Result;
use crate::utils::validation::{validate_ordered, validate_url, Validate};
use chrono::Datelike;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::app::render::OutputFormat;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub const DEFAULT_MIN_YEAR: i32 = 1978;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "monthly-movies")]
#[command(about = "Show the five most popular movies released in a given month (TMDb)")]
pub struct CliConfig {
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, help = "TMDb API base URL")]
    pub api_base: Option<String>,

    #[arg(long, help = "TMDb image base URL")]
    pub image_base: Option<String>,

    #[arg(long, help = "Smallest selectable year (default 1978)")]
    pub min_year: Option<i32>,

    #[arg(long, help = "Largest selectable year (default: current year)")]
    pub max_year: Option<i32>,

    #[arg(long, requires = "month", conflicts_with = "random")]
    pub year: Option<i32>,

    #[arg(long, help = "Month number or name", requires = "year")]
    pub month: Option<String>,

    #[arg(long, help = "Pick a random year and month and fetch once")]
    pub random: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 沒有指定 --year 或 --random 時進入互動模式
    pub fn is_interactive(&self) -> bool {
        self.year.is_none() && !self.random
    }
}

/// Resolved configuration: CLI flag > TOML > default.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_key: String,
    pub api_base: String,
    pub image_base: String,
    pub min_year: i32,
    pub max_year: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            image_base: DEFAULT_IMAGE_BASE.to_string(),
            min_year: DEFAULT_MIN_YEAR,
            max_year: chrono::Local::now().year(),
        }
    }
}

impl Settings {
    pub fn apply_toml(mut self, toml: &TomlConfig) -> Self {
        if let Some(tmdb) = &toml.tmdb {
            if let Some(key) = &tmdb.api_key {
                self.api_key = key.clone();
            }
            if let Some(base) = &tmdb.api_base {
                self.api_base = base.clone();
            }
            if let Some(base) = &tmdb.image_base {
                self.image_base = base.clone();
            }
        }
        if let Some(years) = &toml.years {
            if let Some(min) = years.min {
                self.min_year = min;
            }
            if let Some(max) = years.max {
                self.max_year = max;
            }
        }
        self
    }

    #[cfg(feature = "cli")]
    pub fn apply_cli(mut self, cli: &CliConfig) -> Self {
        if let Some(key) = &cli.api_key {
            self.api_key = key.clone();
        }
        if let Some(base) = &cli.api_base {
            self.api_base = base.clone();
        }
        if let Some(base) = &cli.image_base {
            self.image_base = base.clone();
        }
        if let Some(min) = cli.min_year {
            self.min_year = min;
        }
        if let Some(max) = cli.max_year {
            self.max_year = max;
        }
        self
    }

    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let mut settings = Self::default();
        if let Some(path) = &cli.config {
            tracing::debug!("Loading configuration from {}", path.display());
            let toml = TomlConfig::from_file(path)?;
            settings = settings.apply_toml(&toml);
        }
        Ok(settings.apply_cli(cli))
    }

    pub fn year_bounds(&self) -> Result<YearBounds> {
        YearBounds::new(self.min_year, self.max_year)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api_base", &self.api_base)?;
        validate_url("image_base", &self.image_base)?;
        validate_ordered("min_year", self.min_year, "max_year", self.max_year)?;
        Ok(())
    }
}
