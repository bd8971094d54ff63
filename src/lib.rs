pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::actions::{get_movies, Outcome};
pub use app::session::{SessionState, YearBounds};
pub use config::Settings;
pub use core::client::MovieQueryClient;
pub use domain::model::{DateRange, MovieResult, Query};
pub use utils::error::{MovieError, Result};
