//! TEG Dashboard Core: everything behind the terminal.
//!
//! - Parameter panels, value labels and module presets
//! - The simulation service client and its response models
//! - Chart configurations with one live instance per canvas
//! - The view controller that turns edits into requests and responses into
//!   page and chart updates

pub mod api;
pub mod chart;
pub mod config;
pub mod interpretation;
pub mod labels;
pub mod page;
pub mod panel;
pub mod params;
pub mod sequence;
pub mod sweep;
pub mod view;

pub use api::{ApiClient, ApiError};
pub use config::{ConfigError, DashboardConfig};
pub use page::{Page, PageError};
pub use view::{Applied, Dashboard, RefreshOutcome, RefreshRequest, ViewState};
