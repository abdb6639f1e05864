//! # imoviedash
//!
//! Viewing analytics for a film catalogue: load the viewing table, derive
//! `Year` and `Popularity_Score`, filter by year/category/language and produce
//! the tables a dashboard renders.
//!
//! ```no_run
//! use imoviedash::{config::DashboardConfig, dashboard::Dashboard};
//!
//! fn main() -> anyhow::Result<()> {
//!     let dash = Dashboard::open(&DashboardConfig::default())?;
//!     let filter = dash.controls().default_filter().expect("dataset is empty");
//!     let view = dash.view(&filter);
//!     imoviedash::render::text(&view, &mut std::io::stdout())?;
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod derive;
pub mod filter;
pub mod load;
pub mod predict;
pub mod render;
pub mod table;
