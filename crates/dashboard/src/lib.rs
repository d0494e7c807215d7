//! `tripboard-dashboard` — owner/trip join engine.
//!
//! Pure engine crate: receives parsed owner and trip collections, returns the
//! merged, filtered and paginated views. No CLI or IO dependencies.

pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod join;
pub mod model;
pub mod paginate;
pub mod session;

pub use config::BoardConfig;
pub use error::DashboardError;
pub use export::format_export;
pub use filter::filter;
pub use join::merge;
pub use model::{FilterState, MergedRecord, OwnerFilter, OwnerRecord, PageState, TripRecord};
pub use paginate::{clamp_page, paginate, total_pages};
pub use session::Dashboard;
