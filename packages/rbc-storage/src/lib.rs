//! Loaders for the static fixtures behind the dashboard.
//!
//! Both loaders run once at startup (and again on an explicit reload). Any failure is fatal
//! for the load: there is no partially loaded collection.

pub mod policies;
pub mod reports;

mod error;

pub use error::{Error, Result};
pub use policies::{load_policies, parse_policies};
pub use reports::{load_reports, parse_reports};
