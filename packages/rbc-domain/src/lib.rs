pub mod date;
pub mod policy;
pub mod report;
pub mod text;

pub use policy::{PolicyRecord, PolicyStatus, Priority, StatusVocabulary};
pub use report::{Frequency, ReportRecord};

/// Filter value meaning "no constraint on this field".
pub const ALL: &str = "all";
