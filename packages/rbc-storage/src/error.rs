use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read fixture at {path:?}.")]
	Read { path: PathBuf, source: std::io::Error },
	#[error("Failed to parse report row {row} in {path:?}.")]
	Csv { path: PathBuf, row: usize, source: csv::Error },
	#[error("Failed to parse policy register at {path:?}.")]
	Json { path: PathBuf, source: serde_json::Error },
	#[error("Fixture at {path:?} contains no records.")]
	Empty { path: PathBuf },
}
