use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub data: Data,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub pagination: Pagination,
	#[serde(default)]
	pub security: Security,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

/// Locations of the static fixtures. Relative paths are resolved against the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct Data {
	pub reports_csv: PathBuf,
	pub policies_json: PathBuf,
}

/// Tuning for the approximate matcher behind the reports directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Highest score a match may have and still be returned. 0.0 only accepts perfect matches.
	pub threshold: f32,
	/// How far from the start of a field a match may drift before it is penalized out.
	pub distance: u32,
	pub ignore_location: bool,
}
impl Default for Search {
	fn default() -> Self {
		Self { threshold: 0.3, distance: 100, ignore_location: false }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Pagination {
	pub default_limit: u32,
	pub max_limit: u32,
}
impl Default for Pagination {
	fn default() -> Self {
		Self { default_limit: 20, max_limit: 100 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Security {
	pub bind_localhost_only: bool,
}
impl Default for Security {
	fn default() -> Self {
		Self { bind_localhost_only: true }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}
