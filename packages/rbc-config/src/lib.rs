mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Data, Pagination, Search, Security, Service};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg, path.parent());

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	for (label, value) in
		[("service.http_bind", &cfg.service.http_bind), ("service.admin_bind", &cfg.service.admin_bind)]
	{
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}
	for (label, value) in
		[("data.reports_csv", &cfg.data.reports_csv), ("data.policies_json", &cfg.data.policies_json)]
	{
		if value.as_os_str().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if !cfg.search.threshold.is_finite() {
		return Err(Error::Validation {
			message: "search.threshold must be a finite number.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&cfg.search.threshold) {
		return Err(Error::Validation {
			message: "search.threshold must be in the range 0.0-1.0.".to_string(),
		});
	}
	if !cfg.search.ignore_location && cfg.search.distance == 0 {
		return Err(Error::Validation {
			message: "search.distance must be greater than zero unless search.ignore_location is true."
				.to_string(),
		});
	}
	if cfg.pagination.default_limit == 0 {
		return Err(Error::Validation {
			message: "pagination.default_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.pagination.max_limit < cfg.pagination.default_limit {
		return Err(Error::Validation {
			message: "pagination.max_limit must be at least pagination.default_limit.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config, base_dir: Option<&Path>) {
	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}

	let Some(base_dir) = base_dir else { return };

	for path in [&mut cfg.data.reports_csv, &mut cfg.data.policies_json] {
		if !path.as_os_str().is_empty() && path.is_relative() {
			*path = base_dir.join(&*path);
		}
	}
}
