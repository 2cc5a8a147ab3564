use std::{fs, path::Path};

use csv::{ReaderBuilder, Trim};

use crate::{Error, Result};
use rbc_domain::{Frequency, ReportRecord};

pub fn load_reports(path: &Path) -> Result<Vec<ReportRecord>> {
	let raw = fs::read(path).map_err(|err| Error::Read { path: path.to_path_buf(), source: err })?;
	let records = parse_reports(path, raw.as_slice())?;

	tracing::info!(path = %path.display(), count = records.len(), "Loaded report fixture.");

	Ok(records)
}

/// Parses the required-reports sheet. Headers name the columns; blank lines are skipped.
pub fn parse_reports(path: &Path, raw: &[u8]) -> Result<Vec<ReportRecord>> {
	let mut reader = ReaderBuilder::new().trim(Trim::All).flexible(true).from_reader(raw);
	let mut records = Vec::new();

	for (index, row) in reader.deserialize::<ReportRecord>().enumerate() {
		let record = row.map_err(|err| Error::Csv {
			path: path.to_path_buf(),
			row: index + 1,
			source: err,
		})?;

		if record.searchable_fields().iter().all(|field| field.is_empty()) {
			continue;
		}
		if !record.frequency.is_empty() && record.frequency_kind() == Frequency::Other {
			tracing::debug!(
				row = index + 1,
				frequency = %record.frequency,
				"Report frequency is outside the known cadences."
			);
		}

		records.push(record);
	}

	if records.is_empty() {
		return Err(Error::Empty { path: path.to_path_buf() });
	}

	Ok(records)
}
