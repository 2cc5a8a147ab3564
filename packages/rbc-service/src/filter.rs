//! Exact-match constraints shared by both pipelines.

use rbc_domain::{ALL, PolicyRecord, ReportRecord};

/// Field a constraint reads from a record.
pub trait FieldAccess<R> {
	fn value<'a>(&self, record: &'a R) -> Option<&'a str>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportField {
	Category,
	Frequency,
}
impl FieldAccess<ReportRecord> for ReportField {
	fn value<'a>(&self, record: &'a ReportRecord) -> Option<&'a str> {
		match self {
			Self::Category => Some(&record.category),
			Self::Frequency => Some(&record.frequency),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyField {
	Status,
	Category,
	Priority,
}
impl FieldAccess<PolicyRecord> for PolicyField {
	fn value<'a>(&self, record: &'a PolicyRecord) -> Option<&'a str> {
		match self {
			Self::Status => Some(record.status.as_str()),
			Self::Category => record.category.as_deref(),
			Self::Priority => record.priority.map(|priority| priority.as_str()),
		}
	}
}

/// Conjunction of field = value constraints, at most one per field.
///
/// Values compare exactly and case-sensitively. A missing value, an empty value or the `all`
/// sentinel leaves the field unconstrained. A record without a value for a constrained field
/// does not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSet<F> {
	constraints: Vec<(F, String)>,
}
impl<F> Default for FilterSet<F> {
	fn default() -> Self {
		Self { constraints: Vec::new() }
	}
}
impl<F> FilterSet<F>
where
	F: Copy + PartialEq,
{
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, field: F, raw: Option<&str>) -> Self {
		self.set(field, raw);

		self
	}

	/// Replaces any existing constraint on `field`.
	pub fn set(&mut self, field: F, raw: Option<&str>) {
		self.constraints.retain(|(existing, _)| *existing != field);

		if let Some(value) = constraint_value(raw) {
			self.constraints.push((field, value.to_string()));
		}
	}

	pub fn clear(&mut self) {
		self.constraints.clear();
	}

	pub fn get(&self, field: F) -> Option<&str> {
		self.constraints
			.iter()
			.find(|(existing, _)| *existing == field)
			.map(|(_, value)| value.as_str())
	}

	pub fn is_empty(&self) -> bool {
		self.constraints.is_empty()
	}

	pub fn matches<R>(&self, record: &R) -> bool
	where
		F: FieldAccess<R>,
	{
		self.constraints.iter().all(|(field, value)| field.value(record) == Some(value.as_str()))
	}

	pub fn apply<'a, R>(&self, records: Vec<&'a R>) -> Vec<&'a R>
	where
		F: FieldAccess<R>,
	{
		if self.is_empty() {
			return records;
		}

		records.into_iter().filter(|record| self.matches(*record)).collect()
	}
}

fn constraint_value(raw: Option<&str>) -> Option<&str> {
	raw.filter(|value| !value.is_empty() && *value != ALL)
}
