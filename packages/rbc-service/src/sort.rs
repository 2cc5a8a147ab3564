//! Ordering for the policy table.
//!
//! Each sort key maps to a typed accessor. Records without a value for the key (or with a date
//! that does not parse) go last in both directions. The sort is stable in both directions:
//! descending flips the comparison rather than reversing the ascending result.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use time::Date;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use rbc_domain::{PolicyRecord, date};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
	#[default]
	Title,
	Status,
	Category,
	Priority,
	LastReviewed,
	NextDeadline,
}
impl SortKey {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim() {
			"title" => Some(Self::Title),
			"status" => Some(Self::Status),
			"category" => Some(Self::Category),
			"priority" => Some(Self::Priority),
			"lastReviewed" => Some(Self::LastReviewed),
			"nextDeadline" => Some(Self::NextDeadline),
			_ => None,
		}
	}

	fn accessor(self) -> Accessor {
		match self {
			Self::Title => title,
			Self::Status => status,
			Self::Category => category,
			Self::Priority => priority,
			Self::LastReviewed => last_reviewed,
			Self::NextDeadline => next_deadline,
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	#[default]
	Asc,
	Desc,
}
impl SortDirection {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim() {
			"asc" => Some(Self::Asc),
			"desc" => Some(Self::Desc),
			_ => None,
		}
	}

	pub fn flipped(self) -> Self {
		match self {
			Self::Asc => Self::Desc,
			Self::Desc => Self::Asc,
		}
	}

	fn apply(self, ordering: Ordering) -> Ordering {
		match self {
			Self::Asc => ordering,
			Self::Desc => ordering.reverse(),
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
	pub key: SortKey,
	pub direction: SortDirection,
}
impl SortState {
	pub fn new(key: SortKey, direction: SortDirection) -> Self {
		Self { key, direction }
	}

	/// Same key flips the direction; a new key starts ascending.
	pub fn toggle(self, key: SortKey) -> Self {
		if self.key == key {
			Self { key, direction: self.direction.flipped() }
		} else {
			Self { key, direction: SortDirection::Asc }
		}
	}
}

type Accessor = for<'a> fn(&'a PolicyRecord) -> Option<SortValue<'a>>;

#[derive(Debug, Clone, Copy)]
enum SortValue<'a> {
	Text(&'a str),
	/// Vocabulary or group first, then rank within it.
	Rank(u8, u8),
	Date(Date),
}
impl SortValue<'_> {
	fn compare(&self, other: &Self) -> Ordering {
		match (self, other) {
			(Self::Text(a), Self::Text(b)) => locale_cmp(a, b),
			(Self::Rank(a_group, a_rank), Self::Rank(b_group, b_rank)) =>
				(a_group, a_rank).cmp(&(b_group, b_rank)),
			(Self::Date(a), Self::Date(b)) => a.cmp(b),
			_ => Ordering::Equal,
		}
	}
}

/// New vector of `records` ordered by `state`; the input is left untouched.
pub fn sort_policies<'a>(records: &[&'a PolicyRecord], state: SortState) -> Vec<&'a PolicyRecord> {
	let accessor = state.key.accessor();
	let mut sorted = records.to_vec();

	sorted.sort_by(|a, b| match (accessor(a), accessor(b)) {
		(Some(a), Some(b)) => state.direction.apply(a.compare(&b)),
		(Some(_), None) => Ordering::Less,
		(None, Some(_)) => Ordering::Greater,
		(None, None) => Ordering::Equal,
	});

	sorted
}

/// Collation close to a default locale compare: letters compare without accents or case first,
/// then accents, then case with lowercase first.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
	let primary = |text: &str| -> Vec<char> {
		text.nfkd().filter(|ch| !is_combining_mark(*ch)).flat_map(char::to_lowercase).collect()
	};
	let secondary = |text: &str| -> Vec<char> { text.nfkd().flat_map(char::to_lowercase).collect() };
	let tertiary = |text: &str| -> Vec<bool> { text.nfkd().map(char::is_uppercase).collect() };

	primary(a)
		.cmp(&primary(b))
		.then_with(|| secondary(a).cmp(&secondary(b)))
		.then_with(|| tertiary(a).cmp(&tertiary(b)))
		.then_with(|| a.cmp(b))
}

fn title(record: &PolicyRecord) -> Option<SortValue<'_>> {
	Some(SortValue::Text(&record.title))
}

fn status(record: &PolicyRecord) -> Option<SortValue<'_>> {
	Some(SortValue::Rank(record.status.vocabulary() as u8, record.status.severity_rank()))
}

fn category(record: &PolicyRecord) -> Option<SortValue<'_>> {
	record.category.as_deref().map(SortValue::Text)
}

fn priority(record: &PolicyRecord) -> Option<SortValue<'_>> {
	record.priority.map(|priority| SortValue::Rank(0, priority.rank()))
}

fn last_reviewed(record: &PolicyRecord) -> Option<SortValue<'_>> {
	parsed_date(record.last_reviewed.as_deref())
}

fn next_deadline(record: &PolicyRecord) -> Option<SortValue<'_>> {
	parsed_date(record.next_deadline.as_deref())
}

fn parsed_date(raw: Option<&str>) -> Option<SortValue<'static>> {
	raw.and_then(date::parse_review_date).map(SortValue::Date)
}
