//! Decoded query-string pairs.
//!
//! Query parameters are coerced, never rejected: a repeated key keeps its first value and
//! unknown keys are ignored.

use crate::{PoliciesRequest, ReportsRequest};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPairs {
	pairs: Vec<(String, String)>,
}
impl QueryPairs {
	pub fn new(pairs: Vec<(String, String)>) -> Self {
		Self { pairs }
	}

	/// First value supplied for `key`.
	pub fn first(&self, key: &str) -> Option<&str> {
		self.pairs.iter().find(|(name, _)| name == key).map(|(_, value)| value.as_str())
	}

	fn owned(&self, key: &str) -> Option<String> {
		self.first(key).map(str::to_string)
	}
}
impl From<Vec<(String, String)>> for QueryPairs {
	fn from(pairs: Vec<(String, String)>) -> Self {
		Self::new(pairs)
	}
}

impl From<&QueryPairs> for ReportsRequest {
	fn from(query: &QueryPairs) -> Self {
		Self {
			search: query.owned("search"),
			category: query.owned("category"),
			frequency: query.owned("frequency"),
			page: query.owned("page"),
			limit: query.owned("limit"),
		}
	}
}

impl From<&QueryPairs> for PoliciesRequest {
	fn from(query: &QueryPairs) -> Self {
		Self {
			search: query.owned("search"),
			status: query.owned("status"),
			category: query.owned("category"),
			priority: query.owned("priority"),
			sort: query.owned("sort"),
			direction: query.owned("direction"),
		}
	}
}
