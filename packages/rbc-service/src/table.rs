//! Interactive state of the policy table.
//!
//! Search term, filters, sort and the expanded row are independent: changing one never resets
//! another, except that `reset_filters` clears both the search term and the filters.

use serde::Serialize;

use rbc_domain::PolicyRecord;

use crate::{
	filter::{FilterSet, PolicyField},
	policies::{self, PolicyQuery},
	sort::{SortKey, SortState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailPanel {
	Policy,
	Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpandedRow {
	pub id: String,
	pub panel: DetailPanel,
}

#[derive(Debug, Clone, Default)]
pub struct PolicyTable {
	query: PolicyQuery,
	expanded: Option<ExpandedRow>,
}
impl PolicyTable {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn search_term(&self) -> &str {
		&self.query.search
	}

	pub fn filters(&self) -> &FilterSet<PolicyField> {
		&self.query.filters
	}

	pub fn sort(&self) -> SortState {
		self.query.sort
	}

	pub fn expanded(&self) -> Option<&ExpandedRow> {
		self.expanded.as_ref()
	}

	pub fn set_search_term(&mut self, term: impl Into<String>) {
		self.query.search = term.into();
	}

	/// `None`, an empty value or `all` removes the constraint.
	pub fn set_filter(&mut self, field: PolicyField, value: Option<&str>) {
		self.query.filters.set(field, value);
	}

	pub fn reset_filters(&mut self) {
		self.query.search.clear();
		self.query.filters.clear();
	}

	pub fn toggle_sort(&mut self, key: SortKey) {
		self.query.sort = self.query.sort.toggle(key);
	}

	/// Opens `panel` on row `id`, closing whatever was open. Asking for the open panel again
	/// closes it.
	pub fn toggle_expansion(&mut self, id: &str, panel: DetailPanel) {
		let already_open = self
			.expanded
			.as_ref()
			.is_some_and(|open| open.id == id && open.panel == panel);

		self.expanded = if already_open {
			None
		} else {
			Some(ExpandedRow { id: id.to_string(), panel })
		};
	}

	pub fn collapse(&mut self) {
		self.expanded = None;
	}

	pub fn is_expanded(&self, id: &str, panel: DetailPanel) -> bool {
		self.expanded.as_ref().is_some_and(|open| open.id == id && open.panel == panel)
	}

	/// Rows to render for `records` under the current state.
	pub fn view<'a>(&self, records: &'a [PolicyRecord]) -> TableView<'a> {
		let rows = policies::query_policies(records, &self.query)
			.into_iter()
			.map(|record| TableRow {
				expanded: self
					.expanded
					.as_ref()
					.filter(|open| open.id == record.id)
					.map(|open| open.panel),
				record,
			})
			.collect();

		TableView { rows }
	}
}

#[derive(Debug, Clone)]
pub struct TableRow<'a> {
	pub record: &'a PolicyRecord,
	pub expanded: Option<DetailPanel>,
}

#[derive(Debug, Clone)]
pub struct TableView<'a> {
	pub rows: Vec<TableRow<'a>>,
}
impl TableView<'_> {
	/// True when nothing matches; the table shows its empty state.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	pub fn ids(&self) -> Vec<&str> {
		self.rows.iter().map(|row| row.record.id.as_str()).collect()
	}
}
