pub mod email;
pub mod filter;
pub mod fuzzy;
pub mod paginate;
pub mod params;
pub mod policies;
pub mod reports;
pub mod sort;
pub mod table;
pub mod text_search;
pub mod vocabulary;

mod error;

pub use email::{EmailDraft, EmailReceipt, EmailRequest};
pub use error::{Error, Result};
pub use filter::{FieldAccess, FilterSet, PolicyField, ReportField};
pub use fuzzy::{FuzzyMatch, FuzzyOptions, ReportIndex};
pub use paginate::{PageInfo, PageRequest};
pub use params::QueryPairs;
pub use policies::{
	PoliciesRequest, PoliciesResponse, PolicyQuery, PolicyRow, PolicySummary, StatusCount,
};
pub use reports::{ReportFilters, ReportsRequest, ReportsResponse};
pub use sort::{SortDirection, SortKey, SortState};
pub use table::{DetailPanel, ExpandedRow, PolicyTable, TableRow, TableView};

use serde::Serialize;

use rbc_config::Config;
use rbc_domain::{PolicyRecord, ReportRecord, StatusVocabulary};

/// Record counts of a loaded catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
	pub reports: usize,
	pub policies: usize,
}

/// An immutable snapshot of both collections plus everything derived from them at load time.
///
/// Queries only read. Picking up new fixture files means building a new service.
#[derive(Debug)]
pub struct ComplianceService {
	pub cfg: Config,
	reports: ReportIndex,
	policies: Vec<PolicyRecord>,
	policy_categories: Vec<String>,
	policy_vocabulary: StatusVocabulary,
}
impl ComplianceService {
	/// Reads both fixture files named by `cfg.data`.
	pub fn load(cfg: Config) -> Result<Self> {
		let reports = rbc_storage::load_reports(&cfg.data.reports_csv)?;
		let policies = rbc_storage::load_policies(&cfg.data.policies_json)?;

		Ok(Self::new(cfg, reports, policies))
	}

	pub fn new(cfg: Config, reports: Vec<ReportRecord>, policies: Vec<PolicyRecord>) -> Self {
		let reports = ReportIndex::new(reports, FuzzyOptions::from(&cfg.search));
		let policy_categories =
			vocabulary::distinct_values(policies.iter().filter_map(|policy| policy.category.as_deref()));
		let policy_vocabulary = StatusVocabulary::dominant(policies.iter().map(|policy| policy.status));

		tracing::info!(
			reports = reports.records().len(),
			policies = policies.len(),
			vocabulary = ?policy_vocabulary,
			"Compliance catalog ready."
		);

		Self { cfg, reports, policies, policy_categories, policy_vocabulary }
	}

	pub fn reports(&self) -> &ReportIndex {
		&self.reports
	}

	pub fn policies(&self) -> &[PolicyRecord] {
		&self.policies
	}

	pub fn policy_categories(&self) -> &[String] {
		&self.policy_categories
	}

	pub fn policy_vocabulary(&self) -> StatusVocabulary {
		self.policy_vocabulary
	}

	pub fn counts(&self) -> CatalogCounts {
		CatalogCounts { reports: self.reports.records().len(), policies: self.policies.len() }
	}
}
