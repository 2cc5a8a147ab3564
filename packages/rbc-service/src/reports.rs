use serde::{Deserialize, Serialize};

use rbc_domain::ReportRecord;

use crate::{
	ComplianceService,
	filter::{FilterSet, ReportField},
	paginate::{self, PageInfo, PageRequest},
};

/// Query string of the reports endpoint. Every value stays a raw string until the pipeline
/// coerces it, so malformed input never rejects the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportsRequest {
	pub search: Option<String>,
	pub category: Option<String>,
	pub frequency: Option<String>,
	pub page: Option<String>,
	pub limit: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportsResponse {
	pub data: Vec<ReportRecord>,
	pub pagination: PageInfo,
	pub filters: ReportFilters,
}

/// Filter options drawn from the whole directory, independent of the current query.
#[derive(Debug, Clone, Serialize)]
pub struct ReportFilters {
	pub categories: Vec<String>,
	pub frequencies: Vec<String>,
}

impl ComplianceService {
	pub fn query_reports(&self, req: &ReportsRequest) -> ReportsResponse {
		let index = self.reports();
		let matched = index.search(req.search.as_deref().unwrap_or_default());
		let filters = FilterSet::new()
			.with(ReportField::Category, req.category.as_deref())
			.with(ReportField::Frequency, req.frequency.as_deref());
		let filtered = filters.apply(matched);
		let request =
			PageRequest::coerce(req.page.as_deref(), req.limit.as_deref(), &self.cfg.pagination);
		let (page, pagination) = paginate::paginate(filtered, request);

		tracing::debug!(
			search = req.search.as_deref().unwrap_or_default(),
			total = pagination.total,
			page = pagination.page,
			"Reports query served."
		);

		ReportsResponse {
			data: page.into_iter().cloned().collect(),
			pagination,
			filters: ReportFilters {
				categories: index.categories().to_vec(),
				frequencies: index.frequencies().to_vec(),
			},
		}
	}
}
