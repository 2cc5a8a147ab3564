use serde::Serialize;

use rbc_config::Pagination;

/// A page request after coercion. Both values are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
	pub page: u32,
	pub limit: u32,
}
impl PageRequest {
	/// Each value is read like a leading integer (`"2.5"` is 2, `"3abc"` is 3). Values with no
	/// leading digits, or below 1, fall back to page 1 and the default limit. Limits above the
	/// configured maximum are clamped.
	pub fn coerce(page: Option<&str>, limit: Option<&str>, cfg: &Pagination) -> Self {
		let page = positive(page).unwrap_or(1);
		let limit = positive(limit).unwrap_or(cfg.default_limit).min(cfg.max_limit).max(1);

		Self { page, limit }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
	pub page: u32,
	pub limit: u32,
	pub total: usize,
	pub total_pages: usize,
}

/// Slice one page out of `items`. Pages past the end are empty, not an error.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> (Vec<T>, PageInfo) {
	let total = items.len();
	let limit = request.limit.max(1) as usize;
	let total_pages = total.div_ceil(limit);
	let start = (request.page.max(1) as usize - 1).saturating_mul(limit);
	let page = items.into_iter().skip(start).take(limit).collect();

	(page, PageInfo { page: request.page, limit: request.limit, total, total_pages })
}

fn positive(raw: Option<&str>) -> Option<u32> {
	let value = raw?.trim();
	let unsigned = value.strip_prefix('+').unwrap_or(value);
	let digits = unsigned
		.find(|ch: char| !ch.is_ascii_digit())
		.map_or(unsigned, |end| &unsigned[..end]);

	if digits.is_empty() {
		return None;
	}

	// Only overflow can fail here; saturate so oversized limits clamp and oversized pages are
	// simply past the end.
	let parsed = digits.parse::<u32>().unwrap_or(u32::MAX);

	(parsed >= 1).then_some(parsed)
}
