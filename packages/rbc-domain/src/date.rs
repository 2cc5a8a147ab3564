use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

const FORMATS: [&[BorrowedFormatItem<'static>]; 6] = [
	format_description!("[year]-[month]-[day]"),
	format_description!("[month padding:none]/[day padding:none]/[year]"),
	format_description!(
		"[month repr:long case_sensitive:false] [day padding:none], [year]"
	),
	format_description!(
		"[month repr:short case_sensitive:false] [day padding:none], [year]"
	),
	format_description!("[day padding:none] [month repr:long case_sensitive:false] [year]"),
	format_description!("[day padding:none] [month repr:short case_sensitive:false] [year]"),
];

/// Parses the review and deadline dates found in the register.
///
/// Accepts ISO dates (optionally followed by a time component), US slash dates and written
/// month forms such as `March 31, 2025` or `31 Mar 2025`. Anything else is `None`.
pub fn parse_review_date(raw: &str) -> Option<Date> {
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		return None;
	}
	if let Some(prefix) = trimmed.get(..10)
		&& let Ok(date) = Date::parse(prefix, FORMATS[0])
	{
		return Some(date);
	}

	FORMATS.iter().find_map(|format| Date::parse(trimmed, *format).ok())
}
