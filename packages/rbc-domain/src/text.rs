use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Option<Regex>> =
	LazyLock::new(|| Regex::new(r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}").ok());
static BULLET_GAP: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s{2,}-").ok());
static WIDE_GAP: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s{2,}").ok());

pub fn extract_email_address(input: &str) -> Option<&str> {
	EMAIL.as_ref()?.find(input).map(|found| found.as_str())
}

/// Restores the line structure that spreadsheet exports flatten into runs of spaces.
///
/// A wide gap before `-` becomes a bullet on its own line; any other wide gap becomes a line
/// break.
pub fn format_multiline_text(text: &str) -> String {
	if text.is_empty() {
		return String::new();
	}

	let mut out = text.to_string();

	if let Some(re) = BULLET_GAP.as_ref() {
		out = re.replace_all(&out, "\n-").into_owned();
	}
	if let Some(re) = WIDE_GAP.as_ref() {
		out = re.replace_all(&out, "\n").into_owned();
	}

	out.trim().to_string()
}
