//! Approximate matching for the reports directory.
//!
//! A query matches a field when some substring of the field is within a few edits of the
//! query. The score of a field is `edits / query_len`, plus a penalty of
//! `match_offset / distance` unless location is ignored, so 0.0 is a perfect match at the start
//! of the field. A record's score is the best score across its searchable fields.

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use rbc_domain::ReportRecord;

const FIELD_COUNT: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyOptions {
	pub threshold: f32,
	pub distance: u32,
	pub ignore_location: bool,
}
impl Default for FuzzyOptions {
	fn default() -> Self {
		Self::from(&rbc_config::Search::default())
	}
}
impl From<&rbc_config::Search> for FuzzyOptions {
	fn from(cfg: &rbc_config::Search) -> Self {
		Self { threshold: cfg.threshold, distance: cfg.distance, ignore_location: cfg.ignore_location }
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch {
	/// Position of the record in the indexed collection.
	pub index: usize,
	pub score: f32,
}

/// Searchable view over an immutable report collection.
///
/// Built once from a loaded collection and read-only afterwards. A reload builds a new index
/// rather than mutating this one. The distinct category and frequency values are captured at
/// build time so filter options always reflect the whole collection.
#[derive(Debug)]
pub struct ReportIndex {
	records: Vec<ReportRecord>,
	fields: Vec<[Vec<String>; FIELD_COUNT]>,
	categories: Vec<String>,
	frequencies: Vec<String>,
	options: FuzzyOptions,
}
impl ReportIndex {
	pub fn new(records: Vec<ReportRecord>, options: FuzzyOptions) -> Self {
		let fields = records
			.iter()
			.map(|record| record.searchable_fields().map(text_units))
			.collect();
		let categories =
			crate::vocabulary::distinct_values(records.iter().map(|record| record.category.as_str()));
		let frequencies = crate::vocabulary::distinct_values(
			records.iter().map(|record| record.frequency.as_str()),
		);

		tracing::debug!(
			records = records.len(),
			categories = categories.len(),
			frequencies = frequencies.len(),
			"Built report search index."
		);

		Self { records, fields, categories, frequencies, options }
	}

	pub fn records(&self) -> &[ReportRecord] {
		&self.records
	}

	pub fn categories(&self) -> &[String] {
		&self.categories
	}

	pub fn frequencies(&self) -> &[String] {
		&self.frequencies
	}

	pub fn options(&self) -> FuzzyOptions {
		self.options
	}

	/// Records that approximately match `query`, best first, ties in collection order.
	///
	/// A blank query returns every record in collection order.
	pub fn search(&self, query: &str) -> Vec<&ReportRecord> {
		let query = query.trim();

		if query.is_empty() {
			return self.records.iter().collect();
		}

		self.matches(query).into_iter().map(|found| &self.records[found.index]).collect()
	}

	/// Scored matches for a non-blank query, ordered as `search` returns them.
	pub fn matches(&self, query: &str) -> Vec<FuzzyMatch> {
		let pattern = text_units(query.trim());

		if pattern.is_empty() {
			return Vec::new();
		}

		let mut found: Vec<FuzzyMatch> = self
			.fields
			.iter()
			.enumerate()
			.filter_map(|(index, fields)| {
				let score = fields
					.iter()
					.map(|units| field_score(&pattern, units, self.options))
					.fold(f32::INFINITY, f32::min);

				(score <= self.options.threshold).then_some(FuzzyMatch { index, score })
			})
			.collect();

		// Stable, so equal scores keep collection order.
		found.sort_by(|a, b| a.score.total_cmp(&b.score));

		found
	}

	pub fn find_by_title(&self, title: &str) -> Option<&ReportRecord> {
		let title = title.trim();

		self.records.iter().find(|record| record.title == title)
	}
}

/// Lowercased NFKC grapheme clusters; the unit the edit distance counts in.
fn text_units(text: &str) -> Vec<String> {
	let normalized: String = text.nfkc().flat_map(char::to_lowercase).collect();

	normalized.graphemes(true).map(str::to_string).collect()
}

/// Best score of `pattern` against any substring of `text`, or 1.0 when the field is empty.
fn field_score(pattern: &[String], text: &[String], options: FuzzyOptions) -> f32 {
	if text.is_empty() {
		return 1.0;
	}

	let m = pattern.len();
	// Column of the edit matrix for the current text position: (edits, match start).
	let mut prev: Vec<(usize, usize)> = (0..=m).map(|i| (i, 0)).collect();
	let mut curr = vec![(0_usize, 0_usize); m + 1];
	let mut best = f32::INFINITY;

	for (j, unit) in text.iter().enumerate() {
		let column = j + 1;

		// A match may start anywhere in the text for free.
		curr[0] = (0, column);

		for i in 1..=m {
			let cost = usize::from(pattern[i - 1] != *unit);
			let substitute = (prev[i - 1].0 + cost, prev[i - 1].1);
			let skip_text = (prev[i].0 + 1, prev[i].1);
			let skip_pattern = (curr[i - 1].0 + 1, curr[i - 1].1);

			// Fewest edits first, then the earliest start.
			curr[i] = substitute.min(skip_text).min(skip_pattern);
		}

		let (edits, start) = curr[m];

		best = best.min(score(edits, m, start, options));

		std::mem::swap(&mut prev, &mut curr);
	}

	best
}

fn score(edits: usize, pattern_len: usize, start: usize, options: FuzzyOptions) -> f32 {
	let accuracy = edits as f32 / pattern_len as f32;

	if options.ignore_location {
		return accuracy;
	}
	if options.distance == 0 {
		return if start == 0 { accuracy } else { 1.0 };
	}

	accuracy + start as f32 / options.distance as f32
}
