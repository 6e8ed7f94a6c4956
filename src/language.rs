//! `Accept-Language` parsing and negotiation.

use crate::specificity::{self, Preference, Specificity};
use crate::tokenizer;

/// One language range the client declared acceptable.
#[derive(Debug, Clone, PartialEq)]
pub struct Language {
	/// Primary subtag, e.g. `en` in `en-US`.
	pub primary: String,
	/// Everything after the first `-`; empty for a primary-only tag.
	pub extension: String,
	/// The complete tag: `primary` or `primary-extension`.
	pub full: String,
	/// Preference weight in `[0, 1]`.
	pub quality: f64,
	/// Position within the header, counting surviving entries only.
	pub order: usize,
}

impl Language {
	/// Parses one comma-separated segment of an `Accept-Language` header.
	///
	/// The grammar is `primary ('-' extension)? (';' params)?`; a dangling
	/// `-` or a malformed `q` parameter drops the segment.
	///
	/// # Examples
	///
	/// ```
	/// use negotiator::Language;
	///
	/// let language = Language::parse("zh-CN;q=0.8", 2).unwrap();
	/// assert_eq!(language.primary, "zh");
	/// assert_eq!(language.extension, "CN");
	/// assert_eq!(language.full, "zh-CN");
	/// assert_eq!(language.quality, 0.8);
	///
	/// assert!(Language::parse("en;q=x", 0).is_none());
	/// ```
	pub fn parse(segment: &str, order: usize) -> Option<Self> {
		let s = segment.trim_start();
		let end = s
			.find(|c: char| c.is_whitespace() || c == '-' || c == ';')
			.unwrap_or(s.len());
		if end == 0 {
			return None;
		}
		let (primary, mut rest) = s.split_at(end);

		let mut extension = "";
		if let Some(after) = rest.strip_prefix('-') {
			let end = after
				.find(|c: char| c.is_whitespace() || c == ';')
				.unwrap_or(after.len());
			if end == 0 {
				return None;
			}
			(extension, rest) = after.split_at(end);
		}

		let rest = rest.trim_start();
		let params = if rest.is_empty() {
			None
		} else if let Some(params) = rest.strip_prefix(';') {
			Some(params)
		} else {
			return None;
		};
		let quality = tokenizer::quality(params)?;

		let full = if extension.is_empty() {
			primary.to_string()
		} else {
			format!("{primary}-{extension}")
		};
		Some(Self {
			primary: primary.to_string(),
			extension: extension.to_string(),
			full,
			quality,
			order,
		})
	}

	/// Cross-matching is asymmetric: an `en-US` entry matches a requested
	/// `en` more strongly than an `en` entry matches a requested `en-US`.
	fn specify(&self, candidate: &str, index: usize) -> Option<Specificity> {
		let parsed = Language::parse(candidate, index)?;
		let bits = if self.full.eq_ignore_ascii_case(&parsed.full) {
			4
		} else if self.primary.eq_ignore_ascii_case(&parsed.full) {
			2
		} else if self.full.eq_ignore_ascii_case(&parsed.primary) {
			1
		} else if self.full == "*" {
			0
		} else {
			return None;
		};
		Some(Specificity {
			candidate: index,
			entry: self.order,
			quality: self.quality,
			bits,
		})
	}
}

impl Preference for Language {
	fn quality(&self) -> f64 {
		self.quality
	}

	fn order(&self) -> usize {
		self.order
	}

	fn value(&self) -> String {
		self.full.clone()
	}

	fn specify(&self, candidate: &str, candidate_index: usize) -> Option<Specificity> {
		self.specify(candidate, candidate_index)
	}
}

/// A parsed `Accept-Language` header.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptLanguage {
	pub languages: Vec<Language>,
}

impl AcceptLanguage {
	/// Parses an `Accept-Language` header value.
	///
	/// # Examples
	///
	/// ```
	/// use negotiator::AcceptLanguage;
	///
	/// let accept = AcceptLanguage::parse("zh-CN, en-US;q=0.8, fr;q=0.6");
	/// assert_eq!(accept.languages.len(), 3);
	/// assert_eq!(accept.languages[0].full, "zh-CN");
	/// ```
	pub fn parse(header: &str) -> Self {
		let mut languages = Vec::new();
		for segment in header.split(',') {
			if let Some(language) = Language::parse(segment.trim(), languages.len()) {
				languages.push(language);
			}
		}
		Self { languages }
	}

	/// Returns the acceptable languages in preference order.
	///
	/// # Examples
	///
	/// ```
	/// use negotiator::AcceptLanguage;
	///
	/// let accept = AcceptLanguage::parse("zh;q=0.1, en;q=0.2, fr;q=0.2");
	/// assert_eq!(accept.preferred(&["zh", "en", "fr"]), vec!["en", "fr", "zh"]);
	/// ```
	pub fn preferred(&self, available: &[&str]) -> Vec<String> {
		specificity::preferred(&self.languages, available)
	}
}
