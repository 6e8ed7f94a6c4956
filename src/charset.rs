//! `Accept-Charset` parsing and negotiation.

use crate::specificity::{self, Preference, Specificity};
use crate::tokenizer;

/// One charset the client declared acceptable.
#[derive(Debug, Clone, PartialEq)]
pub struct Charset {
	pub name: String,
	/// Preference weight in `[0, 1]`.
	pub quality: f64,
	/// Position within the header, counting surviving entries only.
	pub order: usize,
}

impl Charset {
	/// Parses one comma-separated segment of an `Accept-Charset` header.
	///
	/// Returns `None` when the segment does not reduce to a single token
	/// with optional parameters, or when its `q` parameter is not a number.
	/// Such a segment contributes nothing to negotiation, not even a
	/// zero-weight entry.
	///
	/// # Examples
	///
	/// ```
	/// use negotiator::Charset;
	///
	/// let charset = Charset::parse("iso-8859-1;q=0.8", 1).unwrap();
	/// assert_eq!(charset.name, "iso-8859-1");
	/// assert_eq!(charset.quality, 0.8);
	///
	/// assert!(Charset::parse("utf-16;q=x", 0).is_none());
	/// ```
	pub fn parse(segment: &str, order: usize) -> Option<Self> {
		let (name, params) = tokenizer::token_segment(segment)?;
		let quality = tokenizer::quality(params)?;
		Some(Self {
			name: name.to_string(),
			quality,
			order,
		})
	}

	fn specify(&self, candidate: &str, index: usize) -> Option<Specificity> {
		let bits = if self.name.eq_ignore_ascii_case(candidate) {
			1
		} else if self.name == "*" {
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

impl Preference for Charset {
	fn quality(&self) -> f64 {
		self.quality
	}

	fn order(&self) -> usize {
		self.order
	}

	fn value(&self) -> String {
		self.name.clone()
	}

	fn specify(&self, candidate: &str, candidate_index: usize) -> Option<Specificity> {
		self.specify(candidate, candidate_index)
	}
}

/// A parsed `Accept-Charset` header.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptCharset {
	pub charsets: Vec<Charset>,
}

impl AcceptCharset {
	/// Parses an `Accept-Charset` header value.
	///
	/// Malformed segments are dropped; the surviving entries keep their
	/// relative header order.
	///
	/// # Examples
	///
	/// ```
	/// use negotiator::AcceptCharset;
	///
	/// let accept = AcceptCharset::parse("utf-8, iso-8859-1;q=0.8, utf-7;q=0.2");
	/// assert_eq!(accept.charsets.len(), 3);
	/// assert_eq!(accept.charsets[0].quality, 1.0);
	/// ```
	pub fn parse(header: &str) -> Self {
		let mut charsets = Vec::new();
		for segment in header.split(',') {
			if let Some(charset) = Charset::parse(segment.trim(), charsets.len()) {
				charsets.push(charset);
			}
		}
		Self { charsets }
	}

	/// Returns the acceptable charsets in preference order.
	///
	/// With an empty `available` list this is every declared charset with a
	/// positive quality; otherwise it is the matching candidates, best
	/// first. Candidates that match nothing are left out entirely.
	///
	/// # Examples
	///
	/// ```
	/// use negotiator::AcceptCharset;
	///
	/// let accept = AcceptCharset::parse("utf-8;q=0.1, utf-7;q=0.2");
	/// assert_eq!(accept.preferred(&["utf-8", "utf-7"]), vec!["utf-7", "utf-8"]);
	/// assert_eq!(accept.preferred(&["koi8-r"]), Vec::<String>::new());
	/// ```
	pub fn preferred(&self, available: &[&str]) -> Vec<String> {
		specificity::preferred(&self.charsets, available)
	}
}
