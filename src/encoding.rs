//! `Accept-Encoding` parsing and negotiation.

use crate::specificity::{self, Preference, Specificity};
use crate::tokenizer;

/// One content coding the client declared acceptable.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoding {
	pub name: String,
	/// Preference weight in `[0, 1]`.
	pub quality: f64,
	/// Position within the header, counting surviving entries only.
	pub order: usize,
}

impl Encoding {
	/// Parses one comma-separated segment of an `Accept-Encoding` header.
	///
	/// # Examples
	///
	/// ```
	/// use negotiator::Encoding;
	///
	/// let encoding = Encoding::parse("compress;q=0.2", 1).unwrap();
	/// assert_eq!(encoding.name, "compress");
	/// assert_eq!(encoding.quality, 0.2);
	///
	/// assert!(Encoding::parse("gzip;q=x", 0).is_none());
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

impl Preference for Encoding {
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

/// A parsed `Accept-Encoding` header.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptEncoding {
	pub encodings: Vec<Encoding>,
}

impl AcceptEncoding {
	/// Parses an `Accept-Encoding` header value.
	///
	/// `identity` is always acceptable unless the header excludes it: when
	/// no surviving entry would match `identity` (a `*` entry counts), a
	/// synthetic `identity` entry is appended with the lowest quality seen
	/// in the header, capped at `1.0`. An empty header therefore still
	/// accepts `identity` at quality `1.0`.
	///
	/// # Examples
	///
	/// ```
	/// use negotiator::AcceptEncoding;
	///
	/// let accept = AcceptEncoding::parse("gzip");
	/// assert_eq!(accept.encodings.len(), 2);
	/// assert_eq!(accept.encodings[1].name, "identity");
	///
	/// let excluded = AcceptEncoding::parse("gzip, identity;q=0");
	/// assert_eq!(excluded.encodings.len(), 2);
	/// ```
	pub fn parse(header: &str) -> Self {
		let mut encodings: Vec<Encoding> = Vec::new();
		let mut has_identity = false;
		let mut min_quality = 1.0f64;
		for segment in header.split(',') {
			let Some(encoding) = Encoding::parse(segment.trim(), encodings.len()) else {
				continue;
			};
			has_identity = has_identity || encoding.specify("identity", 0).is_some();
			min_quality = min_quality.min(encoding.quality);
			encodings.push(encoding);
		}
		if !has_identity {
			encodings.push(Encoding {
				name: "identity".to_string(),
				quality: min_quality,
				order: encodings.len(),
			});
		}
		Self { encodings }
	}

	/// Returns the acceptable encodings in preference order.
	///
	/// # Examples
	///
	/// ```
	/// use negotiator::AcceptEncoding;
	///
	/// let accept = AcceptEncoding::parse("");
	/// assert_eq!(
	///     accept.preferred(&["gzip", "compress", "identity"]),
	///     vec!["identity"],
	/// );
	/// ```
	pub fn preferred(&self, available: &[&str]) -> Vec<String> {
		specificity::preferred(&self.encodings, available)
	}
}
