//! `Accept` parsing and media type negotiation.
//!
//! The only dimension with quoted parameter values, so both segment and
//! parameter splitting go through the quote-aware tokenizer here.

use std::collections::HashMap;

use crate::specificity::{self, Preference, Specificity};
use crate::tokenizer;

/// One media range the client declared acceptable.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaType {
	/// The type before the `/`, possibly `*`.
	pub main_type: String,
	/// The subtype after the `/`, possibly `*`.
	pub subtype: String,
	/// Non-`q` parameters with lowercased keys. When non-empty they act as
	/// match constraints: a candidate only matches if every one of them
	/// holds against the candidate's own parameters.
	pub params: HashMap<String, String>,
	/// Preference weight in `[0, 1]`.
	pub quality: f64,
	/// Position within the header, counting surviving entries only.
	pub order: usize,
}

impl MediaType {
	/// Parses one media range segment, `type '/' subtype (';' params)?`.
	///
	/// A quoted parameter value loses exactly its surrounding quotes; for a
	/// lone `"` that leaves the empty string. Parameters after the `q`
	/// parameter are ignored, parameters before it are retained as match
	/// constraints.
	///
	/// # Examples
	///
	/// ```
	/// use negotiator::MediaType;
	///
	/// let range = MediaType::parse("text/*;level=\"1\";q=0.8", 0).unwrap();
	/// assert_eq!(range.main_type, "text");
	/// assert_eq!(range.subtype, "*");
	/// assert_eq!(range.params["level"], "1");
	/// assert_eq!(range.quality, 0.8);
	///
	/// assert!(MediaType::parse("text", 0).is_none());
	/// assert!(MediaType::parse("text/html;q=x", 0).is_none());
	/// ```
	pub fn parse(segment: &str, order: usize) -> Option<Self> {
		let s = segment.trim_start();
		let end = s
			.find(|c: char| c.is_whitespace() || c == '/' || c == ';')
			.unwrap_or(s.len());
		if end == 0 {
			return None;
		}
		let (main_type, rest) = s.split_at(end);
		let rest = rest.strip_prefix('/')?;

		let end = rest
			.find(|c: char| c.is_whitespace() || c == ';')
			.unwrap_or(rest.len());
		if end == 0 {
			return None;
		}
		let (subtype, rest) = rest.split_at(end);

		let rest = rest.trim_start();
		let raw_params = if rest.is_empty() {
			None
		} else if let Some(params) = rest.strip_prefix(';') {
			Some(params)
		} else {
			return None;
		};

		let mut params = HashMap::new();
		let mut quality = 1.0;
		if let Some(raw) = raw_params.filter(|p| !p.is_empty()) {
			for piece in tokenizer::split_unquoted(raw, ';') {
				let (key, value) = split_key_value(piece.trim());
				let key = key.to_ascii_lowercase();
				let value = strip_quotes(value);
				if key == "q" {
					quality = value.parse::<f64>().ok()?.clamp(0.0, 1.0);
					break;
				}
				params.insert(key, value.to_string());
			}
		}

		Some(Self {
			main_type: main_type.to_string(),
			subtype: subtype.to_string(),
			params,
			quality,
			order,
		})
	}

	fn specify(&self, candidate: &str, index: usize) -> Option<Specificity> {
		let parsed = MediaType::parse(candidate, index)?;

		let mut bits = 0;
		if self.main_type.eq_ignore_ascii_case(&parsed.main_type) {
			bits |= 4;
		} else if self.main_type != "*" {
			return None;
		}
		if self.subtype.eq_ignore_ascii_case(&parsed.subtype) {
			bits |= 2;
		} else if self.subtype != "*" {
			return None;
		}
		if !self.params.is_empty() {
			// A key the candidate lacks is compared against the empty string.
			let all_match = self.params.iter().all(|(key, value)| {
				value.as_str() == "*"
					|| value.eq_ignore_ascii_case(
						parsed.params.get(key).map_or("", String::as_str),
					)
			});
			if !all_match {
				return None;
			}
			bits |= 1;
		}

		Some(Specificity {
			candidate: index,
			entry: self.order,
			quality: self.quality,
			bits,
		})
	}
}

impl Preference for MediaType {
	fn quality(&self) -> f64 {
		self.quality
	}

	fn order(&self) -> usize {
		self.order
	}

	fn value(&self) -> String {
		format!("{}/{}", self.main_type, self.subtype)
	}

	fn specify(&self, candidate: &str, candidate_index: usize) -> Option<Specificity> {
		self.specify(candidate, candidate_index)
	}
}

/// A parsed `Accept` header.
#[derive(Debug, Clone, PartialEq)]
pub struct Accept {
	pub media_types: Vec<MediaType>,
}

impl Accept {
	/// Parses an `Accept` header value.
	///
	/// Splitting is quote-aware: a comma inside a quoted parameter value
	/// does not start a new media range.
	///
	/// # Examples
	///
	/// ```
	/// use negotiator::Accept;
	///
	/// let accept = Accept::parse("text/html, application/*;q=0.2, image/jpeg;q=0.8");
	/// assert_eq!(accept.media_types.len(), 3);
	/// assert_eq!(accept.media_types[1].main_type, "application");
	/// ```
	pub fn parse(header: &str) -> Self {
		let mut media_types = Vec::new();
		for segment in tokenizer::split_unquoted(header, ',') {
			if let Some(media_type) = MediaType::parse(segment.trim(), media_types.len()) {
				media_types.push(media_type);
			}
		}
		Self { media_types }
	}

	/// Returns the acceptable media types in preference order.
	///
	/// In no-candidate mode the entries project to `type/subtype` without
	/// their parameters.
	///
	/// # Examples
	///
	/// ```
	/// use negotiator::Accept;
	///
	/// let accept = Accept::parse("text/*, image/*;q=0.8, application/*;q=0.2");
	/// assert_eq!(
	///     accept.preferred(&["text/plain", "application/json"]),
	///     vec!["text/plain", "application/json"],
	/// );
	/// ```
	pub fn preferred(&self, available: &[&str]) -> Vec<String> {
		specificity::preferred(&self.media_types, available)
	}
}

/// Splits at the first `=`; a missing value is the empty string.
fn split_key_value(piece: &str) -> (&str, &str) {
	match piece.split_once('=') {
		Some((key, value)) => (key, value),
		None => (piece, ""),
	}
}

/// Strips the surrounding quotes from a parameter value, guarding against
/// walking past the start of a lone `"`.
fn strip_quotes(value: &str) -> &str {
	let bytes = value.as_bytes();
	if !bytes.is_empty() && bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"' {
		&value[1..(value.len() - 1).max(1)]
	} else {
		value
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	fn media_type(
		main_type: &str,
		subtype: &str,
		params: &[(&str, &str)],
		quality: f64,
		order: usize,
	) -> MediaType {
		MediaType {
			main_type: main_type.to_string(),
			subtype: subtype.to_string(),
			params: params
				.iter()
				.map(|(k, v)| (k.to_string(), v.to_string()))
				.collect(),
			quality,
			order,
		}
	}

	#[rstest]
	#[case("text/html", 0, Some(media_type("text", "html", &[], 1.0, 0)))]
	#[case("text/html;q=0.8", 1, Some(media_type("text", "html", &[], 0.8, 1)))]
	#[case("text/*", 2, Some(media_type("text", "*", &[], 1.0, 2)))]
	#[case("text/*;q=.8", 3, Some(media_type("text", "*", &[], 0.8, 3)))]
	#[case("*/*;q=0.8", 4, Some(media_type("*", "*", &[], 0.8, 4)))]
	#[case("text/*;p=0.8", 5, Some(media_type("text", "*", &[("p", "0.8")], 1.0, 5)))]
	#[case("text/*;p=\"", 6, Some(media_type("text", "*", &[("p", "")], 1.0, 6)))]
	#[case("text/*;p=\"0.8", 7, Some(media_type("text", "*", &[("p", "\"0.8")], 1.0, 7)))]
	#[case("text/*;p=\"0.8\"", 8, Some(media_type("text", "*", &[("p", "0.8")], 1.0, 8)))]
	#[case("text/*;q=\"0.8\"", 9, Some(media_type("text", "*", &[], 0.8, 9)))]
	#[case("text/html ; q=0.8", 10, Some(media_type("text", "html", &[], 0.8, 10)))]
	#[case("text/*;P=1;q=0.5;ignored=x", 11, Some(media_type("text", "*", &[("p", "1")], 0.5, 11)))]
	#[case("text/html;q=x", 12, None)]
	#[case("text", 13, None)]
	#[case("", 14, None)]
	fn test_parse(#[case] segment: &str, #[case] order: usize, #[case] expected: Option<MediaType>) {
		assert_eq!(MediaType::parse(segment, order), expected);
	}

	#[test]
	fn test_parse_header_keeps_order() {
		let accept = Accept::parse("text/html, application/*;q=0.2, image/jpeg;q=0.8");
		assert_eq!(
			accept.media_types,
			vec![
				media_type("text", "html", &[], 1.0, 0),
				media_type("application", "*", &[], 0.2, 1),
				media_type("image", "jpeg", &[], 0.8, 2),
			]
		);
	}

	#[test]
	fn test_parse_header_fully_quoted_value_yields_nothing() {
		let accept = Accept::parse("\"text/html, application/*;q=0.2, image/jpeg;q=0.8\"");
		assert_eq!(accept.media_types, Vec::new());
	}

	#[test]
	fn test_parse_header_quoted_comma_does_not_split() {
		let accept = Accept::parse("text/html;note=\"a,b\", text/plain");
		assert_eq!(
			accept.media_types,
			vec![
				media_type("text", "html", &[("note", "a,b")], 1.0, 0),
				media_type("text", "plain", &[], 1.0, 1),
			]
		);
	}

	#[rstest]
	#[case("text/html", media_type("text", "html", &[], 1.0, 0), 0, Some((0, 1.0, 6)))]
	#[case("text/*", media_type("text", "*", &[], 1.0, 2), 2, Some((2, 1.0, 6)))]
	#[case("text/html;p=0.8", media_type("text", "html", &[], 0.8, 4), 4, Some((4, 0.8, 6)))]
	#[case("TEXT/HTML", media_type("text", "html", &[], 0.8, 5), 5, Some((5, 0.8, 6)))]
	#[case("text/html", media_type("text", "*", &[], 1.0, 8), 8, Some((8, 1.0, 4)))]
	#[case("text/*", media_type("text", "html", &[], 1.0, 9), 9, None)]
	#[case("text/*", media_type("image", "*", &[], 1.0, 10), 10, None)]
	#[case("text/*", media_type("*", "*", &[], 1.0, 11), 11, Some((11, 1.0, 2)))]
	#[case("", media_type("*", "*", &[], 1.0, 12), 12, None)]
	#[case("text/html", media_type("*", "*", &[("foo", "bar")], 1.0, 13), 13, None)]
	#[case("text/html", media_type("*", "*", &[("foo", "*")], 1.0, 14), 14, Some((14, 1.0, 1)))]
	#[case(
		"text/html;foo=BAR",
		media_type("*", "*", &[("foo", "bar")], 1.0, 15),
		15,
		Some((15, 1.0, 1)),
	)]
	#[case(
		"text/html;level=1",
		media_type("text", "html", &[("level", "1")], 1.0, 16),
		16,
		Some((16, 1.0, 7)),
	)]
	fn test_specify(
		#[case] candidate: &str,
		#[case] entry: MediaType,
		#[case] index: usize,
		#[case] expected: Option<(usize, f64, u8)>,
	) {
		let got = entry.specify(candidate, index);
		let expected = expected.map(|(entry_order, quality, bits)| Specificity {
			candidate: index,
			entry: entry_order,
			quality,
			bits,
		});
		assert_eq!(got, expected);
	}

	#[test]
	fn test_priority_prefers_exact_entry() {
		let entries = vec![
			media_type("text", "html", &[], 1.0, 0),
			media_type("text", "*", &[], 0.8, 1),
		];
		assert_eq!(
			specificity::priority(&entries, "text/html", 1),
			Some(Specificity {
				candidate: 1,
				entry: 1,
				quality: 0.8,
				bits: 4,
			})
		);
		assert_eq!(
			specificity::priority(&entries, "text/*", 2),
			Some(Specificity {
				candidate: 2,
				entry: 1,
				quality: 0.8,
				bits: 6,
			})
		);
		assert_eq!(
			specificity::priority(&entries, "text/plain", 3),
			Some(Specificity {
				candidate: 3,
				entry: 1,
				quality: 0.8,
				bits: 4,
			})
		);
		assert_eq!(specificity::priority(&entries, "image/png", 4), None);
		assert_eq!(specificity::priority(&entries, "*/*", 6), None);
	}

	#[rstest]
	#[case("\"", "")]
	#[case("\"\"", "")]
	#[case("\"0.8\"", "0.8")]
	#[case("\"0.8", "\"0.8")]
	#[case("0.8", "0.8")]
	fn test_strip_quotes(#[case] value: &str, #[case] expected: &str) {
		assert_eq!(strip_quotes(value), expected);
	}

	#[rstest]
	#[case("foo", ("foo", ""))]
	#[case("foo=bar", ("foo", "bar"))]
	#[case("foo=bar=baz", ("foo", "bar=baz"))]
	fn test_split_key_value(#[case] piece: &str, #[case] expected: (&str, &str)) {
		assert_eq!(split_key_value(piece), expected);
	}
}
