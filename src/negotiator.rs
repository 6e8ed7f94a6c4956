//! Header-bound negotiation facade.

use http::HeaderMap;
use http::header::{ACCEPT, ACCEPT_CHARSET, ACCEPT_ENCODING, ACCEPT_LANGUAGE, HeaderName};

use crate::charset::AcceptCharset;
use crate::encoding::AcceptEncoding;
use crate::language::AcceptLanguage;
use crate::media_type::Accept;

/// Negotiates representations against one request's preference headers.
///
/// Borrows the header map and holds no other state, so a single value can
/// serve any number of unrelated calls with different candidate lists.
/// Header lookup is case-insensitive; repeated header instances are joined
/// with `,` before parsing. An absent header falls back to the dimension's
/// wildcard (`*`, or `*/*` for media types), which accepts every candidate
/// at quality `1.0` in the order the caller listed them.
///
/// # Examples
///
/// ```
/// use http::{HeaderMap, header};
/// use negotiator::Negotiator;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(
///     header::ACCEPT_LANGUAGE,
///     "zh;q=0.1, en;q=0.2, fr;q=0.2".parse().unwrap(),
/// );
///
/// let negotiator = Negotiator::new(&headers);
/// assert_eq!(
///     negotiator.languages(&["zh", "en", "fr"]),
///     vec!["en", "fr", "zh"],
/// );
/// assert_eq!(negotiator.language(&["zh", "en", "fr"]), Some("en".to_string()));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Negotiator<'a> {
	headers: &'a HeaderMap,
}

impl<'a> Negotiator<'a> {
	pub fn new(headers: &'a HeaderMap) -> Self {
		Self { headers }
	}

	/// Most preferred charset among `available`, if any is acceptable.
	pub fn charset(&self, available: &[&str]) -> Option<String> {
		self.charsets(available).into_iter().next()
	}

	/// Acceptable charsets ordered by preference. With an empty `available`
	/// list, the charsets the header itself declares.
	pub fn charsets(&self, available: &[&str]) -> Vec<String> {
		// RFC 2616 sec 14.2: no header means *
		AcceptCharset::parse(&self.header_value(ACCEPT_CHARSET, "*")).preferred(available)
	}

	/// Most preferred content coding among `available`, if any is acceptable.
	pub fn encoding(&self, available: &[&str]) -> Option<String> {
		self.encodings(available).into_iter().next()
	}

	/// Acceptable content codings ordered by preference.
	pub fn encodings(&self, available: &[&str]) -> Vec<String> {
		// RFC 2616 sec 14.2: no header means *
		AcceptEncoding::parse(&self.header_value(ACCEPT_ENCODING, "*")).preferred(available)
	}

	/// Most preferred language among `available`, if any is acceptable.
	pub fn language(&self, available: &[&str]) -> Option<String> {
		self.languages(available).into_iter().next()
	}

	/// Acceptable languages ordered by preference.
	pub fn languages(&self, available: &[&str]) -> Vec<String> {
		// RFC 2616 sec 14.2: no header means *
		AcceptLanguage::parse(&self.header_value(ACCEPT_LANGUAGE, "*")).preferred(available)
	}

	/// Most preferred media type among `available`, if any is acceptable.
	pub fn media_type(&self, available: &[&str]) -> Option<String> {
		self.media_types(available).into_iter().next()
	}

	/// Acceptable media types ordered by preference.
	pub fn media_types(&self, available: &[&str]) -> Vec<String> {
		// RFC 2616 sec 14.2: no header means */*
		Accept::parse(&self.header_value(ACCEPT, "*/*")).preferred(available)
	}

	fn header_value(&self, name: HeaderName, default: &str) -> String {
		let values: Vec<&str> = self
			.headers
			.get_all(&name)
			.iter()
			.filter_map(|value| value.to_str().ok())
			.collect();
		if values.is_empty() {
			tracing::trace!("no {} header, assuming {:?}", name, default);
			return default.to_string();
		}
		values.join(",")
	}
}
