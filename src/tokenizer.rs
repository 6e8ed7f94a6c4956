//! Lexical helpers shared by the header parsers.

/// Splits `s` on `delim`, leaving delimiters inside a quoted string intact.
///
/// A delimiter splits only when the number of `"` characters seen so far is
/// even. An unterminated quoted region never closes, so everything from its
/// opening quote to the end of the input stays one piece, quotes and
/// delimiters included. Pieces are subslices of `s` and are not trimmed.
pub(crate) fn split_unquoted(s: &str, delim: char) -> Vec<&str> {
	let mut pieces = Vec::new();
	let mut start = 0;
	let mut in_quotes = false;
	for (i, c) in s.char_indices() {
		if c == '"' {
			in_quotes = !in_quotes;
		} else if c == delim && !in_quotes {
			pieces.push(&s[start..i]);
			start = i + delim.len_utf8();
		}
	}
	pieces.push(&s[start..]);
	pieces
}

/// Splits one header segment into its leading token and the raw parameter
/// list after the first `;`, if any.
///
/// The token is a non-empty run of characters other than whitespace and
/// `;`. Whitespace may surround the token; anything else between the token
/// and the `;` makes the segment unparseable.
pub(crate) fn token_segment(segment: &str) -> Option<(&str, Option<&str>)> {
	let s = segment.trim_start();
	let end = s
		.find(|c: char| c.is_whitespace() || c == ';')
		.unwrap_or(s.len());
	if end == 0 {
		return None;
	}
	let (token, rest) = s.split_at(end);
	let rest = rest.trim_start();
	if rest.is_empty() {
		Some((token, None))
	} else {
		rest.strip_prefix(';').map(|params| (token, Some(params)))
	}
}

/// Scans a raw parameter list for the `q` parameter and returns the quality
/// weight clamped to `[0, 1]`, defaulting to `1.0` when no `q` parameter is
/// present.
///
/// Only the piece between the first and second `=` counts as the value. A
/// `q` whose value is missing or not a number poisons the whole segment:
/// the caller drops it entirely rather than defaulting the weight.
pub(crate) fn quality(params: Option<&str>) -> Option<f64> {
	let Some(params) = params else {
		return Some(1.0);
	};
	for param in params.split(';') {
		let mut parts = param.trim().split('=');
		if parts.next() == Some("q") {
			let q: f64 = parts.next()?.parse().ok()?;
			return Some(q.clamp(0.0, 1.0));
		}
	}
	Some(1.0)
}
