//! Specificity scoring and the selection pipeline shared by all four
//! negotiation dimensions.

use std::cmp::Ordering;

/// How specifically one candidate value matched one preference entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Specificity {
	/// Index of the candidate that produced this score.
	pub candidate: usize,
	/// Order of the preference entry that matched.
	pub entry: usize,
	/// Quality weight of the matched entry.
	pub quality: f64,
	/// Exactness bitmask; the bit values are dimension-specific, but higher
	/// always means a more exact match.
	pub bits: u8,
}

/// One parsed preference entry, as seen by the selection pipeline.
///
/// The dimensions differ only in their entry grammar and scoring rule;
/// priority resolution, filtering, sorting and projection are identical and
/// live here.
pub(crate) trait Preference {
	fn quality(&self) -> f64;
	fn order(&self) -> usize;
	/// The entry's own value string, used when no candidate list is given.
	fn value(&self) -> String;
	/// Scores `candidate` against this entry; `None` means incompatible.
	fn specify(&self, candidate: &str, candidate_index: usize) -> Option<Specificity>;
}

/// Resolves the priority of a single candidate against every parsed entry.
///
/// The incumbent score is replaced whenever the challenger beats it on
/// *any* of bits, quality, or entry order; this is not a lexicographic
/// comparison. A later entry can displace an earlier one on entry order
/// alone, and the observable ordering depends on that.
pub(crate) fn priority<P: Preference>(
	entries: &[P],
	candidate: &str,
	index: usize,
) -> Option<Specificity> {
	let mut best: Option<Specificity> = None;
	for entry in entries {
		let Some(spec) = entry.specify(candidate, index) else {
			continue;
		};
		let replace = match best {
			None => true,
			Some(incumbent) => {
				incumbent.bits < spec.bits
					|| incumbent.quality < spec.quality
					|| incumbent.entry < spec.entry
			}
		};
		if replace {
			best = Some(spec);
		}
	}
	best
}

/// Candidate-mode sort key: quality descending, then specificity bits
/// ascending, then matched entry order, then candidate order.
///
/// At equal quality the more *generic* match ranks first; among equally
/// specific matches the client's declared ordering decides.
fn compare(a: &Specificity, b: &Specificity) -> Ordering {
	b.quality
		.total_cmp(&a.quality)
		.then(a.bits.cmp(&b.bits))
		.then(a.entry.cmp(&b.entry))
		.then(a.candidate.cmp(&b.candidate))
}

/// Runs the selection pipeline.
///
/// With an empty `available` list, returns every entry with a positive
/// quality, ordered by quality descending and header order ascending,
/// projected to the entries' own values. Otherwise scores each candidate,
/// drops the ones that resolve to no match or a non-positive quality, and
/// returns the survivors' own strings in priority order.
pub(crate) fn preferred<P: Preference>(entries: &[P], available: &[&str]) -> Vec<String> {
	if available.is_empty() {
		let mut accepted: Vec<&P> = entries.iter().filter(|e| e.quality() > 0.0).collect();
		accepted.sort_by(|a, b| {
			b.quality()
				.total_cmp(&a.quality())
				.then(a.order().cmp(&b.order()))
		});
		return accepted.into_iter().map(|e| e.value()).collect();
	}

	let mut priorities: Vec<Specificity> = available
		.iter()
		.enumerate()
		.filter_map(|(index, &candidate)| priority(entries, candidate, index))
		.filter(|spec| spec.quality > 0.0)
		.collect();
	priorities.sort_by(compare);
	priorities
		.into_iter()
		.map(|spec| available[spec.candidate].to_string())
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn spec(candidate: usize, entry: usize, quality: f64, bits: u8) -> Specificity {
		Specificity {
			candidate,
			entry,
			quality,
			bits,
		}
	}

	#[test]
	fn test_compare_quality_dominates() {
		let high = spec(1, 1, 0.9, 0);
		let low = spec(0, 0, 0.5, 4);
		assert_eq!(compare(&high, &low), Ordering::Less);
	}

	#[test]
	fn test_compare_generic_match_wins_quality_tie() {
		let generic = spec(1, 1, 0.5, 0);
		let exact = spec(0, 0, 0.5, 4);
		assert_eq!(compare(&generic, &exact), Ordering::Less);
	}

	#[test]
	fn test_compare_entry_order_breaks_remaining_tie() {
		let first = spec(1, 0, 0.5, 1);
		let second = spec(0, 2, 0.5, 1);
		assert_eq!(compare(&first, &second), Ordering::Less);
	}

	#[test]
	fn test_compare_falls_back_to_candidate_order() {
		let first = spec(0, 1, 0.5, 1);
		let second = spec(3, 1, 0.5, 1);
		assert_eq!(compare(&first, &second), Ordering::Less);
	}
}
