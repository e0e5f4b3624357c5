use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt};

/// NFA state identifier.
pub type State = u32;

/// Set of NFA states, used as a DFA state.
///
/// The states are always sorted and free of duplicates, so two sets are equal
/// if and only if they contain the same states, whatever order they were
/// produced in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Vec<State>", into = "Vec<State>")]
pub struct StateSet(Vec<State>);

impl StateSet {
	/// Creates a new canonical set from the given states.
	pub fn new(states: impl IntoIterator<Item = State>) -> Self {
		let mut states: Vec<_> = states.into_iter().collect();
		states.sort_unstable();
		states.dedup();
		Self(states)
	}

	/// The empty set, aka the dead state.
	pub fn empty() -> Self {
		Self(Vec::new())
	}

	pub fn singleton(q: State) -> Self {
		Self(vec![q])
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn contains(&self, q: State) -> bool {
		self.0.binary_search(&q).is_ok()
	}

	/// Checks if at least one state of this set is in `other`.
	pub fn intersects(&self, other: &BTreeSet<State>) -> bool {
		self.0.iter().any(|q| other.contains(q))
	}

	pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<State>> {
		self.0.iter().copied()
	}

	pub fn as_slice(&self) -> &[State] {
		&self.0
	}
}

impl FromIterator<State> for StateSet {
	fn from_iter<I: IntoIterator<Item = State>>(iter: I) -> Self {
		Self::new(iter)
	}
}

impl From<Vec<State>> for StateSet {
	fn from(states: Vec<State>) -> Self {
		Self::new(states)
	}
}

impl From<StateSet> for Vec<State> {
	fn from(set: StateSet) -> Self {
		set.0
	}
}

impl<'a> IntoIterator for &'a StateSet {
	type Item = State;
	type IntoIter = std::iter::Copied<std::slice::Iter<'a, State>>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl fmt::Display for StateSet {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{{")?;
		for (i, q) in self.0.iter().enumerate() {
			if i > 0 {
				write!(f, ",")?;
			}

			q.fmt(f)?;
		}
		write!(f, "}}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn normalizes_on_creation() {
		let a = StateSet::new([2, 0, 1, 0, 2]);
		let b = StateSet::new([0, 1, 2]);
		assert_eq!(a, b);
		assert_eq!(a.as_slice(), &[0, 1, 2]);
	}

	#[test]
	fn deserialization_normalizes() {
		let set: StateSet = serde_json::from_str("[3, 1, 3, 2]").unwrap();
		assert_eq!(set.as_slice(), &[1, 2, 3]);
		assert_eq!(serde_json::to_string(&set).unwrap(), "[1,2,3]");
	}

	#[test]
	fn membership_and_intersection() {
		let set = StateSet::new([4, 1]);
		assert!(set.contains(1));
		assert!(!set.contains(2));

		let finals: BTreeSet<State> = [2, 4].into_iter().collect();
		assert!(set.intersects(&finals));
		assert!(!StateSet::singleton(2).intersects(&[3].into_iter().collect()));
		assert!(!StateSet::empty().intersects(&finals));
	}

	#[test]
	fn display() {
		assert_eq!(StateSet::new([1, 0]).to_string(), "{0,1}");
		assert_eq!(StateSet::empty().to_string(), "{}");
	}
}
