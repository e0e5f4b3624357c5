use serde_json::Number;
use std::collections::{BTreeMap, BTreeSet};

use crate::{
	alphabet::{Alphabet, DuplicateSymbol},
	state_set::State,
};

/// Non deterministic transitions of a single state.
///
/// A symbol absent from the map means no transition at all, while a symbol
/// mapped to an empty set is an explicit transition to the dead state.
pub type Transitions = BTreeMap<String, BTreeSet<State>>;

/// Malformed automaton description.
///
/// Offending values are kept as written in the input document, which may not
/// even fit a [`State`].
#[derive(Debug, thiserror::Error)]
pub enum NfaError {
	#[error("automaton must have at least one state, found {0}")]
	NoStates(Number),

	#[error("unsupported state count {0}")]
	StateCountOverflow(Number),

	#[error("start state {0} is out of range")]
	StartOutOfRange(Number),

	#[error("transition source state {0} is out of range")]
	SourceOutOfRange(Number),

	#[error("target state {target} of transition ({from}, `{symbol}`) is out of range")]
	TargetOutOfRange {
		from: State,
		symbol: String,
		target: Number,
	},

	#[error("final state {0} is out of range")]
	FinalOutOfRange(Number),

	#[error(transparent)]
	DuplicateSymbol(#[from] DuplicateSymbol),

	#[error("transition on unknown symbol `{0}`")]
	UnknownSymbol(String),

	#[error("duplicate transition ({0}, `{1}`)")]
	DuplicateTransition(State, String),
}

/// Non deterministic finite automaton without epsilon-transitions.
///
/// States are the integers `0..state_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
	state_count: State,
	alphabet: Alphabet,
	transitions: BTreeMap<State, Transitions>,
	initial_state: State,
	final_states: BTreeSet<State>,
}

impl Nfa {
	/// Creates a new automaton without transitions nor final states.
	///
	/// Nothing is checked here, see [`Nfa::validate`].
	pub fn new(state_count: State, alphabet: Alphabet, initial_state: State) -> Self {
		Self {
			state_count,
			alphabet,
			transitions: BTreeMap::new(),
			initial_state,
			final_states: BTreeSet::new(),
		}
	}

	pub fn state_count(&self) -> State {
		self.state_count
	}

	pub fn alphabet(&self) -> &Alphabet {
		&self.alphabet
	}

	pub fn initial_state(&self) -> State {
		self.initial_state
	}

	pub fn final_states(&self) -> &BTreeSet<State> {
		&self.final_states
	}

	pub fn is_final_state(&self, q: State) -> bool {
		self.final_states.contains(&q)
	}

	pub fn add_final_state(&mut self, q: State) -> bool {
		self.final_states.insert(q)
	}

	/// Adds the given targets to the `(source, symbol)` transition.
	///
	/// The transition is declared even if `targets` is empty.
	pub fn add(
		&mut self,
		source: State,
		symbol: impl Into<String>,
		targets: impl IntoIterator<Item = State>,
	) {
		self.transitions
			.entry(source)
			.or_default()
			.entry(symbol.into())
			.or_default()
			.extend(targets)
	}

	/// Returns the targets of the `(q, symbol)` transition, if any.
	pub fn transitions_of(&self, q: State, symbol: &str) -> Option<&BTreeSet<State>> {
		self.transitions.get(&q).and_then(|t| t.get(symbol))
	}

	/// Iterates over all the `(source, symbol, targets)` transitions.
	pub fn transitions(&self) -> impl Iterator<Item = (State, &str, &BTreeSet<State>)> {
		self.transitions.iter().flat_map(|(q, transitions)| {
			transitions
				.iter()
				.map(move |(symbol, targets)| (*q, symbol.as_str(), targets))
		})
	}

	/// Checks that every referenced state is in range and that every
	/// transition symbol belongs to the alphabet.
	pub fn validate(&self) -> Result<(), NfaError> {
		if self.state_count == 0 {
			return Err(NfaError::NoStates(0.into()));
		}

		if !self.in_range(self.initial_state) {
			return Err(NfaError::StartOutOfRange(self.initial_state.into()));
		}

		for (q, symbol, targets) in self.transitions() {
			if !self.in_range(q) {
				return Err(NfaError::SourceOutOfRange(q.into()));
			}

			if !self.alphabet.contains(symbol) {
				return Err(NfaError::UnknownSymbol(symbol.to_owned()));
			}

			if let Some(&target) = targets.iter().find(|&&r| !self.in_range(r)) {
				return Err(NfaError::TargetOutOfRange {
					from: q,
					symbol: symbol.to_owned(),
					target: target.into(),
				});
			}
		}

		if let Some(&q) = self.final_states.iter().find(|&&q| !self.in_range(q)) {
			return Err(NfaError::FinalOutOfRange(q.into()));
		}

		Ok(())
	}

	fn in_range(&self, q: State) -> bool {
		q < self.state_count
	}
}

#[cfg(test)]
impl Nfa {
	/// Reference simulation, used to check language equivalence.
	pub(crate) fn accepts(&self, word: &[&str]) -> bool {
		let mut current: BTreeSet<State> = std::iter::once(self.initial_state).collect();

		for symbol in word {
			current = current
				.iter()
				.filter_map(|&q| self.transitions_of(q, symbol))
				.flatten()
				.copied()
				.collect();
		}

		current.iter().any(|q| self.final_states.contains(q))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn alphabet() -> Alphabet {
		Alphabet::new(["a", "b"]).unwrap()
	}

	#[test]
	fn transitions_lookup() {
		let mut nfa = Nfa::new(2, alphabet(), 0);
		nfa.add(0, "a", [1, 0]);
		nfa.add(0, "a", [1]);
		nfa.add(1, "b", []);

		assert_eq!(nfa.transitions_of(0, "a"), Some(&BTreeSet::from([0, 1])));
		assert_eq!(nfa.transitions_of(1, "b"), Some(&BTreeSet::new()));
		assert_eq!(nfa.transitions_of(1, "a"), None);
		assert_eq!(nfa.transitions().count(), 2);
	}

	#[test]
	fn validate_accepts_well_formed() {
		let mut nfa = Nfa::new(2, alphabet(), 0);
		nfa.add(0, "a", [0, 1]);
		nfa.add_final_state(1);
		assert!(nfa.validate().is_ok());
	}

	#[test]
	fn validate_rejects_out_of_range() {
		let nfa = Nfa::new(2, alphabet(), 2);
		assert!(matches!(nfa.validate(), Err(NfaError::StartOutOfRange(q)) if q == Number::from(2)));

		let mut nfa = Nfa::new(2, alphabet(), 0);
		nfa.add(0, "a", [5]);
		assert!(matches!(
			nfa.validate(),
			Err(NfaError::TargetOutOfRange { from: 0, target, .. }) if target == Number::from(5)
		));

		let mut nfa = Nfa::new(2, alphabet(), 0);
		nfa.add(3, "a", [0]);
		assert!(matches!(nfa.validate(), Err(NfaError::SourceOutOfRange(q)) if q == Number::from(3)));

		let mut nfa = Nfa::new(2, alphabet(), 0);
		nfa.add_final_state(2);
		assert!(matches!(nfa.validate(), Err(NfaError::FinalOutOfRange(q)) if q == Number::from(2)));

		let nfa = Nfa::new(0, alphabet(), 0);
		assert!(matches!(nfa.validate(), Err(NfaError::NoStates(n)) if n == Number::from(0)));
	}

	#[test]
	fn validate_rejects_unknown_symbol() {
		let mut nfa = Nfa::new(1, alphabet(), 0);
		nfa.add(0, "c", [0]);
		assert!(matches!(nfa.validate(), Err(NfaError::UnknownSymbol(s)) if s == "c"));
	}

	#[test]
	fn simulation() {
		let mut nfa = Nfa::new(3, alphabet(), 0);
		nfa.add(0, "a", [0, 1]);
		nfa.add(0, "b", [0]);
		nfa.add(1, "b", [2]);
		nfa.add_final_state(2);

		assert!(nfa.accepts(&["a", "b"]));
		assert!(nfa.accepts(&["b", "a", "a", "b"]));
		assert!(!nfa.accepts(&["b", "a"]));
		assert!(!nfa.accepts(&[]));
	}
}
