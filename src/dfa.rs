use std::{
	collections::{BTreeMap, BTreeSet, HashMap},
	fmt,
};

use indoc::indoc;

use crate::{alphabet::Alphabet, document::DfaDocument, state_set::StateSet, utils::Sanitized};

/// How the state count of a [`DfaDocument`] is computed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateCount {
	/// Counts the states that are the source of at least one transition.
	///
	/// A discovered state without outgoing transitions is not counted.
	#[default]
	TransitionSources,

	/// Counts every discovered state.
	Discovered,
}

/// Deterministic automaton whose states are sets of NFA states.
///
/// States are stored in discovery order, the initial state always being the
/// first one. Transitions are partial: a missing `(state, symbol)` pair means
/// no transition.
#[derive(Debug, Clone)]
pub struct Dfa {
	alphabet: Alphabet,
	states: Vec<StateSet>,
	indexes: HashMap<StateSet, usize>,
	/// `source -> symbol -> target`, using state and symbol indexes.
	transitions: BTreeMap<usize, BTreeMap<usize, usize>>,
	final_states: BTreeSet<usize>,
}

impl Dfa {
	pub(crate) fn new(alphabet: Alphabet, initial_state: StateSet, is_final: bool) -> Self {
		let mut result = Self {
			alphabet,
			states: Vec::new(),
			indexes: HashMap::new(),
			transitions: BTreeMap::new(),
			final_states: BTreeSet::new(),
		};

		result.insert_state(initial_state, is_final);
		result
	}

	/// Inserts the given state if it was not already discovered.
	///
	/// Returns the index of the state and `true` if it is new.
	pub(crate) fn insert_state(&mut self, q: StateSet, is_final: bool) -> (usize, bool) {
		match self.indexes.get(&q) {
			Some(&i) => (i, false),
			None => {
				let i = self.states.len();
				if is_final {
					self.final_states.insert(i);
				}

				self.indexes.insert(q.clone(), i);
				self.states.push(q);
				(i, true)
			}
		}
	}

	/// Records the `(source, symbol) -> target` transition.
	///
	/// An already recorded transition is never overwritten.
	pub(crate) fn add(&mut self, source: usize, symbol: usize, target: usize) {
		self.transitions
			.entry(source)
			.or_default()
			.entry(symbol)
			.or_insert(target);
	}

	pub fn alphabet(&self) -> &Alphabet {
		&self.alphabet
	}

	pub fn initial_state(&self) -> &StateSet {
		&self.states[0]
	}

	/// Discovered states, in discovery order.
	pub fn states(&self) -> &[StateSet] {
		&self.states
	}

	/// Number of discovered states.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	/// Always `false`: the initial state is always discovered.
	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	pub fn contains(&self, q: &StateSet) -> bool {
		self.indexes.contains_key(q)
	}

	pub fn is_final_state(&self, q: &StateSet) -> bool {
		self.indexes
			.get(q)
			.map(|i| self.final_states.contains(i))
			.unwrap_or(false)
	}

	/// Final states, in discovery order.
	pub fn final_states(&self) -> impl '_ + Iterator<Item = &StateSet> {
		self.final_states.iter().map(|&i| &self.states[i])
	}

	/// Returns the target of the `(q, symbol)` transition, if any.
	pub fn successor(&self, q: &StateSet, symbol: &str) -> Option<&StateSet> {
		let source = self.indexes.get(q)?;
		let symbol = self.alphabet.position(symbol)?;
		self.transitions
			.get(source)
			.and_then(|transitions| transitions.get(&symbol))
			.map(|&target| &self.states[target])
	}

	/// Iterates over the `(source, symbol, target)` transitions, in the order
	/// they were recorded.
	pub fn transitions(&self) -> impl '_ + Iterator<Item = (&StateSet, &str, &StateSet)> {
		self.transitions.iter().flat_map(move |(&source, transitions)| {
			transitions.iter().map(move |(&symbol, &target)| {
				(
					&self.states[source],
					self.alphabet[symbol].as_str(),
					&self.states[target],
				)
			})
		})
	}

	/// Number of states that are the source of at least one transition.
	pub fn explored_state_count(&self) -> usize {
		self.transitions.len()
	}

	pub fn state_count(&self, method: StateCount) -> usize {
		match method {
			StateCount::TransitionSources => self.explored_state_count(),
			StateCount::Discovered => self.len(),
		}
	}

	/// Builds the output description of this automaton.
	pub fn to_document(&self, state_count: StateCount) -> DfaDocument {
		DfaDocument {
			dfa_states: self.state_count(state_count),
			dfa_symbols: self.alphabet.to_vec(),
			sigma_function: self
				.transitions()
				.map(|(source, symbol, target)| (source.clone(), symbol.to_owned(), target.clone()))
				.collect(),
			start_state: self.initial_state().clone(),
			final_state: self.final_states().cloned().collect(),
		}
	}

	/// Renders this automaton in the Graphviz DOT language.
	pub fn to_dot(&self) -> String {
		Dot(self).to_string()
	}
}

/// Graphviz DOT rendering of a [`Dfa`].
pub struct Dot<'a>(pub &'a Dfa);

impl<'a> fmt::Display for Dot<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let dfa = self.0;

		f.write_str(indoc! {"
			digraph DFA {
				rankdir=LR;
				start [shape = point];
		"})?;

		for (i, q) in dfa.states.iter().enumerate() {
			let shape = if dfa.final_states.contains(&i) {
				"doublecircle"
			} else {
				"circle"
			};

			writeln!(f, "\tq{i} [shape = {shape}, label = \"{q}\"];")?;
		}

		writeln!(f, "\tstart -> q0;")?;
		for (&source, transitions) in &dfa.transitions {
			for (&symbol, &target) in transitions {
				writeln!(
					f,
					"\tq{source} -> q{target} [label = \"{}\"];",
					Sanitized(dfa.alphabet[symbol].as_str())
				)?;
			}
		}

		writeln!(f, "}}")
	}
}
