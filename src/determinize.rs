//! Subset construction.
use log::{debug, trace, warn};
use std::collections::{BTreeSet, VecDeque};

use crate::{dfa::Dfa, nfa::Nfa, state_set::StateSet};

impl Nfa {
	/// Computes the target of `states` on `symbol` in the subset automaton.
	///
	/// Returns `None` if no state of `states` has a transition on `symbol`.
	/// Otherwise returns the union of all the transition targets, which may be
	/// empty if every transition found explicitly leads nowhere.
	pub fn successor_set(&self, states: &StateSet, symbol: &str) -> Option<StateSet> {
		let mut defined = false;
		let mut targets = BTreeSet::new();

		for q in states {
			if let Some(qs) = self.transitions_of(q, symbol) {
				defined = true;
				targets.extend(qs.iter().copied());
			}
		}

		defined.then(|| StateSet::new(targets))
	}

	/// Builds the deterministic automaton of the reachable sets of states,
	/// starting from the singleton initial state.
	///
	/// Each discovered state is explored exactly once, in discovery order.
	pub fn determinize(&self) -> Dfa {
		let alphabet = self.alphabet();
		if alphabet.is_empty() {
			warn!("empty alphabet, the automaton will have no transitions");
		}

		let initial_state = StateSet::singleton(self.initial_state());
		let is_final = initial_state.intersects(self.final_states());
		let mut dfa = Dfa::new(alphabet.clone(), initial_state, is_final);

		let mut working = VecDeque::new();
		working.push_back(0);

		while let Some(source) = working.pop_front() {
			let det_q = dfa.states()[source].clone();
			trace!("exploring state {source}: {det_q}");

			for (a, symbol) in alphabet.iter().enumerate() {
				let Some(next_det_q) = self.successor_set(&det_q, symbol) else {
					continue;
				};

				let is_final = next_det_q.intersects(self.final_states());
				let (target, is_new) = dfa.insert_state(next_det_q, is_final);
				if is_new {
					trace!("new state {target}: {}", dfa.states()[target]);
					working.push_back(target)
				}

				trace!("{det_q} -{symbol}-> {}", dfa.states()[target]);
				dfa.add(source, a, target);
			}
		}

		debug!(
			"determinized {} NFA states into {} DFA states ({} with outgoing transitions)",
			self.state_count(),
			dfa.len(),
			dfa.explored_state_count()
		);

		dfa
	}
}
