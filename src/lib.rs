//! This library converts non-deterministic finite automata (NFA) into
//! equivalent deterministic finite automata (DFA) using the subset
//! construction, also known as the powerset construction.
//!
//! Each state of the resulting DFA is a set of NFA states. Only the sets
//! reachable from the initial state are built, and the transition function of
//! the DFA is kept partial: if no NFA state of a set has a transition on a
//! symbol, the DFA has no transition either (no dead state is added).
//!
//! # Basic Usage
//!
//! ```
//! use subset_dfa::{Alphabet, Nfa, StateSet};
//!
//! let mut nfa = Nfa::new(2, Alphabet::new(["a", "b"]).unwrap(), 0);
//! nfa.add(0, "a", [0, 1]);
//! nfa.add(0, "b", [1]);
//! nfa.add(1, "b", [0, 1]);
//! nfa.add_final_state(1);
//!
//! let dfa = nfa.determinize();
//! assert_eq!(dfa.len(), 3);
//! assert_eq!(
//!   dfa.successor(&StateSet::singleton(0), "a"),
//!   Some(&StateSet::new([0, 1]))
//! );
//! assert_eq!(dfa.successor(&StateSet::singleton(1), "a"), None);
//! ```
//!
//! # Documents
//!
//! Automata can also be read from and written to JSON documents, the format
//! used by the `nfa2dfa` command line tool. See the [`document`] module.
//!
//! ```
//! use subset_dfa::{convert, NfaDocument, StateCount};
//!
//! let input = NfaDocument::from_reader(&br#"{
//!   "nfa_states": 3,
//!   "nfa_symbols": ["a", "b"],
//!   "sigma_function": [[0, "a", [0, 1]], [0, "b", [0]], [1, "b", [2]]],
//!   "start_state": 0,
//!   "final_state": [2]
//! }"#[..]).unwrap();
//!
//! let output = convert(&input, StateCount::TransitionSources).unwrap();
//! assert_eq!(output.dfa_states, 3);
//! assert_eq!(output.final_state.len(), 1);
//! ```
//!
//! # Caching
//!
//! Determinizing may be expensive: in the worst case the DFA has `2^n` states
//! for an NFA with `n` states. [`convert_file`] stores its output on disk in
//! CBOR, along with the SHA-256 digest of the input document, and reuses it
//! until the input changes.
use log::warn;
use std::path::PathBuf;

pub mod alphabet;
pub mod cache;
mod determinize;
pub mod dfa;
pub mod document;
pub mod nfa;
pub mod options;
pub mod state_set;
mod utils;

pub use alphabet::Alphabet;
pub use dfa::{Dfa, StateCount};
pub use document::{DfaDocument, DocumentError, NfaDocument};
pub use nfa::{Nfa, NfaError};
pub use options::{Options, OptionsError};
pub use state_set::{State, StateSet};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unable to read `{}`: {1}", .0.display())]
	Input(PathBuf, DocumentError),

	#[error("unable to write `{}`: {1}", .0.display())]
	Output(PathBuf, DocumentError),

	#[error("unable to write `{}`: {1}", .0.display())]
	Dot(PathBuf, std::io::Error),

	#[error("malformed input: {0}")]
	MalformedInput(#[from] NfaError),
}

/// Converts the given NFA description into the description of its subset
/// automaton.
pub fn convert(input: &NfaDocument, state_count: StateCount) -> Result<DfaDocument, NfaError> {
	let nfa = input.to_nfa()?;
	Ok(nfa.determinize().to_document(state_count))
}

/// Reads the NFA description at `options.input` and writes the converted
/// description at `options.output`.
///
/// When a Graphviz rendering is requested, the conversion always runs since
/// the cache only holds the output description.
pub fn convert_file(options: &Options) -> Result<DfaDocument, Error> {
	let input = std::fs::read(&options.input)
		.map_err(|e| Error::Input(options.input.clone(), e.into()))?;
	let hash = cache::hash(&input, options.state_count);

	let cached = match &options.cache_path {
		Some(path) if options.dot.is_none() => match cache::load_from_file(path, &hash) {
			Ok(cached) => cached,
			Err(e) => {
				warn!("could not load cached automaton: {e}");
				None
			}
		},
		_ => None,
	};

	let output = match cached {
		Some(output) => output,
		None => {
			let document = NfaDocument::from_reader(&input[..])
				.map_err(|e| Error::Input(options.input.clone(), e))?;
			let dfa = document.to_nfa()?.determinize();

			if let Some(path) = &options.dot {
				std::fs::write(path, dfa.to_dot()).map_err(|e| Error::Dot(path.clone(), e))?;
			}

			let output = dfa.to_document(options.state_count);
			if let Some(path) = &options.cache_path {
				if let Err(e) = cache::save_to_file(path, hash, &output) {
					warn!("unable to cache automaton: {e}")
				}
			}

			output
		}
	};

	output
		.save_to_file(&options.output)
		.map_err(|e| Error::Output(options.output.clone(), e))?;

	Ok(output)
}
