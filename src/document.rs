//! Documents exchanged with the outside world.
//!
//! Automata are described by JSON objects, the input one describing a
//! non-deterministic automaton:
//!
//! ```json
//! {
//!   "nfa_states": 2,
//!   "nfa_symbols": ["a", "b"],
//!   "sigma_function": [[0, "a", [0, 1]], [0, "b", [1]], [1, "b", [0, 1]]],
//!   "start_state": 0,
//!   "final_state": [1]
//! }
//! ```
//!
//! and the output one its determinized counterpart, whose states are sets of
//! the input states.
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::{io, path::Path};

use crate::{
	alphabet::Alphabet,
	nfa::{Nfa, NfaError},
	state_set::{State, StateSet},
};

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
	#[error(transparent)]
	IO(#[from] io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

/// Input document.
///
/// Integers are kept as they are written so that invalid values, including
/// negative, fractional or oversized ones, are reported by
/// [`NfaDocument::to_nfa`] instead of failing the parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NfaDocument {
	pub nfa_states: Number,
	pub nfa_symbols: Vec<String>,
	pub sigma_function: Vec<(Number, String, Vec<Number>)>,
	pub start_state: Number,
	pub final_state: Vec<Number>,
}

/// Output document.
///
/// Fields are serialized in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfaDocument {
	pub dfa_states: usize,
	pub dfa_symbols: Vec<String>,
	pub sigma_function: Vec<(StateSet, String, StateSet)>,
	pub start_state: StateSet,
	pub final_state: Vec<StateSet>,
}

impl NfaDocument {
	pub fn from_reader(input: impl io::Read) -> Result<Self, DocumentError> {
		Ok(serde_json::from_reader(input)?)
	}

	/// Builds the automaton described by this document, then validates it.
	pub fn to_nfa(&self) -> Result<Nfa, NfaError> {
		let state_count = match self.nfa_states.as_u64() {
			Some(n) => State::try_from(n)
				.map_err(|_| NfaError::StateCountOverflow(self.nfa_states.clone()))?,
			None if self.nfa_states.is_i64() => {
				return Err(NfaError::NoStates(self.nfa_states.clone()))
			}
			None => return Err(NfaError::StateCountOverflow(self.nfa_states.clone())),
		};

		let alphabet = Alphabet::new(self.nfa_symbols.iter().cloned())?;
		let initial_state = state(&self.start_state)
			.ok_or_else(|| NfaError::StartOutOfRange(self.start_state.clone()))?;
		let mut nfa = Nfa::new(state_count, alphabet, initial_state);

		for (source, symbol, targets) in &self.sigma_function {
			let q = state(source).ok_or_else(|| NfaError::SourceOutOfRange(source.clone()))?;

			if nfa.transitions_of(q, symbol).is_some() {
				return Err(NfaError::DuplicateTransition(q, symbol.clone()));
			}

			let targets = targets
				.iter()
				.map(|target| {
					state(target).ok_or_else(|| NfaError::TargetOutOfRange {
						from: q,
						symbol: symbol.clone(),
						target: target.clone(),
					})
				})
				.collect::<Result<Vec<_>, _>>()?;

			nfa.add(q, symbol.as_str(), targets);
		}

		for q in &self.final_state {
			nfa.add_final_state(state(q).ok_or_else(|| NfaError::FinalOutOfRange(q.clone()))?);
		}

		nfa.validate()?;
		Ok(nfa)
	}
}

/// Converts a document integer into a state, if it can be one.
///
/// Range checks against the state count are left to [`Nfa::validate`].
fn state(n: &Number) -> Option<State> {
	n.as_u64().and_then(|n| State::try_from(n).ok())
}

impl DfaDocument {
	/// Writes this document as JSON, using the tab separated compact layout.
	pub fn to_writer(&self, output: impl io::Write) -> Result<(), DocumentError> {
		let mut serializer = serde_json::Serializer::with_formatter(output, TabSeparated);
		self.serialize(&mut serializer)?;
		Ok(())
	}

	pub fn to_json_string(&self) -> Result<String, DocumentError> {
		let mut buffer = Vec::new();
		self.to_writer(&mut buffer)?;
		String::from_utf8(buffer)
			.map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
	}

	pub fn save_to_file(&self, filename: &Path) -> Result<(), DocumentError> {
		if let Some(parent) = filename.parent() {
			std::fs::create_dir_all(parent)?;
		}

		let file = std::fs::File::create(filename)?;
		let mut output = io::BufWriter::new(file);
		self.to_writer(&mut output)?;
		io::Write::flush(&mut output)?;
		Ok(())
	}
}

/// Compact JSON layout where values are separated by `,\t` and keys from
/// their value by `:`.
///
/// Non-ASCII characters are written as `\uXXXX` escapes (UTF-16 surrogate
/// pairs outside the BMP), so the output is pure ASCII.
struct TabSeparated;

impl serde_json::ser::Formatter for TabSeparated {
	fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		if first {
			Ok(())
		} else {
			writer.write_all(b",\t")
		}
	}

	fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		if first {
			Ok(())
		} else {
			writer.write_all(b",\t")
		}
	}

	fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		let mut start = 0;
		for (i, c) in fragment.char_indices() {
			if !c.is_ascii() {
				writer.write_all(fragment[start..i].as_bytes())?;
				let mut buffer = [0; 2];
				for unit in c.encode_utf16(&mut buffer) {
					write!(writer, "\\u{unit:04x}")?;
				}

				start = i + c.len_utf8();
			}
		}

		writer.write_all(fragment[start..].as_bytes())
	}
}
