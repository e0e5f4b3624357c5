use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Ordered sequence of distinct symbols.
///
/// The order is the one given on creation. It only drives the order in which
/// transitions are explored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Alphabet(Vec<String>);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("duplicate symbol `{0}`")]
pub struct DuplicateSymbol(pub String);

impl Alphabet {
	pub fn new<S: Into<String>>(symbols: impl IntoIterator<Item = S>) -> Result<Self, DuplicateSymbol> {
		let mut result = Vec::new();

		for symbol in symbols {
			let symbol = symbol.into();
			if result.contains(&symbol) {
				return Err(DuplicateSymbol(symbol));
			}

			result.push(symbol)
		}

		Ok(Self(result))
	}

	pub fn contains(&self, symbol: &str) -> bool {
		self.position(symbol).is_some()
	}

	/// Returns the index of the given symbol in the alphabet.
	pub fn position(&self, symbol: &str) -> Option<usize> {
		self.0.iter().position(|s| s == symbol)
	}

	pub fn iter(&self) -> std::slice::Iter<String> {
		self.0.iter()
	}
}

impl Deref for Alphabet {
	type Target = [String];

	fn deref(&self) -> &[String] {
		&self.0
	}
}

impl TryFrom<Vec<String>> for Alphabet {
	type Error = DuplicateSymbol;

	fn try_from(symbols: Vec<String>) -> Result<Self, DuplicateSymbol> {
		Self::new(symbols)
	}
}

impl From<Alphabet> for Vec<String> {
	fn from(alphabet: Alphabet) -> Self {
		alphabet.0
	}
}

impl<'a> IntoIterator for &'a Alphabet {
	type Item = &'a String;
	type IntoIter = std::slice::Iter<'a, String>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keeps_order() {
		let alphabet = Alphabet::new(["b", "a", "c"]).unwrap();
		assert_eq!(&alphabet[..], &["b", "a", "c"]);
		assert_eq!(alphabet.position("a"), Some(1));
		assert!(!alphabet.contains("d"));
	}

	#[test]
	fn rejects_duplicates() {
		assert_eq!(
			Alphabet::new(["a", "b", "a"]),
			Err(DuplicateSymbol("a".to_string()))
		);
		assert!(serde_json::from_str::<Alphabet>(r#"["x", "x"]"#).is_err());
	}

	#[test]
	fn empty_alphabet_is_valid() {
		let alphabet = Alphabet::new(Vec::<String>::new()).unwrap();
		assert!(alphabet.is_empty());
	}
}
