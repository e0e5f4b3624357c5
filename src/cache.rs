//! On-disk cache of converted automata.
//!
//! Determinizing can take a long time on large automata. The resulting
//! description is stored in CBOR together with the SHA-256 digest of the input
//! it was computed from, and reused as long as the input does not change.
use hex_fmt::HexFmt;
use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

use crate::{dfa::StateCount, document::DfaDocument};

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
	#[error(transparent)]
	IO(#[from] std::io::Error),

	#[error(transparent)]
	Serialization(#[from] ciborium::ser::Error<std::io::Error>),

	#[error(transparent)]
	Deserialization(#[from] ciborium::de::Error<std::io::Error>),
}

#[derive(Deserialize)]
struct CachedDfa {
	hash: [u8; 32],
	dfa: DfaDocument,
}

#[derive(Serialize)]
struct CachedDfaRef<'a> {
	hash: [u8; 32],
	dfa: &'a DfaDocument,
}

/// Computes the cache key of the given raw input document.
pub fn hash(input: &[u8], state_count: StateCount) -> [u8; 32] {
	let method: u8 = match state_count {
		StateCount::TransitionSources => 0,
		StateCount::Discovered => 1,
	};

	let mut hasher = Sha256::new();
	hasher.update(input);
	hasher.update([method]);
	hasher.finalize().into()
}

/// Loads the cached description, if it exists and matches `hash`.
pub fn load_from_file(filename: &Path, hash: &[u8; 32]) -> Result<Option<DfaDocument>, CacheError> {
	match std::fs::File::open(filename) {
		Ok(file) => {
			let input = std::io::BufReader::new(file);
			let cached: CachedDfa = ciborium::from_reader(input)?;

			if cached.hash == *hash {
				debug!("cache hit for {}", HexFmt(hash));
				Ok(Some(cached.dfa))
			} else {
				debug!("stale cache entry {}", HexFmt(&cached.hash));
				Ok(None)
			}
		}
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
		Err(e) => Err(e.into()),
	}
}

pub fn save_to_file(filename: &Path, hash: [u8; 32], dfa: &DfaDocument) -> Result<(), CacheError> {
	if let Some(parent) = filename.parent() {
		std::fs::create_dir_all(parent)?;
	}

	let file = std::fs::File::create(filename)?;
	let output = std::io::BufWriter::new(file);
	ciborium::into_writer(&CachedDfaRef { hash, dfa }, output)?;
	debug!("cached {} as {}", filename.display(), HexFmt(hash));
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::state_set::StateSet;

	fn temp_dir(test: &str) -> std::path::PathBuf {
		std::env::temp_dir().join(format!("subset-dfa-cache-{}-{test}", std::process::id()))
	}

	fn sample() -> DfaDocument {
		DfaDocument {
			dfa_states: 1,
			dfa_symbols: vec!["a".to_string()],
			sigma_function: vec![(
				StateSet::singleton(0),
				"a".to_string(),
				StateSet::singleton(0),
			)],
			start_state: StateSet::singleton(0),
			final_state: vec![StateSet::singleton(0)],
		}
	}

	#[test]
	fn hash_depends_on_input_and_method() {
		let a = hash(b"{}", StateCount::TransitionSources);
		assert_eq!(a, hash(b"{}", StateCount::TransitionSources));
		assert_ne!(a, hash(b"{ }", StateCount::TransitionSources));
		assert_ne!(a, hash(b"{}", StateCount::Discovered));
	}

	#[test]
	fn round_trip() {
		let dir = temp_dir("round_trip");
		let path = dir.join("nested/sample.dfa.cbor");
		let key = hash(b"sample", StateCount::default());

		save_to_file(&path, key, &sample()).unwrap();
		assert_eq!(load_from_file(&path, &key).unwrap(), Some(sample()));

		let other = hash(b"other", StateCount::default());
		assert_eq!(load_from_file(&path, &other).unwrap(), None);

		std::fs::remove_dir_all(&dir).unwrap();
	}

	#[test]
	fn missing_file() {
		let path = temp_dir("missing_file").join("missing.dfa.cbor");
		assert_eq!(load_from_file(&path, &[0; 32]).unwrap(), None);
	}

	#[test]
	fn corrupted_file() {
		let dir = temp_dir("corrupted_file");
		let path = dir.join("corrupted.dfa.cbor");
		std::fs::create_dir_all(&dir).unwrap();
		std::fs::write(&path, b"not cbor").unwrap();
		assert!(matches!(
			load_from_file(&path, &[0; 32]),
			Err(CacheError::Deserialization(_))
		));

		std::fs::remove_dir_all(&dir).unwrap();
	}
}
