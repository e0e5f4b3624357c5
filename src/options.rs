use indoc::indoc;
use std::{borrow::Cow, path::PathBuf};

use crate::dfa::StateCount;

pub const USAGE: &str = indoc! {"
	Usage: nfa2dfa [OPTIONS] [INPUT] [OUTPUT]

	Converts the NFA described by INPUT (default `nfa_input.json`) into a DFA
	written to OUTPUT (default `dfa_output.json`).

	Options:
	  --count-all-states  Count every discovered state, including the ones
	                      without outgoing transitions
	  --cache <PATH>      Cache file path
	  --no-cache          Disable caching
	  --dot <PATH>        Also write a Graphviz rendering of the DFA
	  -h, --help          Print this message
"};

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
	#[error("help requested")]
	Help,

	#[error("unknown option `{0}`")]
	UnknownOption(String),

	#[error("missing value for `{0}`")]
	MissingValue(&'static str),

	#[error("unexpected argument `{0}`")]
	UnexpectedArgument(String),

	#[error("target directory not found: {0}")]
	TargetDirNotFound(std::env::VarError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
	pub input: PathBuf,
	pub output: PathBuf,
	pub state_count: StateCount,

	/// Cache file, `None` if caching is disabled.
	pub cache_path: Option<PathBuf>,

	/// Where to write the Graphviz rendering of the DFA, if anywhere.
	pub dot: Option<PathBuf>,
}

impl Default for Options {
	fn default() -> Self {
		Self {
			input: "nfa_input.json".into(),
			output: "dfa_output.json".into(),
			state_count: StateCount::default(),
			cache_path: None,
			dot: None,
		}
	}
}

impl Options {
	/// Parses the command line arguments, program name excluded.
	pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, OptionsError> {
		let mut result = Self::default();
		let mut cache_path = None;
		let mut no_cache = false;
		let mut positional = 0;

		let mut args = args.into_iter();
		while let Some(arg) = args.next() {
			match arg.as_str() {
				"-h" | "--help" => return Err(OptionsError::Help),
				"--count-all-states" => result.state_count = StateCount::Discovered,
				"--no-cache" => no_cache = true,
				"--cache" => {
					cache_path = Some(args.next().ok_or(OptionsError::MissingValue("--cache"))?.into())
				}
				"--dot" => {
					result.dot = Some(args.next().ok_or(OptionsError::MissingValue("--dot"))?.into())
				}
				option if option.starts_with('-') && option != "-" => {
					return Err(OptionsError::UnknownOption(option.to_owned()))
				}
				value => {
					match positional {
						0 => result.input = value.into(),
						1 => result.output = value.into(),
						_ => return Err(OptionsError::UnexpectedArgument(value.to_owned())),
					}

					positional += 1
				}
			}
		}

		if !no_cache {
			result.cache_path = Some(match cache_path {
				Some(path) => path,
				None => default_cache_path(&result.input)?,
			})
		}

		Ok(result)
	}
}

fn find_target_dir() -> Result<Cow<'static, str>, std::env::VarError> {
	match std::env::var("SUBSET_DFA_CACHE_DIR") {
		Ok(dir) => Ok(Cow::Owned(dir)),
		Err(std::env::VarError::NotPresent) => match std::env::var("CARGO_TARGET_DIR") {
			Ok(dir) => Ok(Cow::Owned(dir)),
			Err(std::env::VarError::NotPresent) => Ok(Cow::Borrowed("target")),
			Err(e) => Err(e),
		},
		Err(e) => Err(e),
	}
}

fn default_cache_path(input: &std::path::Path) -> Result<PathBuf, OptionsError> {
	let target = find_target_dir().map_err(OptionsError::TargetDirNotFound)?;
	let stem = input
		.file_stem()
		.map(|s| s.to_string_lossy())
		.unwrap_or(Cow::Borrowed("input"));
	Ok(format!("{target}/subset-dfa/{stem}.dfa.cbor").into())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(args: &[&str]) -> Result<Options, OptionsError> {
		Options::from_args(args.iter().map(|s| s.to_string()))
	}

	#[test]
	fn defaults() {
		let options = parse(&["--no-cache"]).unwrap();
		assert_eq!(options.input, PathBuf::from("nfa_input.json"));
		assert_eq!(options.output, PathBuf::from("dfa_output.json"));
		assert_eq!(options.state_count, StateCount::TransitionSources);
		assert_eq!(options.cache_path, None);
		assert_eq!(options.dot, None);
	}

	#[test]
	fn positional_and_flags() {
		let options = parse(&[
			"in.json",
			"--count-all-states",
			"out.json",
			"--dot",
			"dfa.dot",
			"--cache",
			"cache/in.cbor",
		])
		.unwrap();

		assert_eq!(options.input, PathBuf::from("in.json"));
		assert_eq!(options.output, PathBuf::from("out.json"));
		assert_eq!(options.state_count, StateCount::Discovered);
		assert_eq!(options.dot, Some(PathBuf::from("dfa.dot")));
		assert_eq!(options.cache_path, Some(PathBuf::from("cache/in.cbor")));
	}

	#[test]
	fn any_cache_path() {
		for path in ["/tmp/cache.cbor", "../cache.cbor", "cache/in.cbor"] {
			let options = parse(&["--cache", path]).unwrap();
			assert_eq!(options.cache_path, Some(PathBuf::from(path)));
		}
	}

	#[test]
	fn default_cache_path_uses_input_stem() {
		let options = parse(&["automata/foo.json"]).unwrap();
		let path = options.cache_path.unwrap();
		assert!(path.ends_with("subset-dfa/foo.dfa.cbor"));
	}

	#[test]
	fn errors() {
		assert!(matches!(parse(&["-h"]), Err(OptionsError::Help)));
		assert!(matches!(parse(&["--verbose"]), Err(OptionsError::UnknownOption(o)) if o == "--verbose"));
		assert!(matches!(parse(&["--dot"]), Err(OptionsError::MissingValue("--dot"))));
		assert!(matches!(
			parse(&["a", "b", "c"]),
			Err(OptionsError::UnexpectedArgument(a)) if a == "c"
		));
		assert!(matches!(parse(&["--cache"]), Err(OptionsError::MissingValue("--cache"))));
	}
}
