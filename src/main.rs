use log::info;
use std::process::ExitCode;
use subset_dfa::{convert_file, options::USAGE, Options, OptionsError};

fn main() -> ExitCode {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

	let options = match Options::from_args(std::env::args().skip(1)) {
		Ok(options) => options,
		Err(OptionsError::Help) => {
			print!("{USAGE}");
			return ExitCode::SUCCESS;
		}
		Err(e) => {
			eprintln!("error: {e}\n\n{USAGE}");
			return ExitCode::FAILURE;
		}
	};

	match convert_file(&options) {
		Ok(dfa) => {
			info!(
				"wrote {} DFA states to {}",
				dfa.dfa_states,
				options.output.display()
			);
			ExitCode::SUCCESS
		}
		Err(e) => {
			eprintln!("error: {e}");
			ExitCode::FAILURE
		}
	}
}
