use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use envdts_core::PartialOptions;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Generate TypeScript declarations for the variables in your .env files.",
	long_about = "envdts scans the .env files of a project and writes a declaration file \
	              (env.d.ts by default) typing every variable it finds.\n\nEverything below \
	              the `ADD YOUR CODE BELOW` marker is kept across runs, and types you widen by \
	              hand inside the generated interface survive regeneration.\n\nQuick start:\n  \
	              envdts                     Scan .env* and write env.d.ts\n  envdts --env \
	              production    Only read .env.production\n  envdts --import-meta-env   Type \
	              import.meta.env instead of process.env"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct EnvDtsCli {
	/// Output declaration file. Same as `--outfile`.
	#[arg(value_name = "OUTFILE")]
	pub outfile_positional: Option<PathBuf>,

	/// Output declaration file, relative to the project root. Takes
	/// precedence over the positional argument.
	#[arg(long, value_name = "PATH")]
	pub outfile: Option<PathBuf>,

	/// Only read `.env.<NAME>`, e.g. `--env production` for
	/// `.env.production`.
	#[arg(long, value_name = "NAME")]
	pub env: Option<String>,

	/// Replace an existing output file without asking.
	#[arg(long, default_value_t = false)]
	pub overwrite: bool,

	/// Declare `interface ImportMetaEnv` instead of `NodeJS.ProcessEnv`.
	#[arg(long, default_value_t = false)]
	pub import_meta_env: bool,

	/// Do not write the generated-at comment.
	#[arg(long, default_value_t = false)]
	pub no_timestamp: bool,

	/// Glob used to discover env files.
	#[arg(long, value_name = "PATTERN")]
	pub glob: Option<String>,

	/// Env files to skip during discovery. Repeat to skip several.
	#[arg(long, value_name = "NAME")]
	pub ignore: Vec<String>,

	/// Path to the project root directory.
	#[arg(long, short)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

impl EnvDtsCli {
	/// Option overrides expressed by the command line flags. Flags that were
	/// not given stay `None` so the config file and defaults apply.
	pub fn overrides(&self) -> PartialOptions {
		PartialOptions {
			out_file: self
				.outfile
				.clone()
				.or_else(|| self.outfile_positional.clone()),
			glob: self.glob.clone(),
			ignore: (!self.ignore.is_empty()).then(|| self.ignore.clone()),
			env_files: None,
			timestamp: self.no_timestamp.then_some(false),
			import_meta_env: self.import_meta_env.then_some(true),
		}
	}
}

/// Whether an answer to the overwrite prompt means "yes".
pub fn is_confirmation(answer: &str) -> bool {
	matches!(answer.trim(), "y" | "Y")
}

/// A sibling of `out_file` that does not clash with it:
/// `types/env.d.ts` becomes `types/env.<stamp>.d.ts`.
pub fn alternate_outfile(out_file: &Path, stamp: &str) -> PathBuf {
	let file_name = out_file
		.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_default();
	let stem = file_name
		.strip_suffix(".d.ts")
		.or_else(|| file_name.strip_suffix(".ts"))
		.unwrap_or(&file_name);

	out_file.with_file_name(format!("{stem}.{stamp}.d.ts"))
}

#[cfg(test)]
mod tests {
	use rstest::rstest;
	use similar_asserts::assert_eq;

	use super::*;

	#[rstest]
	#[case("env.d.ts", "env.20260101120000.d.ts")]
	#[case("types/env.d.ts", "types/env.20260101120000.d.ts")]
	#[case("vite-env.ts", "vite-env.20260101120000.d.ts")]
	#[case("declarations", "declarations.20260101120000.d.ts")]
	fn alternate_outfile_inserts_stamp(#[case] out_file: &str, #[case] expected: &str) {
		assert_eq!(
			alternate_outfile(Path::new(out_file), "20260101120000"),
			PathBuf::from(expected)
		);
	}

	#[rstest]
	#[case("y\n", true)]
	#[case("Y", true)]
	#[case("  y  ", true)]
	#[case("yes", false)]
	#[case("n", false)]
	#[case("", false)]
	fn confirmation_answers(#[case] answer: &str, #[case] expected: bool) {
		assert_eq!(is_confirmation(answer), expected);
	}

	#[test]
	fn flag_overrides() {
		let cli = EnvDtsCli::parse_from([
			"envdts",
			"positional.d.ts",
			"--outfile",
			"flag.d.ts",
			"--ignore",
			".env.a",
			"--ignore",
			".env.b",
			"--no-timestamp",
		]);
		let overrides = cli.overrides();

		assert_eq!(overrides.out_file, Some(PathBuf::from("flag.d.ts")));
		assert_eq!(
			overrides.ignore,
			Some(vec![".env.a".to_string(), ".env.b".to_string()])
		);
		assert_eq!(overrides.timestamp, Some(false));
		assert_eq!(overrides.import_meta_env, None);
		assert_eq!(overrides.glob, None);
	}

	#[test]
	fn no_flags_means_no_overrides() {
		let cli = EnvDtsCli::parse_from(["envdts"]);
		assert_eq!(cli.overrides(), PartialOptions::default());
	}
}
