use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum EnvDtsError {
	#[error(transparent)]
	#[diagnostic(code(envdts::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to read env file `{}`", path.display())]
	#[diagnostic(
		code(envdts::read_env_file),
		help("check that the file exists and is readable, or remove it from `env_files`")
	)]
	ReadEnvFile {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to write declaration file `{}`", path.display())]
	#[diagnostic(
		code(envdts::write_output),
		help("check that the output directory is writable")
	)]
	WriteOutput {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid glob pattern `{pattern}`: {reason}")]
	#[diagnostic(
		code(envdts::invalid_glob),
		help("use a glob such as `.env*` or `**/.env*`")
	)]
	InvalidGlob { pattern: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(envdts::config_parse),
		help(
			"check that envdts.toml is valid TOML using only out_file, glob, ignore, env_files, \
			 timestamp and import_meta_env"
		)
	)]
	ConfigParse(String),
}

pub type EnvDtsResult<T> = Result<T, EnvDtsError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
