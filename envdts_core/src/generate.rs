use std::path::PathBuf;

use crate::EnvDtsResult;
use crate::ExistingDeclaration;
use crate::GenerateOptions;
use crate::RenderOptions;
use crate::current_timestamp;
use crate::discovery::discover_env_files;
use crate::merge_existing;
use crate::parse_env_files;
use crate::render_document;
use crate::write_declaration;

/// Summary of a run that wrote the declaration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
	/// The file that was written.
	pub out_file: PathBuf,
	/// Env files that were read, relative to the root, in processing order.
	pub env_files: Vec<PathBuf>,
	/// Number of variables in the written declaration.
	pub entry_count: usize,
}

impl GenerateReport {
	pub fn is_empty(&self) -> bool {
		self.entry_count == 0
	}
}

/// What a single pipeline run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
	/// No env files were found; nothing was written.
	NoEnvFiles,
	/// The declaration file was written.
	Written(GenerateReport),
}

/// The env files a run would read: the explicit list when configured,
/// otherwise whatever discovery finds.
pub fn resolve_env_files(options: &GenerateOptions) -> EnvDtsResult<Vec<PathBuf>> {
	match &options.env_files {
		Some(files) => Ok(files.clone()),
		None => discover_env_files(&options.root, &options.glob, &options.ignore),
	}
}

/// Run discovery, parsing, merging, rendering and writing once.
pub fn generate(options: &GenerateOptions) -> EnvDtsResult<GenerateOutcome> {
	tracing::debug!(?options, "generating env declarations");

	let env_files = resolve_env_files(options)?;
	if env_files.is_empty() {
		tracing::debug!("no env files found");
		return Ok(GenerateOutcome::NoEnvFiles);
	}

	generate_from_files(options, env_files)
}

/// Like [`generate`], but with the env file list already decided.
pub fn generate_from_files(
	options: &GenerateOptions,
	env_files: Vec<PathBuf>,
) -> EnvDtsResult<GenerateOutcome> {
	if env_files.is_empty() {
		return Ok(GenerateOutcome::NoEnvFiles);
	}

	let fresh = parse_env_files(&options.root, &env_files)?;
	tracing::debug!(variables = ?fresh.names().collect::<Vec<_>>(), "parsed env files");

	let out_path = options.out_path();
	let existing = ExistingDeclaration::read(&out_path);
	let entries = merge_existing(fresh, &existing, options.shape);

	let render_options = RenderOptions {
		shape: options.shape,
		timestamp: options.timestamp.then(current_timestamp),
	};
	let content = render_document(&entries, &existing, &render_options);
	write_declaration(&out_path, &content)?;
	tracing::info!(path = %out_path.display(), count = entries.len(), "wrote declaration file");

	Ok(GenerateOutcome::Written(GenerateReport {
		out_file: out_path,
		env_files,
		entry_count: entries.len(),
	}))
}
