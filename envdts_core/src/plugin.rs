//! Build-pipeline entry point.
//!
//! A build integration (a `build.rs`, a bundler step, a task runner) calls
//! [`EnvTypesPlugin::setup`] once per build. Unlike the CLI, "no env files"
//! and "no variables" are reported as warnings and never fail the build.
//!
//! ```rust,no_run
//! use envdts_core::plugin::EnvTypesPlugin;
//! use envdts_core::PartialOptions;
//!
//! // build.rs
//! let plugin = EnvTypesPlugin::new(PartialOptions {
//! 	timestamp: Some(false),
//! 	..PartialOptions::default()
//! });
//! if let Some(report) = plugin.setup().unwrap() {
//! 	for line in envdts_core::plugin::cargo_rerun_directives(&report) {
//! 		println!("{line}");
//! 	}
//! }
//! ```

use std::path::PathBuf;

use crate::EnvDtsResult;
use crate::GenerateOutcome;
use crate::GenerateReport;
use crate::PartialOptions;
use crate::generate;
use crate::load_options;

/// Name the hook registers under.
pub const PLUGIN_NAME: &str = "envdts";

/// Generates env declarations as part of a build.
#[derive(Debug, Clone, Default)]
pub struct EnvTypesPlugin {
	options: PartialOptions,
	root: Option<PathBuf>,
}

impl EnvTypesPlugin {
	pub fn new(options: PartialOptions) -> Self {
		Self {
			options,
			root: None,
		}
	}

	/// Use `root` as the project root instead of the current directory.
	#[must_use]
	pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
		self.root = Some(root.into());
		self
	}

	pub fn name(&self) -> &'static str {
		PLUGIN_NAME
	}

	/// Run the generation once.
	///
	/// Returns `Ok(None)` when no env files were found. Config and I/O errors
	/// are propagated; everything else is a logged warning.
	pub fn setup(&self) -> EnvDtsResult<Option<GenerateReport>> {
		let root = match &self.root {
			Some(root) => root.clone(),
			None => std::env::current_dir()?,
		};
		let options = load_options(&root, self.options.clone())?;

		match generate(&options)? {
			GenerateOutcome::NoEnvFiles => {
				tracing::warn!(
					plugin = PLUGIN_NAME,
					glob = %options.glob,
					"no .env files found; add a .env file to the project or set `env_files`"
				);
				Ok(None)
			}
			GenerateOutcome::Written(report) => {
				if report.is_empty() {
					tracing::warn!(
						plugin = PLUGIN_NAME,
						"no env variables found in .env files with the given options"
					);
				}
				tracing::debug!(plugin = PLUGIN_NAME, path = %report.out_file.display(), "created");
				Ok(Some(report))
			}
		}
	}
}

/// `cargo:rerun-if-changed` lines for every env file a run read, so build
/// scripts regenerate when an env file changes.
pub fn cargo_rerun_directives(report: &GenerateReport) -> Vec<String> {
	report
		.env_files
		.iter()
		.map(|file| format!("cargo:rerun-if-changed={}", file.display()))
		.collect()
}
