use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::DeclarationShape;
use crate::EnvDtsError;
use crate::EnvDtsResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["envdts.toml", ".envdts.toml", ".config/envdts.toml"];

/// Default output file name.
pub const DEFAULT_OUT_FILE: &str = "env.d.ts";

/// Default glob used to discover env files.
pub const DEFAULT_GLOB: &str = ".env*";

/// Env files ignored unless the caller says otherwise.
pub const DEFAULT_IGNORE: [&str; 1] = [".env.example"];

/// Options where every field may be missing.
///
/// This is the shape of an `envdts.toml` file and of caller supplied
/// overrides. Turn it into [`GenerateOptions`] with [`resolve_options`].
///
/// ```toml
/// out_file = "types/env.d.ts"
/// glob = ".env*"
/// ignore = [".env.example", ".env.sample"]
/// timestamp = false
/// import_meta_env = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialOptions {
	/// Output declaration file, relative to the project root.
	#[serde(default)]
	pub out_file: Option<PathBuf>,
	/// Glob used to discover env files.
	#[serde(default)]
	pub glob: Option<String>,
	/// Env file names to skip during discovery.
	#[serde(default)]
	pub ignore: Option<Vec<String>>,
	/// Explicit env files. When set, discovery is skipped entirely.
	#[serde(default)]
	pub env_files: Option<Vec<PathBuf>>,
	/// Whether to prepend a generated-at comment.
	#[serde(default)]
	pub timestamp: Option<bool>,
	/// Render `ImportMetaEnv` instead of `NodeJS.ProcessEnv`.
	#[serde(default)]
	pub import_meta_env: Option<bool>,
}

impl PartialOptions {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load options from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> EnvDtsResult<Option<Self>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let options: Self =
			toml::from_str(&content).map_err(|e| EnvDtsError::ConfigParse(e.to_string()))?;
		tracing::debug!(path = %config_path.display(), "loaded config file");

		Ok(Some(options))
	}

	/// Fill every missing field of `self` from `fallback`.
	#[must_use]
	pub fn or(self, fallback: Self) -> Self {
		Self {
			out_file: self.out_file.or(fallback.out_file),
			glob: self.glob.or(fallback.glob),
			ignore: self.ignore.or(fallback.ignore),
			env_files: self.env_files.or(fallback.env_files),
			timestamp: self.timestamp.or(fallback.timestamp),
			import_meta_env: self.import_meta_env.or(fallback.import_meta_env),
		}
	}
}

/// Fully resolved, immutable options for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
	/// Project root. Relative paths below are resolved against it.
	pub root: PathBuf,
	pub out_file: PathBuf,
	pub glob: String,
	pub ignore: Vec<String>,
	pub env_files: Option<Vec<PathBuf>>,
	pub timestamp: bool,
	pub shape: DeclarationShape,
}

impl GenerateOptions {
	/// Absolute (root-joined) path of the output file.
	pub fn out_path(&self) -> PathBuf {
		self.root.join(&self.out_file)
	}
}

/// Resolve options field by field: `overrides` beat the config `file`, which
/// beats the built-in defaults.
pub fn resolve_options(
	root: &Path,
	file: Option<PartialOptions>,
	overrides: PartialOptions,
) -> GenerateOptions {
	let merged = overrides.or(file.unwrap_or_default());

	GenerateOptions {
		root: root.to_path_buf(),
		out_file: merged
			.out_file
			.unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_FILE)),
		glob: merged.glob.unwrap_or_else(|| DEFAULT_GLOB.to_string()),
		ignore: merged
			.ignore
			.unwrap_or_else(|| DEFAULT_IGNORE.iter().map(ToString::to_string).collect()),
		env_files: merged.env_files,
		timestamp: merged.timestamp.unwrap_or(true),
		shape: if merged.import_meta_env.unwrap_or(false) {
			DeclarationShape::ImportMetaEnv
		} else {
			DeclarationShape::ProcessEnv
		},
	}
}

/// Load the config file at `root` (if any) and resolve it with `overrides`.
pub fn load_options(root: &Path, overrides: PartialOptions) -> EnvDtsResult<GenerateOptions> {
	let file = PartialOptions::load(root)?;
	Ok(resolve_options(root, file, overrides))
}
