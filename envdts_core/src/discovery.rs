//! Locating env files inside a project.
//!
//! The walk is deliberately independent of `.gitignore`: env files are
//! usually git-ignored, yet they are exactly the files we need to read.

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use globset::GlobBuilder;
use globset::GlobMatcher;

use crate::EnvDtsError;
use crate::EnvDtsResult;

/// Directories that never contain project env files.
const SKIPPED_DIRECTORIES: [&str; 3] = [".git", "node_modules", "target"];

/// Discover env files under `root` whose root-relative path matches `glob`.
///
/// A candidate is dropped when any entry of `ignore` ends with its relative
/// path, so `.env.example` excludes `.env.example` but keeps
/// `.env.test.example`. Returned paths are relative to `root` and sorted.
///
/// Subdirectories are only visited when the glob can reach into them (it
/// contains `/` or `**`). Unreadable subdirectories are skipped; only an
/// unreadable `root` is an error.
pub fn discover_env_files(
	root: &Path,
	glob: &str,
	ignore: &[String],
) -> EnvDtsResult<Vec<PathBuf>> {
	let matcher = build_matcher(glob)?;
	let mut files = Vec::new();
	let mut visited_dirs = HashSet::new();
	let walk = WalkOptions {
		matcher: &matcher,
		ignore,
		recursive: glob_reaches_subdirectories(glob),
	};

	// An unreadable root is fatal, unlike the directories below it.
	drop(std::fs::read_dir(root)?);
	walk_dir(root, root, &walk, &mut files, &mut visited_dirs);

	// Sort for deterministic ordering.
	files.sort();
	tracing::debug!(glob, count = files.len(), "discovered env files");
	Ok(files)
}

/// Resolve the single file selected by `--env <name>`: `.env.<name>`.
///
/// Returns an empty list when that file does not exist.
pub fn select_named_env_file(root: &Path, name: &str) -> Vec<PathBuf> {
	let file = PathBuf::from(format!(".env.{name}"));
	if root.join(&file).is_file() {
		vec![file]
	} else {
		tracing::debug!(file = %file.display(), "named env file not found");
		Vec::new()
	}
}

fn build_matcher(glob: &str) -> EnvDtsResult<GlobMatcher> {
	GlobBuilder::new(glob)
		.literal_separator(true)
		.build()
		.map(|glob| glob.compile_matcher())
		.map_err(|e| {
			EnvDtsError::InvalidGlob {
				pattern: glob.to_string(),
				reason: e.kind().to_string(),
			}
		})
}

/// Whether matches for `glob` can live below the root directory.
pub fn glob_reaches_subdirectories(glob: &str) -> bool {
	glob.contains('/') || glob.contains("**")
}

/// Whether `relative` is excluded by one of the ignore entries.
pub fn is_ignored(relative: &str, ignore: &[String]) -> bool {
	ignore.iter().any(|entry| entry.ends_with(relative))
}

struct WalkOptions<'a> {
	matcher: &'a GlobMatcher,
	ignore: &'a [String],
	recursive: bool,
}

fn walk_dir(
	root: &Path,
	dir: &Path,
	walk: &WalkOptions<'_>,
	files: &mut Vec<PathBuf>,
	visited_dirs: &mut HashSet<PathBuf>,
) {
	// Skip symlink cycles by tracking canonical paths.
	let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
	if !visited_dirs.insert(canonical) {
		return;
	}

	let entries = match std::fs::read_dir(dir) {
		Ok(entries) => entries,
		Err(e) => {
			tracing::debug!(dir = %dir.display(), error = %e, "skipping unreadable directory");
			return;
		}
	};

	for entry in entries {
		let entry = match entry {
			Ok(entry) => entry,
			Err(e) => {
				tracing::debug!(dir = %dir.display(), error = %e, "skipping unreadable entry");
				continue;
			}
		};
		let path = entry.path();

		if path.is_dir() {
			let skipped = !walk.recursive
				|| path
					.file_name()
					.and_then(|name| name.to_str())
					.is_some_and(|name| SKIPPED_DIRECTORIES.contains(&name));
			if !skipped {
				walk_dir(root, &path, walk, files, visited_dirs);
			}
			continue;
		}

		let Ok(relative) = path.strip_prefix(root) else {
			continue;
		};
		let key = relative_key(relative);

		if walk.matcher.is_match(&key) && !is_ignored(&key, walk.ignore) {
			files.push(relative.to_path_buf());
		}
	}
}

/// Forward-slash form of a relative path, used for glob and ignore matching.
fn relative_key(path: &Path) -> String {
	path.to_string_lossy().replace('\\', "/")
}
