use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use derive_more::Deref;
use derive_more::IntoIterator;

use crate::EnvDtsError;
use crate::EnvDtsResult;
use crate::markers::DEFAULT_VARIABLE_TYPE;

/// A single declared environment variable and its TypeScript type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableEntry {
	/// Exact, case-sensitive variable name.
	pub name: String,
	/// TypeScript type expression, e.g. `string` or `'a' | 'b'`.
	pub r#type: String,
}

impl VariableEntry {
	pub fn new(name: impl Into<String>, r#type: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			r#type: r#type.into(),
		}
	}
}

/// An ordered, last-write-wins mapping of variable name to type.
///
/// Order is the order in which a name was first inserted. Inserting a name
/// that is already present replaces its type but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, IntoIterator)]
pub struct TypeDefinitionSet {
	#[deref]
	#[into_iterator(owned, ref)]
	entries: Vec<VariableEntry>,
	positions: HashMap<String, usize>,
}

impl TypeDefinitionSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert or replace the type for `name`. Returns the previous type when
	/// the name was already present.
	pub fn insert(&mut self, name: impl Into<String>, r#type: impl Into<String>) -> Option<String> {
		let name = name.into();
		let r#type = r#type.into();

		if let Some(&index) = self.positions.get(&name) {
			let previous = std::mem::replace(&mut self.entries[index].r#type, r#type);
			return Some(previous);
		}

		self.positions.insert(name.clone(), self.entries.len());
		self.entries.push(VariableEntry::new(name, r#type));
		None
	}

	/// Look up the type declared for `name`.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.positions
			.get(name)
			.map(|&index| self.entries[index].r#type.as_str())
	}

	pub fn contains(&self, name: &str) -> bool {
		self.positions.contains_key(name)
	}

	/// Fold `other` into `self`; entries in `other` win on conflicts.
	pub fn merge(&mut self, other: Self) {
		for entry in other {
			self.insert(entry.name, entry.r#type);
		}
	}

	/// Variable names in mapping order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|entry| entry.name.as_str())
	}
}

impl<N, T> FromIterator<(N, T)> for TypeDefinitionSet
where
	N: Into<String>,
	T: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
		let mut set = Self::new();
		for (name, r#type) in iter {
			set.insert(name, r#type);
		}
		set
	}
}

/// Extract the variable name declared on a single env file line.
///
/// Returns `None` for blank lines, `#` comments and malformed lines (no `=`,
/// an empty value, or a blank name).
pub fn parse_env_line(line: &str) -> Option<&str> {
	let trimmed = line.trim();
	if trimmed.is_empty() || trimmed.starts_with('#') {
		return None;
	}

	let (key, value) = line.split_once('=')?;
	if value.is_empty() {
		return None;
	}

	let name = strip_export_keyword(key);
	if name.is_empty() {
		return None;
	}

	Some(name)
}

/// Remove a leading `export` keyword (followed by whitespace) and trim.
fn strip_export_keyword(key: &str) -> &str {
	let key = key.trim();
	match key.strip_prefix("export") {
		Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim(),
		_ => key,
	}
}

/// Parse the content of one env file. Every recognized variable is typed as
/// `string`.
pub fn parse_env_content(content: &str) -> TypeDefinitionSet {
	let mut set = TypeDefinitionSet::new();
	parse_env_content_into(content, &mut set);
	set
}

fn parse_env_content_into(content: &str, set: &mut TypeDefinitionSet) {
	for name in content.lines().filter_map(parse_env_line) {
		set.insert(name, DEFAULT_VARIABLE_TYPE);
	}
}

/// Read and parse each env file in order, folding them into one set. Later
/// files override earlier entries with the same name.
///
/// Relative paths are resolved against `root`.
pub fn parse_env_files(root: &Path, files: &[PathBuf]) -> EnvDtsResult<TypeDefinitionSet> {
	let mut set = TypeDefinitionSet::new();

	for file in files {
		let path = root.join(file);
		let content = std::fs::read_to_string(&path).map_err(|source| {
			EnvDtsError::ReadEnvFile {
				path: file.clone(),
				source,
			}
		})?;
		let before = set.len();
		parse_env_content_into(&content, &mut set);
		tracing::debug!(
			file = %file.display(),
			new_variables = set.len() - before,
			"parsed env file"
		);
	}

	Ok(set)
}
