use std::io::ErrorKind;
use std::path::Path;

use crate::EnvDtsError;
use crate::EnvDtsResult;
use crate::TypeDefinitionSet;
use crate::markers::CONTAINER_CLOSE;
use crate::markers::IMPORT_META_ENV_HEADER;
use crate::markers::NODEJS_NAMESPACE_HEADER;
use crate::markers::PRESERVATION_MARKER;
use crate::markers::PROCESS_ENV_HEADER;
use crate::markers::TIMESTAMP_PREFIX;

/// The two declaration layouts the engine can render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeclarationShape {
	/// `declare namespace NodeJS { export interface ProcessEnv { .. } }`
	#[default]
	ProcessEnv,
	/// `interface ImportMetaEnv { .. }`
	ImportMetaEnv,
}

impl DeclarationShape {
	/// Opening line of the container that holds the member list.
	pub fn container_header(self) -> &'static str {
		match self {
			Self::ProcessEnv => PROCESS_ENV_HEADER,
			Self::ImportMetaEnv => IMPORT_META_ENV_HEADER,
		}
	}
}

/// Options that affect the rendered text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
	pub shape: DeclarationShape,
	/// Human readable time for the leading comment. `None` omits the
	/// comment entirely.
	pub timestamp: Option<String>,
}

/// The prior state of the output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExistingDeclaration {
	/// No file, or it could not be read.
	Absent,
	/// The file exists and is empty.
	Empty,
	/// The file exists with content.
	Content(String),
}

impl ExistingDeclaration {
	/// Read the output file. Read failures degrade to [`Self::Absent`].
	pub fn read(path: &Path) -> Self {
		match std::fs::read_to_string(path) {
			Ok(content) if content.is_empty() => Self::Empty,
			Ok(content) => Self::Content(content),
			Err(e) => {
				if e.kind() != ErrorKind::NotFound {
					tracing::debug!(
						path = %path.display(),
						error = %e,
						"existing declaration file is unreadable, treating it as absent"
					);
				}
				Self::Absent
			}
		}
	}

	pub fn exists(&self) -> bool {
		!matches!(self, Self::Absent)
	}

	pub fn content(&self) -> Option<&str> {
		match self {
			Self::Content(content) => Some(content),
			Self::Absent | Self::Empty => None,
		}
	}
}

/// Current local time formatted for the generated-at comment.
pub fn current_timestamp() -> String {
	chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Merge freshly parsed entries with the entries recovered from an existing
/// declaration. Recovered entries win, so hand-widened types survive.
pub fn merge_existing(
	mut fresh: TypeDefinitionSet,
	existing: &ExistingDeclaration,
	shape: DeclarationShape,
) -> TypeDefinitionSet {
	if let Some(content) = existing.content() {
		let recovered = parse_existing_entries(content, shape);
		tracing::debug!(count = recovered.len(), "recovered existing type definitions");
		fresh.merge(recovered);
	}

	fresh
}

/// Produce the complete declaration file content.
///
/// Existing entries are merged over `fresh`, the generated zone is rendered,
/// and the preserved zone of `existing` (or a fresh marker) is appended.
pub fn render(
	fresh: TypeDefinitionSet,
	existing: &ExistingDeclaration,
	options: &RenderOptions,
) -> String {
	let entries = merge_existing(fresh, existing, options.shape);
	render_document(&entries, existing, options)
}

/// Render already merged entries and append the preserved tail.
///
/// An empty set renders an empty member list. Reporting that case is left to
/// the caller.
pub fn render_document(
	entries: &TypeDefinitionSet,
	existing: &ExistingDeclaration,
	options: &RenderOptions,
) -> String {
	let generated = render_generated_zone(entries, options);
	let tail = preserved_tail(existing);
	format!("{generated}\n{tail}")
}

/// Render only the generated zone, ending with a newline after the last
/// closing brace.
pub fn render_generated_zone(entries: &TypeDefinitionSet, options: &RenderOptions) -> String {
	let mut out = String::new();

	if let Some(timestamp) = &options.timestamp {
		out.push_str(&format!("{TIMESTAMP_PREFIX} {timestamp}\n"));
	}

	match options.shape {
		DeclarationShape::ProcessEnv => {
			out.push_str(NODEJS_NAMESPACE_HEADER);
			out.push('\n');
			out.push_str("  ");
			out.push_str(PROCESS_ENV_HEADER);
			out.push('\n');
			push_members(&mut out, entries, "    ");
			out.push_str("  }\n}\n");
		}
		DeclarationShape::ImportMetaEnv => {
			out.push_str(IMPORT_META_ENV_HEADER);
			out.push('\n');
			push_members(&mut out, entries, "  ");
			out.push_str("}\n");
		}
	}

	out
}

fn push_members(out: &mut String, entries: &TypeDefinitionSet, indent: &str) {
	for entry in entries.iter() {
		out.push_str(&format!("{indent}{}: {}\n", entry.name, entry.r#type));
	}
}

/// Everything from the first preservation marker to the end of the existing
/// file. When there is no marker, a fresh marker is returned so later runs
/// have a split point.
pub fn preserved_tail(existing: &ExistingDeclaration) -> String {
	existing
		.content()
		.and_then(|content| {
			content
				.find(PRESERVATION_MARKER)
				.map(|index| content[index..].to_string())
		})
		.unwrap_or_else(|| format!("{PRESERVATION_MARKER}\n"))
}

/// Recover `name: type` members from the container of `shape` inside a
/// previously rendered declaration.
///
/// The body is the text between the first container header and the first
/// following `}`. Anything that cannot be located yields an empty set.
pub fn parse_existing_entries(content: &str, shape: DeclarationShape) -> TypeDefinitionSet {
	let mut entries = TypeDefinitionSet::new();
	let Some(body) = container_body(content, shape.container_header()) else {
		return entries;
	};

	for line in body.lines() {
		let line = line.trim();
		if line.is_empty() || line.starts_with("//") {
			continue;
		}

		let Some((name, r#type)) = line.split_once(':') else {
			continue;
		};
		let (name, r#type) = (name.trim(), r#type.trim());
		if name.is_empty() || r#type.is_empty() {
			continue;
		}

		entries.insert(name, r#type);
	}

	entries
}

fn container_body<'a>(content: &'a str, header: &str) -> Option<&'a str> {
	let start = content.find(header)? + header.len();
	let rest = &content[start..];
	let end = rest.find(CONTAINER_CLOSE)?;
	Some(&rest[..end])
}

/// Replace the output file with `content`, creating parent directories.
pub fn write_declaration(path: &Path, content: &str) -> EnvDtsResult<()> {
	let write = || -> std::io::Result<()> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(path, content)
	};

	write().map_err(|source| {
		EnvDtsError::WriteOutput {
			path: path.to_path_buf(),
			source,
		}
	})
}
