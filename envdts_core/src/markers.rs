//! Literal strings shared by the renderer and the parse-back of an existing
//! declaration file. Both sides must read them from here.

/// Banner separating the generated zone from the preserved zone. Everything
/// from the first line of this banner to the end of the file is carried
/// forward untouched.
pub const PRESERVATION_MARKER: &str = "\
//---------------------------------------------------------------------//
//-----------------------ADD YOUR CODE BELOW---------------------------//
//---------------------------------------------------------------------//";

/// Opening line of the `ProcessEnv` container, inside `namespace NodeJS`.
pub const PROCESS_ENV_HEADER: &str = "export interface ProcessEnv {";

/// Namespace wrapping the `ProcessEnv` container.
pub const NODEJS_NAMESPACE_HEADER: &str = "declare namespace NodeJS {";

/// Opening line of the `ImportMetaEnv` container.
pub const IMPORT_META_ENV_HEADER: &str = "interface ImportMetaEnv {";

/// Closing character of a container body.
pub const CONTAINER_CLOSE: char = '}';

/// Prefix of the optional timestamp comment.
pub const TIMESTAMP_PREFIX: &str = "// Generated by envdts at";

/// Type assigned to every freshly parsed variable.
pub const DEFAULT_VARIABLE_TYPE: &str = "string";
