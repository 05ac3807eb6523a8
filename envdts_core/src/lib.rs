//! `envdts_core` is the core library for [envdts](https://github.com/envdts/envdts).
//! It scans `.env` files and keeps a TypeScript declaration file describing
//! them up to date, without touching anything you add below the marker line.
//!
//! ## Processing Pipeline
//!
//! ```text
//! .env, .env.local, .env.production, ...
//!   → Discovery (glob + ignore list → ordered file list)
//!   → Parser (each line → name: string, last write wins)
//!   → Engine (recover types from the existing env.d.ts, existing types win)
//!   → Render (NodeJS.ProcessEnv or ImportMetaEnv) + preserved tail
//!   → Write (replace the whole file)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: `envdts.toml` loading and option resolution.
//! - [`discovery`]: Finding env files under a project root.
//! - [`markers`]: Literals shared by the renderer and the parse-back.
//! - [`plugin`]: Build-pipeline entry point with non-fatal diagnostics.
//!
//! ## Output
//!
//! ```ts
//! // Generated by envdts at 2026-01-01 12:00:00
//! declare namespace NodeJS {
//!   export interface ProcessEnv {
//!     DATABASE_URL: string
//!     NODE_ENV: 'development' | 'production'
//!   }
//! }
//!
//! //---------------------------------------------------------------------//
//! //-----------------------ADD YOUR CODE BELOW---------------------------//
//! //---------------------------------------------------------------------//
//! ```
//!
//! Types edited by hand inside the container (like `NODE_ENV` above) are kept
//! on the next run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use envdts_core::{GenerateOutcome, PartialOptions, generate, load_options};
//! use std::path::Path;
//!
//! let options = load_options(Path::new("."), PartialOptions::default()).unwrap();
//! match generate(&options).unwrap() {
//!     GenerateOutcome::NoEnvFiles => eprintln!("no .env files found"),
//!     GenerateOutcome::Written(report) => {
//!         println!("{} variable(s)", report.entry_count);
//!     }
//! }
//! ```

pub use config::*;
pub use engine::*;
pub use error::*;
pub use generate::*;
pub use parser::*;

pub mod config;
pub mod discovery;
mod engine;
#[allow(unused_assignments)]
mod error;
mod generate;
pub mod markers;
mod parser;
pub mod plugin;
