use std::io::BufRead;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use envdts_cli::EnvDtsCli;
use envdts_cli::alternate_outfile;
use envdts_cli::is_confirmation;
use envdts_core::GenerateOptions;
use envdts_core::GenerateOutcome;
use envdts_core::discovery::select_named_env_file;
use envdts_core::generate_from_files;
use envdts_core::load_options;
use envdts_core::resolve_env_files;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = EnvDtsCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	if let Err(e) = run(&args) {
		match e.downcast::<envdts_core::EnvDtsError>() {
			Ok(envdts_err) => {
				let report: miette::Report = (*envdts_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Diagnostics go to stderr so stdout only carries results. `RUST_LOG`
/// replaces the default level.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::registry()
		.with(filter)
		.with(
			fmt::layer()
				.with_writer(std::io::stderr)
				.with_ansi(use_color)
				.with_target(false)
				.without_time(),
		)
		.init();
}

fn run(args: &EnvDtsCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	tracing::debug!(root = %root.display(), "resolved project root");
	let options = load_options(&root, args.overrides())?;

	let env_files = match &args.env {
		Some(name) => select_named_env_file(&root, name),
		None => resolve_env_files(&options)?,
	};

	if env_files.is_empty() {
		match &args.env {
			Some(name) => eprintln!("{} .env.{name} not found", colored!("error:", red)),
			None => {
				eprintln!(
					"{} no .env files found matching `{}`",
					colored!("error:", red),
					options.glob
				);
			}
		}
		process::exit(1);
	}

	if args.verbose {
		println!("Generating types from {} env file(s):", env_files.len());
		for file in &env_files {
			println!("  {}", file.display());
		}
	}

	let out_path = options.out_path();
	if out_path.exists() && !args.overwrite && !confirm_overwrite(&options, &root)? {
		return Ok(());
	}

	match generate_from_files(&options, env_files)? {
		GenerateOutcome::NoEnvFiles => {
			eprintln!("{} no .env files found", colored!("error:", red));
			process::exit(1);
		}
		GenerateOutcome::Written(report) => {
			if report.is_empty() {
				eprintln!(
					"{} no env variables found in the scanned files",
					colored!("warning:", yellow)
				);
			}
			println!(
				"{} {} ({} variable(s))",
				colored!("Types generated:", green),
				make_relative(&report.out_file, &root),
				report.entry_count
			);
		}
	}

	Ok(())
}

/// Ask before replacing an existing declaration file. Returns `false` when
/// the user declined, after suggesting a non-clashing file name.
fn confirm_overwrite(
	options: &GenerateOptions,
	root: &Path,
) -> Result<bool, Box<dyn std::error::Error>> {
	let display = make_relative(&options.out_path(), root);
	print!(
		"{} already exists. Overwrite it? Text below the marker is kept. [y/N] ",
		colored!(display, bold)
	);
	std::io::stdout().flush()?;

	let mut answer = String::new();
	std::io::stdin().lock().read_line(&mut answer)?;
	if is_confirmation(&answer) {
		return Ok(true);
	}

	let stamp = chrono::Local::now().format("%Y%m%d%H%M%S").to_string();
	let suggestion = alternate_outfile(&options.out_file, &stamp);
	println!(
		"\nAborted. To keep the existing file, write somewhere else with `--outfile {}`.",
		suggestion.display()
	);

	Ok(false)
}

fn resolve_root(args: &EnvDtsCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
