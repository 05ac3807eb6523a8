use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn envdts_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("envdts"));
	cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
	cmd
}

/// A project with a default env file, a production env file and an example
/// file that discovery ignores by default.
pub fn write_env_fixture(root: &Path) -> std::io::Result<()> {
	std::fs::write(root.join(".env"), "DEFAULT_VAR=1\nexport SHARED=a\n")?;
	std::fs::write(root.join(".env.production"), "PROD_VAR=1\n")?;
	std::fs::write(root.join(".env.example"), "EXAMPLE_VAR=1\n")?;
	Ok(())
}
