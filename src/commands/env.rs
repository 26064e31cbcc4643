//! `--environments` handler.

use anyhow::Result;

use textimg::EnvVars;

/// Print the environment variables textimg reads as `NAME=value` lines.
pub fn handle() -> Result<()> {
    for line in EnvVars::from_env().lines() {
        println!("{}", line);
    }
    Ok(())
}
