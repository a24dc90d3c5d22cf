//! TOML parsing of configuration files.

use anyhow::{Context, Result};
use std::path::Path;

/// Parse a TOML configuration file into the specified type.
///
/// Read and parse failures carry the file path as context; the underlying I/O
/// or TOML error is preserved as the cause.
///
/// ```rust,no_run
/// use gazelle_cli::config::{GazelleConfig, parse_config};
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let config: GazelleConfig = parse_config(Path::new("gazelle.toml"))?;
/// println!("go_prefix = {:?}", config.go_prefix);
/// # Ok(())
/// # }
/// ```
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: T = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}
