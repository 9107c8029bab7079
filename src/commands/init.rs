use crate::commands::Out;
use crate::{default_config_path, Config, Result};
use anyhow::{Context, Error};
use std::path::{Path, PathBuf};

/// Writes a configuration file with default settings.
///
/// # Arguments
/// - `path` - Where to write the file. When `None`, the default location in the platform's
///   config directory is used, e.g. `~/.config/expenses/config.json`.
///
/// # Errors
/// - Returns an error if no path is given and the platform has no config directory.
/// - Returns an error if the file already exists or cannot be written.
pub async fn init(path: Option<&Path>) -> Result<Out<PathBuf>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path().ok_or_else(|| {
            Error::msg(
                "Unable to find your config directory, provide the path of the config file \
                instead",
            )
        })?,
    };
    let config = Config::create(&path)
        .await
        .context("Unable to create the config file")?;
    let written = config.path().map(Path::to_path_buf).unwrap_or(path);
    let message = format!("Wrote default config to {}", written.display());
    Ok(Out::new(message, written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_writes_loadable_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let out = init(Some(path.as_path())).await.unwrap();
        assert_eq!(out.structure(), Some(&path));
        assert!(out.message().contains("Wrote default config"));
        assert!(Config::load(Some(path.as_path())).await.is_ok());

        // A second init must not clobber the file.
        assert!(init(Some(path.as_path())).await.is_err());
    }
}
