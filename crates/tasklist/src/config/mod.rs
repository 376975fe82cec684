//! Configuration module for tasklist.

use anyhow::{Context, Result, anyhow};
use std::io::{self, Write};
use std::path::Path;

pub mod keybindings;

pub use keybindings::{Action, Config, KeyBindingsConfig, ViewType};

/// Load the configuration file, falling back to defaults when it is absent.
///
/// A present file must define every binding and pass validation.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match keybindings::load_config(path)? {
        Some(config) => {
            keybindings::validate_config(&config).context("Invalid keybindings configuration")?;
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Initialize the configuration file with defaults.
pub fn init_config(output: Option<&Path>, force: bool) -> Result<()> {
    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => keybindings::default_config_path()
            .ok_or_else(|| anyhow!("Could not determine the configuration directory"))?,
    };

    write_default_config(&output_path, force)
}

/// Print the effective configuration as TOML.
pub fn show_config(path: Option<&Path>) -> Result<()> {
    let config = load_or_default(path)?;
    let rendered = toml::to_string_pretty(&config).context("Failed to serialize configuration")?;
    print!("{rendered}");
    Ok(())
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force && !confirm_overwrite(path)? {
        println!("Aborted.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = keybindings::generate_default_config_toml()?;

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    println!("✓ Created configuration file: {}", path.display());
    println!();
    println!("Edit this file to customize keybindings.");
    println!("Restart tasklist to apply changes.");

    Ok(())
}

fn confirm_overwrite(path: &Path) -> Result<bool> {
    print!("File already exists: {}\nOverwrite? [y/N]: ", path.display());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_config_writes_loadable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        init_config(Some(&path), false).unwrap();
        let config = load_or_default(Some(&path)).unwrap();
        assert_eq!(config.tui.keybindings.task_list.filter_all, vec!["1"]);
    }

    #[test]
    fn init_config_force_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "garbage").unwrap();

        init_config(Some(&path), true).unwrap();
        assert!(load_or_default(Some(&path)).is_ok());
    }

    #[test]
    fn load_or_default_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_or_default(Some(&dir.path().join("missing.toml"))).unwrap();
        assert_eq!(config.tui.keybindings.task_list.create_task, vec!["n", "N"]);
    }

    #[test]
    fn load_or_default_rejects_conflicting_bindings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.tui.keybindings.task_list.copy_task = vec!["q".to_string()];
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let err = load_or_default(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("multiple actions"));
    }
}
