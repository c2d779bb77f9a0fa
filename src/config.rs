use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Command-line defaults that can be saved to a config file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub html: bool,
    pub no_color: bool,
    pub history_depth: Option<usize>,
    pub org: Option<String>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: booleans add up, options from `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            html: self.html || other.html,
            no_color: self.no_color || other.no_color,
            history_depth: other.history_depth.or(self.history_depth),
            org: other.org.clone().or_else(|| self.org.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("clausedraft").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("clausedraft")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("clausedraft").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("clausedraft")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".clausedraftrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# clausedraft defaults (saved with --save)".to_string()];
    if flags.html {
        lines.push("--html".to_string());
    }
    if flags.no_color {
        lines.push("--no-color".to_string());
    }
    if let Some(depth) = flags.history_depth {
        lines.push(format!("--history-depth {depth}"));
    }
    if let Some(org) = &flags.org {
        lines.push(format!("--org {org}"));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of raw tokens, ignoring everything else.
///
/// Value flags accept both `--flag value` and `--flag=value`. A depth that
/// does not parse is dropped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--html" {
            flags.html = true;
        } else if token == "--no-color" {
            flags.no_color = true;
        } else if token == "--history-depth" {
            if let Some(next) = tokens.get(i + 1) {
                flags.history_depth = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--history-depth=") {
            flags.history_depth = value.parse().ok();
        } else if token == "--org" {
            if let Some(next) = tokens.get(i + 1) {
                flags.org = Some(next.clone());
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--org=") {
            flags.org = Some(value.to_string());
        }
        i += 1;
    }
    flags
}
