use anyhow::{Context as AnyhowContext, Result};
use prompt_bridge_translator::TranslatorConfig;
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Environment fallback for `--config`
pub(crate) const CONFIG_ENV: &str = "PROMPT_BRIDGE_CONFIG";

/// Resolve the prompt from the positional argument, `--file`, or stdin (in that order)
pub(crate) fn read_prompt(prompt: Option<&str>, file: Option<&Path>) -> Result<String> {
    if let Some(prompt) = prompt {
        return Ok(prompt.to_string());
    }

    let raw = match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read prompt file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read prompt from stdin")?;
            buf
        }
    };

    Ok(strip_trailing_newline(raw))
}

/// Load a TOML translator config; missing keys keep their defaults
pub(crate) fn load_config(path: Option<&Path>) -> Result<TranslatorConfig> {
    let path = match path {
        Some(path) => Some(path.to_path_buf()),
        None => env::var_os(CONFIG_ENV).map(PathBuf::from),
    };
    let Some(path) = path else {
        return Ok(TranslatorConfig::default());
    };

    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config {} as TOML", path.display()))?;
    log::debug!("Loaded translator config from {}", path.display());
    Ok(config)
}

fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}
