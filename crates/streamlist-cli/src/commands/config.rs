use super::prompts;
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use streamlist_config::{Config, CredentialStore, PathManager};

pub async fn run_config(cmd: ConfigCommands, path_manager: &PathManager, config: &Config, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, path_manager, config, output),
        ConfigCommands::ApiKey { key } => configure_api_key(key, path_manager, output),
        ConfigCommands::Init { force } => init_config(force, path_manager, output),
    }
}

fn show_config(full: bool, path_manager: &PathManager, config: &Config, output: &Output) -> Result<()> {
    let config_file = path_manager.config_file();
    let credentials_file = path_manager.credentials_file();

    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    let api_key = cred_store.resolve_tmdb_api_key().unwrap_or_default();
    let api_key_display = if full { api_key.clone() } else { mask_string(&api_key) };

    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.display().to_string());

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "config_file_exists": config_file.exists(),
            "data_file": path_manager.local_storage_file().display().to_string(),
            "tmdb": {
                "base_url": config.tmdb.base_url,
                "image_base_url": config.tmdb.image_base_url,
                "timeout_seconds": config.tmdb.timeout_seconds,
                "api_key": api_key_display,
            },
            "notifications": { "timeout_ms": config.notifications.timeout_ms },
            "cache": { "offline_search": config.cache.offline_search },
            "logging": {
                "level": config.logging.level,
                "json": config.logging.json,
                "file": log_file,
            },
        }));
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!("Configuration file not found at: {}", config_file.display()));
        output.info("Using defaults. Run 'streamlist config init' to write them to disk.");
        output.println("");
    }

    output.key_value_table(
        "Files",
        &[
            ("Config File", config_file.display().to_string()),
            ("Saved Data", path_manager.local_storage_file().display().to_string()),
            ("Search Cache", path_manager.search_cache_dir().display().to_string()),
        ],
    );
    output.key_value_table(
        "TMDB",
        &[
            ("Base URL", config.tmdb.base_url.clone()),
            ("Image Base URL", config.tmdb.image_base_url.clone()),
            ("Timeout", format!("{} seconds", config.tmdb.timeout_seconds)),
            ("API Key", api_key_display),
        ],
    );
    output.key_value_table(
        "Behavior",
        &[
            ("Notification Timeout", format!("{} ms", config.notifications.timeout_ms)),
            ("Offline Search", enabled_marker(config.cache.offline_search)),
            ("Log Level", config.logging.level.clone()),
            ("JSON Logs", enabled_marker(config.logging.json)),
            ("Log File", log_file.unwrap_or_else(|| "<stderr>".to_string())),
        ],
    );

    Ok(())
}

fn configure_api_key(key_arg: Option<String>, path_manager: &PathManager, output: &Output) -> Result<()> {
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;

    let key = match key_arg {
        Some(key) => key,
        None => {
            print_section_header("TMDB API Setup", output);
            output.println("Create a free API key at https://www.themoviedb.org/settings/api");
            output.println("");
            loop {
                let input = prompts::prompt_password("TMDB API Key")?;
                match validate_api_key(&input) {
                    Ok(()) => break input,
                    Err(e) => output.error(format!("Validation error: {}", e)),
                }
            }
        }
    };

    validate_api_key(&key).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let credentials_file = path_manager.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    cred_store.set_tmdb_api_key(key.trim().to_string());
    cred_store
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials to {}: {}", credentials_file.display(), e))?;

    output.success(format!("TMDB API key saved to {}", credentials_file.display()));
    Ok(())
}

fn init_config(force: bool, path_manager: &PathManager, output: &Output) -> Result<()> {
    let config_file = path_manager.config_file();

    if config_file.exists() && !force {
        output.warn(format!("Configuration file already exists at: {}", config_file.display()));
        output.info("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    if s.len() <= 4 {
        return "*".repeat(s.len());
    }
    let head: String = s.chars().take(2).collect();
    let tail: String = s.chars().rev().take(2).collect::<Vec<_>>().into_iter().rev().collect();
    format!("{}***{}", head, tail)
}

fn enabled_marker(enabled: bool) -> String {
    if enabled {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}

fn validate_api_key(input: &str) -> Result<(), &'static str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("API key cannot be empty");
    }
    if trimmed.len() < 16 {
        return Err("API key seems too short. Please verify it's correct.");
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err("API key cannot contain spaces");
    }
    Ok(())
}

fn print_section_header(title: &str, output: &Output) {
    output.println("");
    output.println(format!("{}", title.bold().bright_cyan()));
    output.println(format!("{}", "─".repeat(title.len()).bright_cyan()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abcd"), "****");
        assert_eq!(mask_string("abcdef123456"), "ab***56");
    }

    #[test]
    fn test_validate_api_key() {
        assert!(validate_api_key("   ").is_err());
        assert!(validate_api_key("short").is_err());
        assert!(validate_api_key("0123456789abcdef 01").is_err());
        assert!(validate_api_key(" 0123456789abcdef0123456789abcdef ").is_ok());
    }
}
