use super::prompts;
use crate::output::Output;
use color_eyre::Result;
use std::fs;
use streamlist_config::PathManager;
use streamlist_core::{PersistentStore, SearchCache};

pub async fn run_clear(
    all: bool,
    data: bool,
    cache: bool,
    credentials: bool,
    yes: bool,
    path_manager: &PathManager,
    output: &Output,
) -> Result<()> {
    let (data, cache, credentials) = if all { (true, true, true) } else { (data, cache, credentials) };

    if !data && !cache && !credentials {
        output.warn("No clear option specified. Use --data, --cache, --credentials, or --all");
        output.println("\nExample: streamlist clear --cache");
        return Ok(());
    }

    if data && !yes && !prompts::prompt_yes_no("This deletes your Stream List and watched flags. Continue?", Some(false))? {
        output.info("Nothing cleared");
        return Ok(());
    }

    if data {
        clear_data(path_manager, output)?;
    }
    if cache {
        clear_cache(path_manager, output)?;
    }
    if credentials {
        clear_credentials(path_manager, output)?;
    }

    if all {
        output.success("Saved data, cache, and credentials cleared");
    }
    Ok(())
}

fn clear_data(path_manager: &PathManager, output: &Output) -> Result<()> {
    let data_file = path_manager.local_storage_file();

    if !data_file.exists() {
        output.info("No saved data found to clear");
        return Ok(());
    }

    let storage = PersistentStore::open(path_manager)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to open saved data at {}: {}", data_file.display(), e))?;
    storage
        .clear()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to clear saved data at {}: {}", data_file.display(), e))?;
    output.success(format!("Cleared saved data: {}", data_file.display()));
    Ok(())
}

fn clear_cache(path_manager: &PathManager, output: &Output) -> Result<()> {
    let cache_dir = path_manager.search_cache_dir();

    if !cache_dir.exists() {
        output.info("No search cache found to clear");
        return Ok(());
    }

    let cache = SearchCache::new(path_manager)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to open search cache at {}: {}", cache_dir.display(), e))?;
    cache
        .clear()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to clear search cache at {}: {}", cache_dir.display(), e))?;
    output.success(format!("Cleared search cache: {}", cache_dir.display()));
    Ok(())
}

fn clear_credentials(path_manager: &PathManager, output: &Output) -> Result<()> {
    let credentials_file = path_manager.credentials_file();

    if credentials_file.exists() {
        fs::remove_file(&credentials_file)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to remove credentials file at {}: {}", credentials_file.display(), e))?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials file found to clear");
    }

    Ok(())
}
