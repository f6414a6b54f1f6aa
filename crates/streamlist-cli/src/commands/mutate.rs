use super::search_ui::SearchSpinner;
use crate::app::App;
use crate::output::Output;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use serde_json::json;
use streamlist_models::{MovieId, MutationOutcome};

pub async fn run_add(app: &mut App, id: MovieId, output: &Output) -> Result<()> {
    // Already listed: no need to ask the catalog for details
    let listed = app.store.stream_list().iter().find(|m| m.id == id).cloned();

    let movie = match listed {
        Some(movie) => movie,
        None => {
            let catalog = app.catalog()?;
            let spinner = SearchSpinner::start(format!("Looking up movie {}...", id));
            let details = catalog.movie_details(id).await;
            spinner.finish();
            details.wrap_err_with(|| format!("Failed to look up movie {}", id))?
        }
    };

    if output.is_human() {
        output.movie_detail(&movie, &app.config.tmdb.image_base_url);
    }
    let outcome = app.store.add_to_stream_list(movie);
    report(app, id, &outcome, output)
}

pub fn run_remove(app: &mut App, id: MovieId, output: &Output) -> Result<()> {
    if !app.store.contains(id) {
        output.warn(format!("Movie {} is not in your Stream List", id));
    }
    let outcome = app.store.remove_from_stream_list(id);
    report(app, id, &outcome, output)
}

pub fn run_toggle_watched(app: &mut App, id: MovieId, output: &Output) -> Result<()> {
    if !app.store.contains(id) {
        output.warn(format!("Movie {} is not in your Stream List", id));
    }
    let outcome = app.store.toggle_watched(id);
    report(app, id, &outcome, output)
}

pub fn run_toggle_dark_mode(app: &mut App, output: &Output) -> Result<()> {
    let dark_mode = app.store.toggle_dark_mode();

    if output.is_human() {
        let state = if dark_mode { "on" } else { "off" };
        output.with_dark_mode(dark_mode).success(format!("Dark mode {}", state));
    } else {
        output.json(&json!({ "dark_mode": dark_mode }));
    }
    Ok(())
}

fn report(app: &App, id: MovieId, outcome: &MutationOutcome, output: &Output) -> Result<()> {
    if output.is_human() {
        output.outcome(outcome);
    } else {
        output.json(&json!({
            "id": id,
            "success": outcome.success,
            "message": outcome.message,
            "in_stream_list": app.store.contains(id),
            "watched": app.store.is_watched(id),
        }));
    }

    match app.store.error() {
        Some(error) if !outcome.success => Err(eyre!("{}", error)),
        _ => Ok(()),
    }
}
