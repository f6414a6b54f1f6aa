use super::search_ui::SearchSpinner;
use crate::app::App;
use crate::output::Output;
use color_eyre::Result;
use serde_json::json;
use streamlist_core::SearchOutcome;
use streamlist_models::Movie;
use streamlist_sources::MovieCatalog;
use streamlist_core::SearchSession;

pub async fn run_search(app: &App, query: String, output: &Output) -> Result<()> {
    let mut session = app.search_session()?;

    let outcome = if query.trim().is_empty() {
        if session.query().trim().is_empty() {
            output.warn("No search query given and no previous search to restore");
            output.println("\nExample: streamlist search blade runner");
            return Ok(());
        }
        output.info(format!("Restoring last search: {}", session.query()));
        run_with_spinner(&mut session, None).await
    } else {
        run_with_spinner(&mut session, Some(&query)).await
    };

    render_results(app, &session, &outcome, output);
    Ok(())
}

/// Run a search (or restore the saved one) with a spinner on screen
pub async fn run_with_spinner<C: MovieCatalog>(session: &mut SearchSession<C>, query: Option<&str>) -> SearchOutcome {
    let label = query.unwrap_or(session.query()).to_string();
    let spinner = SearchSpinner::start(format!("Searching for \"{}\"...", label.trim()));
    let outcome = match query {
        Some(query) => session.search(query).await,
        None => session.restore().await,
    };
    spinner.finish();
    outcome
}

pub fn render_results<C: MovieCatalog>(app: &App, session: &SearchSession<C>, outcome: &SearchOutcome, output: &Output) {
    if !output.is_human() {
        let results: Vec<_> = session.results().iter().map(|movie| result_json(app, movie)).collect();
        output.json(&json!({
            "query": session.query(),
            "results": results,
            "error": session.error(),
        }));
        return;
    }

    match outcome {
        SearchOutcome::Skipped => {}
        SearchOutcome::Failed { message } => output.error(message),
        SearchOutcome::Completed { count: 0 } => output.info(format!("No movies found for \"{}\"", session.query())),
        SearchOutcome::Completed { .. } => {
            output.movie_table("Title", session.results(), None);
            output.println("Add one with: streamlist add <ID>");
        }
    }
}

fn result_json(app: &App, movie: &Movie) -> serde_json::Value {
    json!({
        "id": movie.id,
        "title": movie.title,
        "release_date": movie.release_date,
        "overview": movie.overview,
        "poster_url": movie.poster_url(&app.config.tmdb.image_base_url),
        "in_stream_list": app.store.contains(movie.id),
    })
}
