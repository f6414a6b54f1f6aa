use super::prompts;
use super::search::{render_results, run_with_spinner};
use crate::app::App;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use owo_colors::OwoColorize;
use streamlist_core::SearchSession;
use streamlist_models::{Movie, MovieId};
use streamlist_sources::MovieCatalog;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    AddResult,
    ShowList,
    ToggleWatched,
    Remove,
    DarkMode,
    Dismiss,
    Quit,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::Search => "Search movies",
            Action::AddResult => "Add a search result to my Stream List",
            Action::ShowList => "Show my Stream List",
            Action::ToggleWatched => "Mark watched / unwatched",
            Action::Remove => "Remove from my Stream List",
            Action::DarkMode => "Toggle dark mode",
            Action::Dismiss => "Dismiss messages",
            Action::Quit => "Quit",
        }
    }
}

pub async fn run_shell(app: &mut App, output: &Output) -> Result<()> {
    if !output.is_human() {
        return Err(eyre!("The interactive shell only supports human output"));
    }

    let mut output = *output;
    let mut session = match app.search_session() {
        Ok(session) => Some(session),
        Err(e) => {
            warn!("Search unavailable: {}", e);
            output.warn(format!("{}. Search is disabled for this session.", e));
            None
        }
    };

    if let Some(session) = session.as_mut() {
        if !session.query().trim().is_empty() {
            let outcome = run_with_spinner(session, None).await;
            render_results(app, &*session, &outcome, &output);
        }
    }

    loop {
        app.store.notifications_mut().poll_expiry();
        render_banners(app, session.as_ref(), &output);

        let actions = available_actions(app, session.as_ref());
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let choice = prompts::prompt_select("What would you like to do?", &labels, 0)?;
        let action = actions[choice];
        debug!(?action, "Shell action selected");

        match action {
            Action::Search => {
                let Some(session) = session.as_mut() else { continue };
                let query = prompts::prompt_string("Search for a movie", Some(session.query()))?;
                let outcome = run_with_spinner(session, Some(&query)).await;
                render_results(app, &*session, &outcome, &output);
            }
            Action::AddResult => {
                let Some(session) = session.as_ref() else { continue };
                let picked = pick_movie(app, "Add which movie?", session.results())?;
                if let Some(movie) = picked.and_then(|id| session.find_result(id)).cloned() {
                    output.movie_detail(&movie, &app.config.tmdb.image_base_url);
                    app.store.add_to_stream_list(movie);
                }
            }
            Action::ShowList => {
                if app.store.stream_list().is_empty() {
                    output.info("Your Stream List is empty. Search for movies to add.");
                } else {
                    output.movie_table("My Stream List", app.store.stream_list(), Some(app.store.watched_movies()));
                }
            }
            Action::ToggleWatched => {
                let movies = app.store.stream_list().to_vec();
                if let Some(id) = pick_movie(app, "Toggle which movie?", &movies)? {
                    app.store.toggle_watched(id);
                }
            }
            Action::Remove => {
                let movies = app.store.stream_list().to_vec();
                if let Some(id) = pick_movie(app, "Remove which movie?", &movies)? {
                    app.store.remove_from_stream_list(id);
                }
            }
            Action::DarkMode => {
                let dark_mode = app.store.toggle_dark_mode();
                output = output.with_dark_mode(dark_mode);
                output.success(format!("Dark mode {}", if dark_mode { "on" } else { "off" }));
            }
            Action::Dismiss => {
                app.store.dismiss_notification();
                app.store.clear_error();
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

fn available_actions<C: MovieCatalog>(app: &App, session: Option<&SearchSession<C>>) -> Vec<Action> {
    let mut actions = Vec::new();
    if let Some(session) = session {
        actions.push(Action::Search);
        if !session.results().is_empty() {
            actions.push(Action::AddResult);
        }
    }
    actions.push(Action::ShowList);
    if !app.store.stream_list().is_empty() {
        actions.push(Action::ToggleWatched);
        actions.push(Action::Remove);
    }
    actions.push(Action::DarkMode);
    if app.store.notification().is_some() || app.store.error().is_some() {
        actions.push(Action::Dismiss);
    }
    actions.push(Action::Quit);
    actions
}

fn render_banners<C: MovieCatalog>(app: &App, session: Option<&SearchSession<C>>, output: &Output) {
    output.println("");
    if let Some(error) = app.store.error() {
        output.println(format!("{}", format!(" {} ", error).on_red().white()));
    }
    if let Some(notification) = app.store.notification() {
        output.notification(notification);
    }
    if let Some(error) = session.and_then(|s| s.error()) {
        output.error(error);
    }
}

fn pick_movie(app: &App, prompt: &str, movies: &[Movie]) -> Result<Option<MovieId>> {
    if movies.is_empty() {
        return Ok(None);
    }

    let mut labels: Vec<String> = movies
        .iter()
        .map(|movie| {
            let mut label = format!("{} ({})", movie.title, movie.display_release_date());
            if app.store.contains(movie.id) {
                label.push_str(if app.store.is_watched(movie.id) { " [watched]" } else { " [listed]" });
            }
            label
        })
        .collect();
    labels.push("Cancel".to_string());

    let choice = prompts::prompt_select(prompt, &labels, 0)?;
    Ok(movies.get(choice).map(|movie| movie.id))
}
