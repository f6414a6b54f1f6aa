use crate::app::App;
use crate::output::Output;
use color_eyre::Result;
use serde_json::json;

pub fn run_list(app: &App, output: &Output) -> Result<()> {
    let movies = app.store.stream_list();

    if !output.is_human() {
        let entries: Vec<_> = movies
            .iter()
            .map(|movie| {
                json!({
                    "id": movie.id,
                    "title": movie.title,
                    "release_date": movie.release_date,
                    "poster_url": movie.poster_url(&app.config.tmdb.image_base_url),
                    "watched": app.store.is_watched(movie.id),
                })
            })
            .collect();
        output.json(&json!({ "stream_list": entries, "dark_mode": app.store.dark_mode() }));
        return Ok(());
    }

    if movies.is_empty() {
        output.info("Your Stream List is empty. Search for movies to add.");
        return Ok(());
    }

    output.movie_table("My Stream List", movies, Some(app.store.watched_movies()));
    let watched = movies.iter().filter(|m| app.store.is_watched(m.id)).count();
    output.println(format!("{} movies, {} watched", movies.len(), watched));
    Ok(())
}
