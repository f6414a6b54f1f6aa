use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use commands::{clear, config, list, mutate, search, shell};
use streamlist_config::{Config, PathManager};

mod app;
mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "streamlist")]
#[command(about = "StreamList - search movies and keep a list of what to stream next")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show your stream list
    List,
    /// Search the movie catalog
    #[command(long_about = "Search the movie catalog by title. Without a query, the last search is restored and run again.")]
    Search {
        /// Title to search for
        query: Vec<String>,
    },
    /// Add a movie to your stream list by catalog id
    Add {
        /// Catalog (TMDB) movie id
        id: u64,
    },
    /// Remove a movie from your stream list
    Remove {
        /// Catalog (TMDB) movie id
        id: u64,
    },
    /// Toggle the watched flag of a movie
    Watched {
        /// Catalog (TMDB) movie id
        id: u64,
    },
    /// Toggle dark mode
    DarkMode,
    /// Interactive session: search, add, mark watched and remove
    Shell,
    /// View or change configuration
    #[command(long_about = "Manage configuration and the TMDB API key. Running without a subcommand shows the current configuration.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Clear saved data, cache or credentials
    #[command(long_about = "Clear the saved stream list and preferences (--data), cached search responses (--cache), the stored API key (--credentials), or everything (--all).")]
    Clear {
        /// Clear everything
        #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["data", "cache", "credentials"])]
        all: bool,

        /// Clear the stream list, watched flags and preferences
        #[arg(long, action = ArgAction::SetTrue)]
        data: bool,

        /// Clear cached search responses
        #[arg(long, action = ArgAction::SetTrue)]
        cache: bool,

        /// Clear the stored API key
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,

        /// Do not ask for confirmation
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Store the TMDB API key
    ApiKey {
        /// API key (if not provided, will prompt)
        key: Option<String>,
    },
    /// Write a config file with default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    logging::init_logging(cli.verbose, cli.quiet, &config.logging)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &path_manager, &config, &output).await
        }
        Commands::Clear { all, data, cache, credentials, yes } => {
            clear::run_clear(all, data, cache, credentials, yes, &path_manager, &output).await
        }
        command => {
            let mut app = app::App::load(path_manager, config).wrap_err("Failed to open saved data")?;
            let output = output.with_dark_mode(app.store.dark_mode());
            app.report_load_error(&output);

            match command {
                Commands::List => list::run_list(&app, &output),
                Commands::Search { query } => search::run_search(&app, query.join(" "), &output).await,
                Commands::Add { id } => mutate::run_add(&mut app, id, &output).await,
                Commands::Remove { id } => mutate::run_remove(&mut app, id, &output),
                Commands::Watched { id } => mutate::run_toggle_watched(&mut app, id, &output),
                Commands::DarkMode => mutate::run_toggle_dark_mode(&mut app, &output),
                Commands::Shell => shell::run_shell(&mut app, &output).await,
                Commands::Config { .. } | Commands::Clear { .. } => Ok(()),
            }
        }
    }
}
