use clap::ValueEnum;
use comfy_table::{presets, modifiers, Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use streamlist_models::{Movie, MutationOutcome, Notification, Severity, WatchedMovies};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

#[derive(Debug, Clone, Copy)]
pub struct Output {
    format: OutputFormat,
    quiet: bool,
    dark_mode: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self {
            format,
            quiet,
            dark_mode: false,
        }
    }

    /// Same output with the palette for the given dark-mode preference
    pub fn with_dark_mode(self, dark_mode: bool) -> Self {
        Self { dark_mode, ..self }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn println(&self, msg: impl AsRef<str>) {
        if self.quiet || !self.is_human() {
            return;
        }
        println!("{}", msg.as_ref());
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => println!("{} {}", "✓".green(), msg.as_ref()),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": "success", "message": msg.as_ref() }));
            }
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors are shown even in quiet mode
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", "✗".red(), msg.as_ref()),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": "error", "message": msg.as_ref() }));
            }
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => println!("{}", msg.as_ref()),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": "info", "message": msg.as_ref() }));
            }
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => println!("{} {}", "⚠".yellow(), msg.as_ref()),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": "warning", "message": msg.as_ref() }));
            }
        }
    }

    pub fn notification(&self, notification: &Notification) {
        match notification.severity {
            Severity::Success => self.success(&notification.message),
            Severity::Error => self.error(&notification.message),
        }
    }

    /// Report a mutation outcome; outcomes without a message print nothing
    pub fn outcome(&self, outcome: &MutationOutcome) {
        if let Some(notification) = outcome.to_notification() {
            self.notification(&notification);
        }
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }

        self.print_json(data);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(data).unwrap_or_default()),
            OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(data).unwrap_or_default()),
            OutputFormat::Human => println!("{}", data),
        }
    }

    fn accent(&self) -> Color {
        if self.dark_mode {
            Color::Cyan
        } else {
            Color::DarkBlue
        }
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        if self.dark_mode {
            table.load_preset(presets::UTF8_FULL);
            table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
        } else {
            table.load_preset(presets::UTF8_FULL_CONDENSED);
        }
        table
    }

    /// Render movies as a table. With `watched` set, a watched column is shown.
    pub fn movie_table(&self, title: &str, movies: &[Movie], watched: Option<&WatchedMovies>) {
        if self.quiet {
            return;
        }

        let mut table = self.table();
        let mut header = vec![
            Cell::new("ID").fg(self.accent()).add_attribute(Attribute::Bold),
            Cell::new(title).fg(self.accent()).add_attribute(Attribute::Bold),
            Cell::new("Release Date").fg(self.accent()).add_attribute(Attribute::Bold),
        ];
        if watched.is_some() {
            header.push(Cell::new("Watched").fg(self.accent()).add_attribute(Attribute::Bold));
        }
        table.set_header(header);

        for movie in movies {
            let mut row = vec![
                Cell::new(movie.id),
                Cell::new(&movie.title),
                Cell::new(movie.display_release_date()),
            ];
            if let Some(flags) = watched {
                let is_watched = flags.get(&movie.id).copied().unwrap_or(false);
                row.push(if is_watched {
                    Cell::new("✓").fg(Color::Green)
                } else {
                    Cell::new("-")
                });
            }
            table.add_row(row);
        }

        println!("{}", table);
    }

    pub fn movie_detail(&self, movie: &Movie, image_base_url: &str) {
        if self.quiet {
            return;
        }

        println!("{} {}", movie.title.bold(), format!("({})", movie.display_release_date()).bright_black());
        println!("  {}", movie.display_overview());
        match movie.poster_url(image_base_url) {
            Some(url) => println!("  Poster: {}", url),
            None => println!("  Poster: No Image"),
        }
    }

    pub fn key_value_table(&self, title: &str, rows: &[(&str, String)]) {
        if self.quiet {
            return;
        }

        let mut table = self.table();
        table.set_header(vec![Cell::new(title).fg(self.accent()).add_attribute(Attribute::Bold)]);
        for (key, value) in rows {
            table.add_row(vec![Cell::new(key), Cell::new(value)]);
        }
        println!("{}", table);
    }
}
