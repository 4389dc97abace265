// FILE: crates/cli/src/commands.rs

use anyhow::{bail, Context, Result};
use auralis_app::{engine_from_config, AppCoordinator, CoordinatorSettings};
use auralis_config::{Config, ConfigManager};
use auralis_core::{format_clock, format_short, AppError, Book, BookId};
use auralis_insight::GeminiClient;
use auralis_library::{FileStore, LibraryPersistence, LibraryStore};
use clap::ArgMatches;
use console::style;
use media_engine::SimulatedBackend;
use std::path::PathBuf;

/// Length assumed for session files the simulated backend knows nothing about
const LOCAL_FILE_DURATION_SECS: f64 = 3600.0;

pub type Coordinator = AppCoordinator<FileStore, SimulatedBackend>;

/// Resolved configuration and storage location for one invocation
pub struct Environment {
    pub manager: ConfigManager,
    pub config: Config,
    pub data_dir: PathBuf,
}

impl Environment {
    /// Loads the config (with env overrides); `data_dir` wins over the file
    pub fn resolve(config_dir: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<Self> {
        let manager = match config_dir {
            Some(dir) => ConfigManager::with_directory(dir),
            None => ConfigManager::new(),
        }
        .context("Failed to locate configuration directory")?;

        let config = manager
            .load_with_env_overrides()
            .context("Failed to load configuration")?;

        let data_dir = match data_dir {
            Some(dir) => dir,
            None => manager
                .data_dir(&config)
                .context("Failed to resolve data directory")?,
        };

        Ok(Self {
            manager,
            config,
            data_dir,
        })
    }

    /// Opens the library on disk and wires a coordinator around it
    pub fn open_coordinator(&self) -> Result<Coordinator> {
        log::debug!("Opening library at {}", self.data_dir.display());
        let store = FileStore::open(&self.data_dir).with_context(|| {
            format!("Failed to open library at {}", self.data_dir.display())
        })?;
        let library = LibraryStore::open(LibraryPersistence::new(store));

        let mut backend = SimulatedBackend::new(LOCAL_FILE_DURATION_SECS);
        for book in library.books().iter().filter(|b| b.has_known_duration()) {
            backend.set_source_duration(book.file_url.clone(), book.duration);
        }

        let engine = engine_from_config(backend, &self.config.player);
        let settings = CoordinatorSettings::from(&self.config.player);
        Ok(AppCoordinator::start(library, engine, settings))
    }
}

/// Selects `id` when given, otherwise requires a restored selection
pub fn select_or_active(coordinator: &mut Coordinator, id: Option<&String>) -> Result<Book> {
    if let Some(id) = id {
        coordinator
            .select_book(&BookId::from(id.as_str()))
            .with_context(|| format!("Cannot select book {}", id))?;
    }

    match coordinator.active_book() {
        Some(book) => Ok(book.clone()),
        None => Err(AppError::no_active_book("this command").into()),
    }
}

/// List all books in the library
pub fn list_books(env: &Environment) -> Result<()> {
    let coordinator = env.open_coordinator()?;
    let library = coordinator.library();

    if library.is_empty() {
        println!("Library is empty. Use 'play --files' to listen to local audio files.");
        return Ok(());
    }

    println!("\n{} Books in Library", style(library.len()).bold().cyan());
    println!("{}", "=".repeat(80));

    for book in library.books() {
        let active = coordinator.active_id() == Some(&book.id);
        print_book_summary(book, active);
    }

    Ok(())
}

/// Remove a book from the library
pub fn remove_book(env: &Environment, matches: &ArgMatches) -> Result<()> {
    let id = matches
        .get_one::<String>("id")
        .ok_or_else(|| anyhow::anyhow!("Book ID is required"))?;
    let book_id = BookId::from(id.as_str());

    let mut coordinator = env.open_coordinator()?;
    if !coordinator.library().contains(&book_id) {
        return Err(AppError::BookNotFound { id: id.clone() }.into());
    }

    let prompt = coordinator.request_delete(&book_id);
    if !matches.get_flag("yes") {
        println!("{} (y/N)", prompt);
        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read input")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            coordinator.cancel_delete();
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    match coordinator.confirm_delete()? {
        Some(book) => {
            println!("{} Removed: {}", style("✓").green().bold(), book.title);
            Ok(())
        }
        None => bail!("Failed to remove {}", id),
    }
}

/// Generate and print a synopsis for a book
pub async fn show_insight(env: &Environment, matches: &ArgMatches) -> Result<()> {
    let mut coordinator = env.open_coordinator()?;
    let book = select_or_active(&mut coordinator, matches.get_one::<String>("id"))?;

    let client = GeminiClient::from_section(&env.config.insight)
        .context("Failed to create insight client")?;

    println!(
        "Analysing {} by {}...",
        style(&book.title).bold(),
        style(&book.author).dim()
    );
    coordinator.request_insight(&client).await;

    let view = coordinator.insight_view();
    if let Some(message) = &view.error {
        return Err(AppError::Insight {
            message: message.clone(),
        }
        .into());
    }
    let Some(insight) = &view.result else {
        bail!("The AI returned no answer.");
    };

    println!("\n{}", style("Summary").bold().cyan());
    println!("  {}", insight.summary);
    if !insight.themes.is_empty() {
        println!("\n{}", style("Themes").bold().cyan());
        for theme in &insight.themes {
            println!("  - {}", theme);
        }
    }
    if !insight.characters.is_empty() {
        println!("\n{}", style("Characters").bold().cyan());
        for character in &insight.characters {
            println!("  - {}", character);
        }
    }
    println!();

    Ok(())
}

/// Print the effective configuration
pub fn show_config(env: &Environment) -> Result<()> {
    let config = &env.config;
    let exists = env.manager.config_path().exists();

    println!("\n{}", style("Configuration").bold().cyan());
    println!("{}", "=".repeat(80));
    println!(
        "  File:          {}{}",
        env.manager.config_path().display(),
        if exists { "" } else { " (not found, using defaults)" }
    );
    println!("  Data dir:      {}", env.data_dir.display());

    println!("\n{}", style("[player]").bold());
    println!("  Volume:        {}%", config.player.default_volume);
    println!("  Speed:         {}x", config.player.default_speed);
    println!(
        "  Skip:          -{}s / +{}s",
        config.player.skip_back_secs, config.player.skip_forward_secs
    );
    println!("  Save every:    {}s of progress", config.player.progress_threshold_secs);
    println!("  Sleep presets: {:?} min", config.player.sleep_timer_presets);

    println!("\n{}", style("[insight]").bold());
    println!("  Endpoint:      {}", config.insight.endpoint);
    println!("  Model:         {}", config.insight.model);
    println!("  Language:      {}", config.insight.language);
    println!(
        "  API key:       {}",
        if config.insight.resolve_api_key().is_some() {
            style("configured".to_string()).green()
        } else {
            style(format!("missing (set {})", config.insight.api_key_env)).yellow()
        }
    );
    println!();

    Ok(())
}

fn print_book_summary(book: &Book, active: bool) {
    let marker = if active { style("▶").green().bold() } else { style(" ").dim() };
    println!("\n{} {}", marker, style(&book.title).bold());
    println!("  ID:       {}", style(&book.id).dim());
    println!("  Author:   {}", book.author);

    if book.has_known_duration() {
        println!(
            "  Progress: {} / {} ({:.0}%, {} left)",
            format_clock(book.current_time),
            format_clock(book.duration),
            book.progress_percent(),
            format_short(book.remaining_seconds())
        );
    } else {
        println!("  Progress: {}", format_clock(book.current_time));
    }
}
