//! `jot` - CLI for jotter
//!
//! This binary manages local notes and requests AI summaries for them.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Read as _;

use anyhow::Context as _;
use clap::Parser;

use jotter::cli::shell::Shell;
use jotter::cli::{
    Cli, Command, ConfigCommand, EditCommand, NewCommand, OutputFormat, ThemeCommand,
};
use jotter::session::SummaryOutcome;
use jotter::summarize::generator_from_config;
use jotter::view::{render_editor, render_sidebar, render_summary, short_id};
use jotter::{init_logging, App, Config, Intent, Outcome, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Commands that never touch the notes database
    let command = match cli.command {
        Command::Config(config_cmd) => return handle_config(&config, config_cmd),
        command => command,
    };

    let store = Store::open(config.database_path())?;
    let mut app = App::load(store, config.summarizer.min_chars);

    match command {
        Command::New(cmd) => handle_new(&mut app, cmd),
        Command::List(cmd) => handle_list(&app, cmd.format),
        Command::Show(cmd) => handle_show(&mut app, &cmd.note, cmd.format),
        Command::Edit(cmd) => handle_edit(&mut app, cmd),
        Command::Delete(cmd) => handle_delete(&mut app, &cmd.note),
        Command::Summarize(cmd) => handle_summarize(&mut app, &config, &cmd.note).await,
        Command::Theme(theme_cmd) => handle_theme(&mut app, theme_cmd),
        Command::Status(cmd) => handle_status(&app, &config, cmd.json),
        Command::Shell => {
            let generator = generator_from_config(&config.summarizer)?;
            Shell::new(app, generator).run().await?;
            Ok(())
        }
        Command::Config(_) => Ok(()), // handled above
    }
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read stdin")?;
    Ok(buf)
}

fn handle_new(app: &mut App, cmd: NewCommand) -> anyhow::Result<()> {
    let intent = if cmd.stdin {
        Intent::AddNoteWithContent(read_stdin()?)
    } else if cmd.content.is_empty() {
        Intent::AddNote
    } else {
        Intent::AddNoteWithContent(cmd.content.join(" "))
    };

    if let Outcome::Added(id) = app.apply(intent)? {
        println!("{id}");
    }
    Ok(())
}

fn handle_list(app: &App, format: OutputFormat) -> anyhow::Result<()> {
    let rows = app.sidebar();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Plain => print!("{}", render_sidebar(&rows, &app.theme().palette())),
    }
    Ok(())
}

fn handle_show(app: &mut App, reference: &str, format: OutputFormat) -> anyhow::Result<()> {
    let id = app.resolve(reference)?;
    match format {
        OutputFormat::Json => {
            let note = app.notebook().get(&id).context("note vanished")?;
            println!("{}", serde_json::to_string_pretty(note)?);
        }
        OutputFormat::Plain => {
            app.apply(Intent::SelectNote(id))?;
            print!("{}", render_editor(&app.editor(), &app.theme().palette()));
        }
    }
    Ok(())
}

fn handle_edit(app: &mut App, cmd: EditCommand) -> anyhow::Result<()> {
    let id = app.resolve(&cmd.note)?;
    let content = match (cmd.content, cmd.file) {
        (Some(content), _) => content,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => read_stdin()?,
    };

    app.apply(Intent::UpdateContent {
        id: id.clone(),
        content,
    })?;
    println!("Updated note {}", short_id(&id));
    Ok(())
}

fn handle_delete(app: &mut App, reference: &str) -> anyhow::Result<()> {
    let id = app.resolve(reference)?;
    if app.apply(Intent::DeleteNote(id.clone()))? == Outcome::Deleted(true) {
        println!("Deleted note {}", short_id(&id));
    }
    Ok(())
}

async fn handle_summarize(app: &mut App, config: &Config, reference: &str) -> anyhow::Result<()> {
    let id = app.resolve(reference)?;
    app.apply(Intent::SelectNote(id))?;

    let generator = generator_from_config(&config.summarizer)?;
    let palette = app.theme().palette();
    match app.summarize(generator.as_ref()).await {
        SummaryOutcome::Displayed(summary) => print!("{}", render_summary(&summary, &palette)),
        SummaryOutcome::Discarded => {}
        SummaryOutcome::Rejected(reason) => {
            eprintln!("{}", palette.error.apply_to(reason));
        }
    }
    Ok(())
}

fn handle_theme(app: &mut App, cmd: ThemeCommand) -> anyhow::Result<()> {
    let intent = match cmd {
        ThemeCommand::Show => {
            println!("{}", app.theme());
            return Ok(());
        }
        ThemeCommand::Toggle => Intent::ToggleTheme,
        ThemeCommand::Set { theme } => Intent::SetTheme(theme.into()),
    };

    if let Outcome::ThemeChanged(theme) = app.apply(intent)? {
        println!("Theme: {theme}");
    }
    Ok(())
}

fn handle_status(app: &App, config: &Config, json: bool) -> anyhow::Result<()> {
    let stats = app.notebook().store().stats()?;
    let keys = app.notebook().store().keys()?;
    let key_configured = config.summarizer.resolve_api_key().is_some();

    if json {
        let status = serde_json::json!({
            "database_path": app.notebook().store().path(),
            "notes": app.notebook().len(),
            "theme": app.theme(),
            "store": stats,
            "keys": keys,
            "summarizer": {
                "model": config.summarizer.model,
                "api_key_configured": key_configured,
            },
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("jot status");
        println!("----------");
        println!("Database:      {}", app.notebook().store().path().display());
        println!("Notes:         {}", app.notebook().len());
        println!("Theme:         {}", app.theme());
        println!("Stored keys:   {} ({})", stats.total_keys, keys.join(", "));
        println!("Database size: {} bytes", stats.db_size_bytes);
        if let Some(last) = stats.last_write {
            println!("Last write:    {}", last.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        println!("Model:         {}", config.summarizer.model);
        println!(
            "API key:       {}",
            if key_configured {
                "configured".to_string()
            } else {
                format!("missing (set {})", config.summarizer.api_key_env)
            }
        );
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                let s = &config.summarizer;
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:  {}", config.database_path().display());
                println!();
                println!("[Summarizer]");
                println!("  Model:          {}", s.model);
                println!("  Base URL:       {}", s.base_url);
                println!("  API key env:    {}", s.api_key_env);
                println!("  Temperature:    {}", s.temperature);
                println!("  Top P:          {}", s.top_p);
                println!("  Top K:          {}", s.top_k);
                println!("  Min characters: {}", s.min_chars);
                println!("  Timeout (s):    {}", s.timeout_secs);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
