//! stackit-editor - compose question and answer drafts in the terminal.
//!
//! # Usage
//!
//! ```bash
//! stackit-editor answer.md
//! stackit-editor --preview answer.md
//! stackit-editor --field description --title "Borrowing in loops" --tag rust draft.md
//! stackit-editor --render answer.md
//! ```

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;

use stackit_editor::app::App;
use stackit_editor::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use stackit_editor::{preview, submit};

/// A terminal markdown composer with undo history and HTML preview
#[derive(Parser, Debug)]
#[command(name = "stackit-editor", version, about, long_about = None)]
struct Cli {
    /// Markdown file to edit; created on first save
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Text shown while the document is empty
    #[arg(long, value_name = "TEXT")]
    placeholder: Option<String>,

    /// Minimum editor height, `<n>px` or a row count
    #[arg(long, value_name = "HEIGHT")]
    height: Option<String>,

    /// Quiet period before typing becomes an undo step
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u64>,

    /// Start in preview mode
    #[arg(long)]
    preview: bool,

    /// Print the submit payload for this field on exit (description or content)
    #[arg(long, value_name = "FIELD")]
    field: Option<String>,

    /// Question title for `--field description`
    #[arg(long, value_name = "TEXT")]
    title: Option<String>,

    /// Question tag for `--field description` (repeatable)
    #[arg(long = "tag", value_name = "NAME")]
    tags: Vec<String>,

    /// Write logs to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the HTML preview of FILE and exit
    #[arg(long)]
    render: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    init_logging(effective.log_file.as_ref())?;

    let initial = match &cli.file {
        Some(path) if path.exists() => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        _ => String::new(),
    };

    if cli.render {
        let Some(path) = &cli.file else {
            anyhow::bail!("--render needs a FILE");
        };
        if !path.exists() {
            anyhow::bail!("File not found: {}", path.display());
        }
        println!("{}", preview::render(&initial));
        return Ok(());
    }

    let config = effective.editor_config().context("Invalid configuration")?;
    let field = effective.submit_field().context("Invalid configuration")?;
    tracing::debug!(?config, ?field, "starting editor");

    let mut app = App::new(initial, config)
        .with_file(cli.file)
        .with_preview(effective.preview);
    let document = app.run().context("Application error")?;

    let Some(field) = field else {
        print!("{document}");
        return Ok(());
    };
    let title = effective.title.as_deref().unwrap_or_default();
    match submit::payload(field, &document, title, &effective.tags) {
        Ok(payload) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("Failed to encode payload")?
            );
            Ok(())
        }
        Err(err) => {
            // Keep the draft rather than losing it to a validation error.
            print!("{document}");
            Err(err).context(format!("Draft cannot be submitted as {field}"))
        }
    }
}
