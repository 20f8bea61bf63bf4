//! Msgvault CLI - password-based message encryption with content-addressed
//! storage.
//!
//! This is the command-line interface for msgvault. It is a thin shim over
//! the four core service operations: encrypt, decrypt, lookup and list.
//! Run without a subcommand for the interactive menu.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use dialoguer::{Input, Password, Select};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use msgvault_core::storage::SqliteStore;
use msgvault_core::{MessageService, VERSION};

/// Msgvault - encrypt messages under a password, retrieve them by content hash
#[derive(Parser)]
#[command(name = "msgvault")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the message database
    #[arg(short, long, global = true, env = "MSGVAULT_DB", default_value = "messages.db")]
    database: PathBuf,

    /// Path to the log file
    #[arg(long, global = true, env = "MSGVAULT_LOG_FILE", default_value = "logs/msgvault.log")]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a message and store it
    Encrypt {
        /// Message text (prompted for if omitted)
        #[arg(long)]
        message: Option<String>,

        /// Optional free-form metadata stored with the message
        #[arg(long)]
        metadata: Option<String>,
    },

    /// Decrypt an encrypted blob
    Decrypt {
        /// Encrypted blob text (prompted for if omitted)
        #[arg(long)]
        blob: Option<String>,
    },

    /// Show a stored message record by content hash
    Show {
        /// Hex SHA-256 content hash
        #[arg(value_name = "HASH")]
        hash: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List stored messages
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = Cli::command();
        generate(*shell, &mut cmd, "msgvault", &mut io::stdout());
        return Ok(());
    }

    init_logging(&cli.log_file)?;

    let store = SqliteStore::open(&cli.database)?;
    let service = MessageService::new(store);
    tracing::info!(database = %cli.database.display(), "database ready");

    match cli.command {
        Some(Commands::Encrypt { message, metadata }) => {
            cmd_encrypt(&service, message, metadata, cli.quiet)
        }
        Some(Commands::Decrypt { blob }) => cmd_decrypt(&service, blob, cli.quiet),
        Some(Commands::Show { hash, json }) => cmd_show(&service, &hash, json),
        Some(Commands::List { json }) => cmd_list(&service, json, cli.quiet),
        Some(Commands::Completions { .. }) => unreachable!("handled above"),
        None => run_menu(&service),
    }
}

/// Install the global subscriber: human-readable events on stderr plus a
/// non-ANSI append-only log file, mirroring the original dual-handler setup.
fn init_logging(log_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = log_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| anyhow::anyhow!("Failed to open log file {}: {}", log_file.display(), e))?;

    let filter = EnvFilter::try_from_env("MSGVAULT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    Ok(())
}

fn cmd_encrypt(
    service: &MessageService<SqliteStore>,
    message: Option<String>,
    metadata: Option<String>,
    quiet: bool,
) -> anyhow::Result<()> {
    let message = match message {
        Some(value) => value,
        None => Input::new().with_prompt("Message").interact_text()?,
    };
    let password = resolve_password("Encryption password")?;

    let outcome = service.encrypt(&message, &password, metadata.as_deref())?;

    if quiet {
        println!("{}", outcome.message_hash);
        println!("{}", outcome.encrypted_text);
    } else {
        println!("Hash: {}", outcome.message_hash);
        println!("Encrypted: {}", outcome.encrypted_text);
    }
    Ok(())
}

fn cmd_decrypt(
    service: &MessageService<SqliteStore>,
    blob: Option<String>,
    quiet: bool,
) -> anyhow::Result<()> {
    let blob = match blob {
        Some(value) => value,
        None => Input::new().with_prompt("Encrypted blob").interact_text()?,
    };
    let password = resolve_password("Decryption password")?;

    let message = service.decrypt(&blob, &password)?;

    if !quiet {
        println!("Decrypted message:");
    }
    println!("{}", message);
    Ok(())
}

fn cmd_show(
    service: &MessageService<SqliteStore>,
    hash: &str,
    json: bool,
) -> anyhow::Result<()> {
    let record = service
        .lookup(hash)?
        .ok_or_else(|| anyhow::anyhow!("No message stored under hash {}", hash))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("Hash: {}", record.content_hash);
        println!("Created: {}", record.created_at);
        if let Some(metadata) = &record.metadata {
            println!("Metadata: {}", metadata);
        }
        println!("Encrypted: {}", record.encrypted_blob);
    }
    Ok(())
}

fn cmd_list(
    service: &MessageService<SqliteStore>,
    json: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let summaries = service.list_all()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if !quiet {
        println!("HASH | CREATED_AT | METADATA");
    }
    for summary in summaries {
        println!(
            "{} | {} | {}",
            summary.content_hash,
            summary.created_at,
            summary.metadata.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

/// Interactive menu loop over the four service operations. Errors are
/// printed and the loop continues; only "Exit" leaves it.
fn run_menu(service: &MessageService<SqliteStore>) -> anyhow::Result<()> {
    let items = [
        "Encrypt a message",
        "Decrypt a message",
        "List stored messages",
        "Exit",
    ];

    loop {
        let choice = Select::new()
            .with_prompt("Secure message vault")
            .items(&items)
            .default(0)
            .interact()?;

        let result = match choice {
            0 => menu_encrypt(service),
            1 => menu_decrypt(service),
            2 => cmd_list(service, false, false),
            _ => break,
        };

        if let Err(err) = result {
            eprintln!("Error: {}", err);
        }
    }
    Ok(())
}

fn menu_encrypt(service: &MessageService<SqliteStore>) -> anyhow::Result<()> {
    let message: String = Input::new().with_prompt("Message").interact_text()?;
    let password = resolve_password("Encryption password")?;
    let metadata: String = Input::new()
        .with_prompt("Metadata (optional)")
        .allow_empty(true)
        .interact_text()?;
    let metadata = if metadata.trim().is_empty() {
        None
    } else {
        Some(metadata)
    };

    let outcome = service.encrypt(&message, &password, metadata.as_deref())?;
    println!("Hash: {}", outcome.message_hash);
    println!("Encrypted: {}", outcome.encrypted_text);
    Ok(())
}

fn menu_decrypt(service: &MessageService<SqliteStore>) -> anyhow::Result<()> {
    let blob: String = Input::new().with_prompt("Encrypted blob").interact_text()?;
    let password = resolve_password("Decryption password")?;

    let message = service.decrypt(&blob, &password)?;
    println!("Decrypted message:");
    println!("{}", message);
    Ok(())
}

fn resolve_password(prompt: &str) -> anyhow::Result<String> {
    if let Ok(value) = std::env::var("MSGVAULT_PASSWORD") {
        if !value.trim().is_empty() {
            return Ok(value);
        }
    }
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}
