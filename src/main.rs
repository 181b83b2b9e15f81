//! nabaztag-notifier: tell Nabaztag rabbits about build events.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use nabaztag_notifier::command::{ACTION_SELECTED_LANGUAGES, ACTION_SUPPORTED_VOICES};
use nabaztag_notifier::message::NotificationContext;
use nabaztag_notifier::{
    BuildEvent, Config, DryRunTransport, HttpTransport, NotificationDispatcher, RecipientConfig,
    Transport,
};

#[derive(Parser, Debug)]
#[command(name = "nabaztag-notifier", about = "Build notifications spoken by a Nabaztag")]
struct Args {
    /// Path to config.yaml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log URLs instead of calling the Nabaztag API
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read a build event as JSON and notify every configured recipient
    Notify {
        /// Event file (reads stdin when omitted)
        #[arg(short, long)]
        event: Option<PathBuf>,
    },
    /// Ask a recipient's rabbit which voices it supports
    Voices {
        #[arg(short, long)]
        recipient: String,
    },
    /// Ask a recipient's rabbit which languages are selected
    Languages {
        #[arg(short, long)]
        recipient: String,
    },
    /// Print the URL a recipient would be sent for an event
    Preview {
        #[arg(short, long)]
        event: Option<PathBuf>,
        #[arg(short, long)]
        recipient: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug,reqwest=info")
    } else {
        EnvFilter::new("info,reqwest=warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match args.config.as_deref() {
        Some(path) => Config::from_file(path)?,
        None => Config::load(None),
    };

    let transport: Box<dyn Transport> = if args.dry_run {
        Box::new(DryRunTransport)
    } else {
        Box::new(HttpTransport::new(&config.http))
    };
    let mut dispatcher = NotificationDispatcher::new(transport, config.http.clone());

    match args.command {
        Command::Notify { event } => {
            let event = read_event(event.as_deref())?;
            dispatcher.dispatch(&event, &config.recipients);
        }
        Command::Voices { recipient } => {
            let recipient = find_recipient(&config, &recipient)?;
            let body = dispatcher.send_action(recipient, ACTION_SUPPORTED_VOICES)?;
            println!("{body}");
        }
        Command::Languages { recipient } => {
            let recipient = find_recipient(&config, &recipient)?;
            let body = dispatcher.send_action(recipient, ACTION_SELECTED_LANGUAGES)?;
            println!("{body}");
        }
        Command::Preview { event, recipient } => {
            let event = read_event(event.as_deref())?;
            let recipient = find_recipient(&config, &recipient)?;
            let context = NotificationContext::from_event(&event);
            let command = dispatcher.command_for(&context, recipient)?;
            println!("{}", dispatcher.request_url(&command));
        }
    }

    Ok(())
}

fn read_event(path: Option<&Path>) -> Result<BuildEvent, Box<dyn std::error::Error>> {
    let input = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            input
        }
    };
    let event: BuildEvent = serde_json::from_str(&input)?;
    info!("Received '{}' for {}", event.kind, event.project);
    Ok(event)
}

fn find_recipient<'a>(
    config: &'a Config,
    name: &str,
) -> Result<&'a RecipientConfig, Box<dyn std::error::Error>> {
    config
        .recipient(name)
        .ok_or_else(|| format!("Unknown recipient: {name}").into())
}
