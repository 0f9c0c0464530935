//! Library desk shell: reads desk commands from stdin and prints the results.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use library_ledger::{
    EventLogger, LateReturnNotifier, LedgerConfig, LibraryDesk, SharedLedger, SystemClock,
    sample::sample_ledger,
};
use serde::Serialize;
use tracing::{debug, info};

mod cli;

use cli::{Args, DeskCommand, DeskLine, split_line};

/// What the shell does after a line
#[derive(Debug)]
enum Flow {
    /// Print the text and read the next line
    Reply(String),
    /// Nothing to print
    Skip,
    /// Close the desk
    Quit,
}

fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    debug!(?args, "CLI arguments parsed");

    let config = load_config(&args)?;
    let mut ledger = sample_ledger(&config, SystemClock);
    ledger.register_observer(Box::new(EventLogger));
    ledger.register_observer(Box::new(LateReturnNotifier));
    info!(%ledger, fine_per_day = config.fine_per_day, "Library desk open");

    let desk = LibraryDesk::new(SharedLedger::new(ledger));
    let interactive = io::stdin().is_terminal();
    if interactive {
        println!("{}", "Library Manager".green().bold());
        println!("Type `help` for the list of commands.\n");
    }

    let mut stdout = io::stdout();
    let mut lines = io::stdin().lock().lines();
    loop {
        if interactive {
            print!("{} ", ">".cyan());
            stdout.flush()?;
        }
        let Some(line) = lines.next() else { break };
        match handle_line(&desk, &line?, args.json)? {
            Flow::Reply(text) => println!("{text}"),
            Flow::Skip => {}
            Flow::Quit => break,
        }
    }

    info!("Library desk closed");
    Ok(())
}

/// Resolve settings from the config file and command-line overrides
fn load_config(args: &Args) -> Result<LedgerConfig> {
    let mut config = match &args.config {
        Some(path) => LedgerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => LedgerConfig::default(),
    };
    if let Some(fine) = args.fine_per_day {
        config.fine_per_day = fine;
    }
    if args.empty {
        config.seed_sample_data = false;
    }
    config.validate()?;
    Ok(config)
}

/// Parse and run one line of input
fn handle_line(desk: &LibraryDesk, line: &str, json: bool) -> Result<Flow> {
    let words = match split_line(line) {
        Ok(words) if words.is_empty() => return Ok(Flow::Skip),
        Ok(words) => words,
        Err(err) => return Ok(Flow::Reply(err.to_string().yellow().to_string())),
    };
    match DeskLine::try_parse_from(words) {
        Ok(parsed) => run_command(desk, parsed.command, json),
        // clap renders help and usage errors itself
        Err(err) => Ok(Flow::Reply(err.render().to_string())),
    }
}

/// Run a parsed command against the desk
fn run_command(desk: &LibraryDesk, command: DeskCommand, json: bool) -> Result<Flow> {
    let text = match command {
        DeskCommand::Add { book_id, title, author, genre, copies } => {
            desk.add_update(&book_id, &title, &author, &genre, &copies)
        }
        DeskCommand::Checkout { book_id, borrower, due_days } => {
            desk.checkout(&book_id, &borrower, &due_days)
        }
        DeskCommand::Return { book_id, borrower } => desk.return_book(&book_id, &borrower),
        DeskCommand::Remove { book_id } => desk.remove(&book_id),
        DeskCommand::Search { keyword } => {
            let keyword = keyword.join(" ");
            if json { to_json(&desk.ledger().search(&keyword))? } else { desk.search(&keyword) }
        }
        DeskCommand::Popular => {
            if json { to_json(&desk.ledger().popular_report())? } else { desk.popular() }
        }
        DeskCommand::Overdue => {
            if json { to_json(&desk.ledger().overdue_report())? } else { desk.overdue() }
        }
        DeskCommand::Inventory => {
            if json { to_json(&desk.ledger().books())? } else { desk.inventory() }
        }
        DeskCommand::Quit => return Ok(Flow::Quit),
    };
    Ok(Flow::Reply(text))
}

/// Pretty JSON for report output
fn to_json(value: &impl Serialize) -> Result<String> {
    serde_json::to_string_pretty(value).context("serializing report")
}
