//! Command-line arguments and the command language read from stdin.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use thiserror::Error;

/// Interactive front desk for the library loan ledger
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON file with ledger settings
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the fine charged per overdue day
    #[arg(long, value_name = "AMOUNT")]
    pub fine_per_day: Option<f64>,

    /// Start with an empty catalogue instead of the sample data
    #[arg(long)]
    pub empty: bool,

    /// Print search results and reports as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// One line of desk input
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct DeskLine {
    /// The requested operation
    #[command(subcommand)]
    pub command: DeskCommand,
}

/// Operations available at the desk
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum DeskCommand {
    /// Add a book, or add copies to an existing one
    Add {
        /// Book id
        book_id: String,
        /// Title
        title: String,
        /// Author
        author: String,
        /// Genre
        genre: String,
        /// Number of copies to add
        copies: String,
    },
    /// Lend a copy of a book
    Checkout {
        /// Book id
        book_id: String,
        /// Borrower name
        borrower: String,
        /// Days until the copy is due
        due_days: String,
    },
    /// Take a copy back
    Return {
        /// Book id
        book_id: String,
        /// Borrower name
        borrower: String,
    },
    /// Find books by title, author or genre
    Search {
        /// Words to look for
        #[arg(required = true)]
        keyword: Vec<String>,
    },
    /// Books borrowed at least three times
    Popular,
    /// Loans past their due date
    Overdue,
    /// Show the whole catalogue
    Inventory,
    /// Remove a book from the catalogue
    Remove {
        /// Book id
        book_id: String,
    },
    /// Close the desk
    #[command(alias = "exit")]
    Quit,
}

/// Errors splitting an input line into words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// A double quote was opened and never closed
    #[error("unterminated quote")]
    UnterminatedQuote,
}

/// Split a line on whitespace, keeping double-quoted text together
///
/// # Errors
///
/// Returns `LineError::UnterminatedQuote` if a quote is left open.
pub fn split_line(line: &str) -> Result<Vec<String>, LineError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quoted {
        return Err(LineError::UnterminatedQuote);
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
