//! Front-desk operations: raw text fields in, patron-facing messages out.
//!
//! Failures never escape a desk method; they become messages too.

use tracing::debug;

use crate::{
    error::{LedgerError, LedgerResult},
    ledger::StockUpdate,
    report::ReportFormatter,
    shared::SharedLedger,
};

/// Maps raw requests onto a [`SharedLedger`]
#[derive(Debug, Clone)]
pub struct LibraryDesk {
    /// Ledger every request runs against
    ledger: SharedLedger,
}

impl LibraryDesk {
    /// Serve requests against `ledger`
    #[must_use]
    pub fn new(ledger: SharedLedger) -> Self {
        Self { ledger }
    }

    /// The underlying ledger handle
    #[must_use]
    pub fn ledger(&self) -> &SharedLedger {
        &self.ledger
    }

    /// Add a book or restock an existing one
    #[must_use]
    pub fn add_update(
        &self,
        book_id: &str,
        title: &str,
        author: &str,
        genre: &str,
        copies: &str,
    ) -> String {
        let result = parse_count("copies", copies).and_then(|copies| {
            self.ledger.add_or_update_book(book_id, title, author, genre, copies)
        });
        match result {
            Ok(StockUpdate::Added) => format!("Book {title} added successfully."),
            Ok(StockUpdate::Updated) => format!("Book {title} updated successfully."),
            Err(err) => error_message(&err),
        }
    }

    /// Lend a copy for `due_days` days
    #[must_use]
    pub fn checkout(&self, book_id: &str, borrower: &str, due_days: &str) -> String {
        let result = parse_count("due days", due_days)
            .and_then(|days| self.ledger.checkout(book_id, borrower, days));
        match result {
            Ok(due_date) => format!("Book checked out successfully. Due date: {due_date}"),
            Err(err) => error_message(&err),
        }
    }

    /// Take a copy back and report any fine
    #[must_use]
    pub fn return_book(&self, book_id: &str, borrower: &str) -> String {
        match self.ledger.return_book(book_id, borrower) {
            Ok(receipt) => ReportFormatter::return_message(&receipt),
            Err(err) => error_message(&err),
        }
    }

    /// Remove a book from the catalogue
    #[must_use]
    pub fn remove(&self, book_id: &str) -> String {
        match self.ledger.remove_book(book_id) {
            Ok(book) => format!("Book {} removed.", book.title),
            Err(err) => error_message(&err),
        }
    }

    /// Keyword search over title, author and genre
    #[must_use]
    pub fn search(&self, keyword: &str) -> String {
        ReportFormatter::search_results(&self.ledger.search(keyword))
    }

    /// Books borrowed often
    #[must_use]
    pub fn popular(&self) -> String {
        ReportFormatter::popular(&self.ledger.popular_report())
    }

    /// Loans past their due date
    #[must_use]
    pub fn overdue(&self) -> String {
        ReportFormatter::overdue(&self.ledger.overdue_report())
    }

    /// The whole catalogue as a table
    #[must_use]
    pub fn inventory(&self) -> String {
        ReportFormatter::inventory_table(&self.ledger.books())
    }
}

/// Parse a positive whole number from a form field
///
/// # Errors
///
/// Returns `LedgerError::InvalidInput` unless `raw` is an integer of at least 1.
pub fn parse_count(field: &str, raw: &str) -> LedgerResult<u32> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(LedgerError::InvalidInput(format!("{field} must be at least 1"))),
        Ok(value) => Ok(value),
        Err(err) => {
            debug!(%field, %raw, %err, "rejected numeric field");
            Err(LedgerError::InvalidInput(format!("{field} must be a whole number, got '{raw}'")))
        }
    }
}

/// The message a patron sees for a failed request
#[must_use]
pub fn error_message(err: &LedgerError) -> String {
    match err {
        LedgerError::InvalidInput(detail) => format!("Invalid input: {detail}"),
        LedgerError::NotFound(_) => "Book not found.".to_string(),
        LedgerError::NoCopiesAvailable(_) => "No copies available.".to_string(),
        LedgerError::TransactionNotFound { .. } => "Transaction not found.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{clock::ManualClock, ledger::LoanLedger};

    fn desk() -> (LibraryDesk, ManualClock) {
        let clock = ManualClock::new(NaiveDate::from_ymd_opt(2024, 5, 20).unwrap_or_default());
        let desk = LibraryDesk::new(SharedLedger::new(LoanLedger::new(clock.clone())));
        (desk, clock)
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("copies", " 3 "), Ok(3));
        assert!(matches!(parse_count("copies", "0"), Err(LedgerError::InvalidInput(_))));
        assert!(matches!(parse_count("copies", "-2"), Err(LedgerError::InvalidInput(_))));
        assert!(matches!(parse_count("copies", "three"), Err(LedgerError::InvalidInput(_))));
    }

    #[test]
    fn test_add_then_update_messages() {
        let (desk, _) = desk();
        assert_eq!(
            desk.add_update("B010", "New Title", "Auth", "Genre", "3"),
            "Book New Title added successfully."
        );
        assert_eq!(
            desk.add_update("B010", "Renamed", "Auth", "Genre", "2"),
            "Book Renamed updated successfully."
        );
        let book = desk.ledger().book("B010");
        assert!(matches!(book, Some(b) if b.copies == 5 && b.title == "New Title"));
    }

    #[test]
    fn test_invalid_numbers_leave_ledger_alone() {
        let (desk, _) = desk();
        let message = desk.add_update("B010", "New Title", "Auth", "Genre", "lots");
        assert!(message.starts_with("Invalid input:"));
        assert!(desk.ledger().books().is_empty());

        assert!(desk.add_update("B010", "New Title", "Auth", "Genre", "1").contains("added"));
        assert!(desk.checkout("B010", "Dana", "0").starts_with("Invalid input:"));
        assert!(desk.ledger().loans().is_empty());
    }

    #[test]
    fn test_checkout_messages() {
        let (desk, _) = desk();
        assert_eq!(desk.checkout("B404", "Dana", "7"), "Book not found.");

        drop(desk.add_update("B010", "New Title", "Auth", "Genre", "1"));
        assert_eq!(
            desk.checkout("B010", "Dana", "7"),
            "Book checked out successfully. Due date: 2024-05-27"
        );
        assert_eq!(desk.checkout("B010", "Eve", "7"), "No copies available.");
    }

    #[test]
    fn test_return_messages() {
        let (desk, clock) = desk();
        drop(desk.add_update("B010", "New Title", "Auth", "Genre", "2"));
        drop(desk.checkout("B010", "Dana", "1"));
        drop(desk.checkout("B010", "Eve", "1"));

        assert_eq!(desk.return_book("B010", "Zed"), "Transaction not found.");
        assert_eq!(desk.return_book("B010", "Dana"), "Book returned on time. No fine.");

        clock.advance(4);
        assert_eq!(desk.return_book("B010", "Eve"), "Book returned late. Fine: 6.0");
    }

    #[test]
    fn test_empty_results() {
        let (desk, _) = desk();
        assert_eq!(desk.search("anything"), "No matching books found.");
        assert_eq!(desk.popular(), "No popular books yet.");
        assert_eq!(desk.overdue(), "No overdue books.");
        assert_eq!(desk.remove("B404"), "Book not found.");
    }
}
