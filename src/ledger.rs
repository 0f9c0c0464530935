use std::{collections::HashMap, fmt};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    book::{Book, Loan},
    clock::Clock,
    config::{FINE_PER_DAY, LedgerConfig, POPULAR_THRESHOLD},
    error::{LedgerError, LedgerResult},
    events::LedgerEvent,
    observers::LedgerObserver,
};

/// Whether an add/update call created a book or restocked an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum StockUpdate {
    /// A new book entered the catalogue
    Added,
    /// Copies were added to an existing book
    Updated,
}

/// Outcome of a successful return
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReturnReceipt {
    /// Id of the returned book
    pub book_id: String,
    /// Patron who returned it
    pub borrower: String,
    /// Date the copy was due
    pub due_date: NaiveDate,
    /// Date the copy came back
    pub returned_on: NaiveDate,
    /// Whole days past the due date
    pub overdue_days: u32,
    /// Fine owed for a late return; informational only
    pub fine: Option<f64>,
}

impl ReturnReceipt {
    /// Whether the copy came back after its due date
    #[must_use]
    pub fn is_late(&self) -> bool {
        self.overdue_days > 0
    }
}

/// A row of the popular-books report
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PopularEntry {
    /// Book id
    pub book_id: String,
    /// Book title
    pub title: String,
    /// Lifetime checkouts
    pub borrowed: u32,
}

/// A row of the overdue-loans report
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OverdueEntry {
    /// Id of the borrowed book
    pub book_id: String,
    /// Current title, `None` if the book has since been removed
    pub title: Option<String>,
    /// Patron holding the copy
    pub borrower: String,
    /// Date the copy was due
    pub due_date: NaiveDate,
}

/// In-memory catalogue of books and the loans made against it
pub struct LoanLedger {
    /// Books in insertion order
    books: Vec<Book>,
    /// Book id to position in `books`
    index: HashMap<String, usize>,
    /// Every loan ever made, in insertion order
    loans: Vec<Loan>,
    /// Source of "today"
    clock: Box<dyn Clock>,
    /// Registered event observers
    observers: Vec<Box<dyn LedgerObserver>>,
    /// Fine per overdue day
    fine_per_day: f64,
    /// Lifetime checkouts needed for the popular report
    popular_threshold: u32,
}

// Manual implementation of Debug for LoanLedger
impl fmt::Debug for LoanLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoanLedger")
            .field("books", &self.books)
            .field("loans", &self.loans)
            .field("clock", &self.clock)
            .field("observers_count", &self.observers.len())
            .field("fine_per_day", &self.fine_per_day)
            .field("popular_threshold", &self.popular_threshold)
            .finish_non_exhaustive()
    }
}

impl LoanLedger {
    /// Create an empty ledger with the default fine rate and popularity threshold
    #[must_use]
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            books: Vec::new(),
            index: HashMap::new(),
            loans: Vec::new(),
            clock: Box::new(clock),
            observers: Vec::new(),
            fine_per_day: FINE_PER_DAY,
            popular_threshold: POPULAR_THRESHOLD,
        }
    }

    /// Create an empty ledger using the policy in `config`.
    ///
    /// `seed_sample_data` is not applied here; see [`crate::sample::sample_ledger`].
    #[must_use]
    pub fn with_config(config: &LedgerConfig, clock: impl Clock + 'static) -> Self {
        let mut ledger = Self::new(clock);
        ledger.fine_per_day = config.fine_per_day;
        ledger.popular_threshold = config.popular_threshold;
        ledger
    }

    /// Register an observer to be notified of every applied change
    pub fn register_observer(&mut self, observer: Box<dyn LedgerObserver>) {
        self.observers.push(observer);
    }

    /// The date the ledger currently considers "today"
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Fine charged per overdue day
    #[must_use]
    pub fn fine_per_day(&self) -> f64 {
        self.fine_per_day
    }

    /// Notify all observers of an applied change
    fn notify(&self, event: &LedgerEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }

    /// Add a new book, or add copies to an existing one.
    ///
    /// For an existing id only the stock changes; the stored title, author and
    /// genre are kept even if different values are passed.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidInput` if a text field is blank, `copies` is
    /// zero, or the new stock would overflow.
    pub fn add_or_update_book(
        &mut self,
        book_id: &str,
        title: &str,
        author: &str,
        genre: &str,
        copies: u32,
    ) -> LedgerResult<StockUpdate> {
        require_text("book id", book_id)?;
        require_text("title", title)?;
        require_text("author", author)?;
        require_text("genre", genre)?;
        if copies == 0 {
            return Err(LedgerError::InvalidInput("copies must be at least 1".to_string()));
        }

        if let Some(book) = self.index.get(book_id).and_then(|&pos| self.books.get_mut(pos)) {
            let total = book.copies.checked_add(copies).ok_or_else(|| {
                LedgerError::InvalidInput(format!("too many copies of book {book_id}"))
            })?;
            book.copies = total;
            self.notify(&LedgerEvent::StockAdded {
                book_id: book_id.to_string(),
                added: copies,
                copies: total,
            });
            return Ok(StockUpdate::Updated);
        }

        self.insert_book(Book::new(book_id, title, author, genre, copies));
        self.notify(&LedgerEvent::BookAdded { book_id: book_id.to_string(), copies });
        Ok(StockUpdate::Added)
    }

    /// Take a book out of the catalogue. Its loans stay on record.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if no book has this id.
    pub fn remove_book(&mut self, book_id: &str) -> LedgerResult<Book> {
        let pos =
            self.index.remove(book_id).ok_or_else(|| LedgerError::NotFound(book_id.to_string()))?;
        let book = self.books.remove(pos);
        self.reindex();
        self.notify(&LedgerEvent::BookRemoved { book_id: book.id.clone() });
        Ok(book)
    }

    /// Lend one copy of a book, due back `due_days` from today.
    ///
    /// Returns the due date.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidInput` for a blank borrower, zero `due_days`
    /// or a due date past the end of the calendar, `LedgerError::NotFound` for an
    /// unknown book and `LedgerError::NoCopiesAvailable` when no copy is on the shelf.
    pub fn checkout(
        &mut self,
        book_id: &str,
        borrower: &str,
        due_days: u32,
    ) -> LedgerResult<NaiveDate> {
        require_text("borrower", borrower)?;
        if due_days == 0 {
            return Err(LedgerError::InvalidInput("due days must be at least 1".to_string()));
        }
        let due_date = self
            .clock
            .today()
            .checked_add_days(Days::new(u64::from(due_days)))
            .ok_or_else(|| LedgerError::InvalidInput(format!("{due_days} due days is too far")))?;

        let Some(book) = self.index.get(book_id).and_then(|&pos| self.books.get_mut(pos)) else {
            debug!(%book_id, "checkout of unknown book");
            return Err(LedgerError::NotFound(book_id.to_string()));
        };
        if !book.is_available() {
            debug!(%book_id, "checkout with no copies on the shelf");
            return Err(LedgerError::NoCopiesAvailable(book_id.to_string()));
        }

        book.copies = book.copies.saturating_sub(1);
        book.borrowed = book.borrowed.saturating_add(1);
        self.loans.push(Loan::new(book_id, borrower, due_date));

        self.notify(&LedgerEvent::CheckedOut {
            book_id: book_id.to_string(),
            borrower: borrower.to_string(),
            due_date,
        });
        Ok(due_date)
    }

    /// Close the borrower's earliest open loan of the book and restock one copy.
    ///
    /// If the book has been removed since, the loan is still closed but no stock is
    /// restored.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::TransactionNotFound` if the borrower holds no open loan
    /// of this book.
    pub fn return_book(&mut self, book_id: &str, borrower: &str) -> LedgerResult<ReturnReceipt> {
        let today = self.clock.today();
        let Some(loan) = self.loans.iter_mut().find(|loan| loan.is_open_for(book_id, borrower))
        else {
            debug!(%book_id, %borrower, "return without an open loan");
            return Err(LedgerError::TransactionNotFound {
                book_id: book_id.to_string(),
                borrower: borrower.to_string(),
            });
        };

        loan.returned = true;
        let due_date = loan.due_date;
        let overdue_days = loan.days_overdue(today);

        match self.index.get(book_id).and_then(|&pos| self.books.get_mut(pos)) {
            Some(book) => book.copies = book.copies.saturating_add(1),
            None => warn!(%book_id, %borrower, "returned copy of a book no longer catalogued"),
        }

        let fine = self.fine_for(overdue_days);
        self.notify(&LedgerEvent::Returned {
            book_id: book_id.to_string(),
            borrower: borrower.to_string(),
            overdue_days,
            fine,
        });

        Ok(ReturnReceipt {
            book_id: book_id.to_string(),
            borrower: borrower.to_string(),
            due_date,
            returned_on: today,
            overdue_days,
            fine,
        })
    }

    /// Fine owed for `overdue_days`, `None` when nothing is owed for lateness
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn fine_for(&self, overdue_days: u32) -> Option<f64> {
        (overdue_days > 0).then(|| f64::from(overdue_days) * self.fine_per_day)
    }

    /// Books whose title, author or genre contains `keyword`, ignoring case,
    /// in catalogue order
    #[must_use]
    pub fn search(&self, keyword: &str) -> Vec<&Book> {
        let needle = keyword.to_lowercase();
        self.books.iter().filter(|book| book.matches(&needle)).collect()
    }

    /// Books borrowed at least the popularity threshold number of times
    #[must_use]
    pub fn popular_report(&self) -> Vec<PopularEntry> {
        self.books
            .iter()
            .filter(|book| book.borrowed >= self.popular_threshold)
            .map(|book| PopularEntry {
                book_id: book.id.clone(),
                title: book.title.clone(),
                borrowed: book.borrowed,
            })
            .collect()
    }

    /// Open loans whose due date is strictly before today, in loan order
    #[must_use]
    pub fn overdue_report(&self) -> Vec<OverdueEntry> {
        let today = self.clock.today();
        self.loans
            .iter()
            .filter(|loan| loan.is_overdue(today))
            .map(|loan| OverdueEntry {
                book_id: loan.book_id.clone(),
                title: self.book(&loan.book_id).map(|book| book.title.clone()),
                borrower: loan.borrower.clone(),
                due_date: loan.due_date,
            })
            .collect()
    }

    /// Look up a book by id
    #[must_use]
    pub fn book(&self, book_id: &str) -> Option<&Book> {
        self.index.get(book_id).and_then(|&pos| self.books.get(pos))
    }

    /// All books in catalogue order
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Every loan ever made, in the order they were made
    #[must_use]
    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    /// Loans whose copy has not come back yet
    pub fn open_loans(&self) -> impl Iterator<Item = &Loan> {
        self.loans.iter().filter(|loan| loan.is_open())
    }

    /// Append a book record as-is, replacing any book with the same id
    pub(crate) fn insert_book(&mut self, book: Book) {
        if let Some(existing) = self.index.get(&book.id).and_then(|&pos| self.books.get_mut(pos)) {
            *existing = book;
            return;
        }
        self.index.insert(book.id.clone(), self.books.len());
        self.books.push(book);
    }

    /// Append a loan record as-is
    pub(crate) fn insert_loan(&mut self, loan: Loan) {
        self.loans.push(loan);
    }

    /// Rebuild the id index after positions shifted
    fn reindex(&mut self) {
        self.index =
            self.books.iter().enumerate().map(|(pos, book)| (book.id.clone(), pos)).collect();
    }
}

// Implementing display for nicer output
impl fmt::Display for LoanLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} books, {} open loans", self.books.len(), self.open_loans().count())
    }
}

/// Reject blank text fields
fn require_text(field: &str, value: &str) -> LedgerResult<()> {
    if value.trim().is_empty() {
        return Err(LedgerError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}
