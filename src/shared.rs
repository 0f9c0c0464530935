use std::sync::{Arc, PoisonError, RwLock};

use chrono::NaiveDate;

use crate::{
    book::{Book, Loan},
    error::LedgerResult,
    ledger::{LoanLedger, OverdueEntry, PopularEntry, ReturnReceipt, StockUpdate},
};

/// Cloneable handle that serializes all ledger mutations behind one lock.
///
/// Mutations hold the write lock for the whole operation; searches and reports
/// share the read lock. Everything handed out is an owned copy.
#[derive(Debug, Clone)]
pub struct SharedLedger {
    /// The guarded ledger
    inner: Arc<RwLock<LoanLedger>>,
}

impl SharedLedger {
    /// Wrap a ledger for shared use
    #[must_use]
    pub fn new(ledger: LoanLedger) -> Self {
        Self { inner: Arc::new(RwLock::new(ledger)) }
    }

    /// Run `f` with shared read access.
    ///
    /// Ledger operations validate before mutating, so a lock poisoned by a
    /// panicking caller still guards a consistent ledger and is recovered.
    pub fn read<T>(&self, f: impl FnOnce(&LoanLedger) -> T) -> T {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run `f` with exclusive write access
    pub fn write<T>(&self, f: impl FnOnce(&mut LoanLedger) -> T) -> T {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// See [`LoanLedger::add_or_update_book`]
    ///
    /// # Errors
    ///
    /// Same as [`LoanLedger::add_or_update_book`].
    pub fn add_or_update_book(
        &self,
        book_id: &str,
        title: &str,
        author: &str,
        genre: &str,
        copies: u32,
    ) -> LedgerResult<StockUpdate> {
        self.write(|ledger| ledger.add_or_update_book(book_id, title, author, genre, copies))
    }

    /// See [`LoanLedger::remove_book`]
    ///
    /// # Errors
    ///
    /// Same as [`LoanLedger::remove_book`].
    pub fn remove_book(&self, book_id: &str) -> LedgerResult<Book> {
        self.write(|ledger| ledger.remove_book(book_id))
    }

    /// See [`LoanLedger::checkout`]
    ///
    /// # Errors
    ///
    /// Same as [`LoanLedger::checkout`].
    pub fn checkout(
        &self,
        book_id: &str,
        borrower: &str,
        due_days: u32,
    ) -> LedgerResult<NaiveDate> {
        self.write(|ledger| ledger.checkout(book_id, borrower, due_days))
    }

    /// See [`LoanLedger::return_book`]
    ///
    /// # Errors
    ///
    /// Same as [`LoanLedger::return_book`].
    pub fn return_book(&self, book_id: &str, borrower: &str) -> LedgerResult<ReturnReceipt> {
        self.write(|ledger| ledger.return_book(book_id, borrower))
    }

    /// Matching books, cloned out of the ledger
    #[must_use]
    pub fn search(&self, keyword: &str) -> Vec<Book> {
        self.read(|ledger| ledger.search(keyword).into_iter().cloned().collect())
    }

    /// See [`LoanLedger::popular_report`]
    #[must_use]
    pub fn popular_report(&self) -> Vec<PopularEntry> {
        self.read(LoanLedger::popular_report)
    }

    /// See [`LoanLedger::overdue_report`]
    #[must_use]
    pub fn overdue_report(&self) -> Vec<OverdueEntry> {
        self.read(LoanLedger::overdue_report)
    }

    /// A copy of one book
    #[must_use]
    pub fn book(&self, book_id: &str) -> Option<Book> {
        self.read(|ledger| ledger.book(book_id).cloned())
    }

    /// A copy of the whole catalogue
    #[must_use]
    pub fn books(&self) -> Vec<Book> {
        self.read(|ledger| ledger.books().to_vec())
    }

    /// A copy of every loan
    #[must_use]
    pub fn loans(&self) -> Vec<Loan> {
        self.read(|ledger| ledger.loans().to_vec())
    }
}
