use thiserror::Error;

/// Failures of ledger operations. None of them leaves the ledger modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A field was malformed, empty or out of range
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// No book with this id is in the catalogue
    #[error("book {0} not found")]
    NotFound(String),
    /// Every copy of the book is checked out
    #[error("no copies of book {0} available")]
    NoCopiesAvailable(String),
    /// The borrower has no open loan for the book
    #[error("no open loan of book {book_id} for {borrower}")]
    TransactionNotFound {
        /// Requested book id
        book_id: String,
        /// Requested borrower
        borrower: String,
    },
}

/// Result alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
