use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Changes applied to the ledger, published to observers after they succeed
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum LedgerEvent {
    /// A new title entered the catalogue
    BookAdded {
        /// Id of the new book
        book_id: String,
        /// Initial stock
        copies: u32,
    },
    /// More copies of a known title were shelved
    StockAdded {
        /// Id of the restocked book
        book_id: String,
        /// Copies added by this call
        added: u32,
        /// Stock after the update
        copies: u32,
    },
    /// A title was taken out of the catalogue
    BookRemoved {
        /// Id of the removed book
        book_id: String,
    },
    /// A copy was lent out
    CheckedOut {
        /// Id of the borrowed book
        book_id: String,
        /// Patron name
        borrower: String,
        /// Date the copy is due back
        due_date: NaiveDate,
    },
    /// A copy came back
    Returned {
        /// Id of the returned book
        book_id: String,
        /// Patron name
        borrower: String,
        /// Days past the due date
        overdue_days: u32,
        /// Fine owed, if the copy came back late
        fine: Option<f64>,
    },
}
