//! In-memory library loan ledger.
//!
//! This crate tracks a library's catalogue and the loans made against it:
//! adding and restocking books, checking copies out, returning them with an
//! overdue fine, keyword search, and reports of popular and overdue books.
//!
//! [`LoanLedger`] holds the state and enforces the stock rules. [`SharedLedger`]
//! wraps it for use from several threads, and [`LibraryDesk`] turns raw text
//! fields into the messages a patron sees.

pub mod book;
pub mod clock;
pub mod config;
pub mod desk;
pub mod error;
pub mod events;
pub mod ledger;
pub mod observers;
pub mod report;
pub mod sample;
pub mod shared;

pub use book::{Book, Loan};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{FINE_PER_DAY, LedgerConfig, POPULAR_THRESHOLD};
pub use desk::LibraryDesk;
pub use error::{LedgerError, LedgerResult};
pub use events::LedgerEvent;
pub use ledger::{LoanLedger, OverdueEntry, PopularEntry, ReturnReceipt, StockUpdate};
pub use observers::{EventLogger, LateReturnNotifier, LedgerObserver};
pub use report::ReportFormatter;
pub use shared::SharedLedger;
