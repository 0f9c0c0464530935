use std::fmt;

use tracing::{info, warn};

use crate::events::LedgerEvent;

/// Receives every event the ledger applies
pub trait LedgerObserver: Send + Sync + fmt::Debug {
    /// Called after a mutation has been applied
    fn on_event(&self, event: &LedgerEvent);
}

/// Logs all ledger mutations as structured tracing events
#[derive(Debug)]
pub struct EventLogger;

impl LedgerObserver for EventLogger {
    fn on_event(&self, event: &LedgerEvent) {
        match event {
            LedgerEvent::BookAdded { book_id, copies } => {
                info!(%book_id, copies, "book added");
            }
            LedgerEvent::StockAdded { book_id, added, copies } => {
                info!(%book_id, added, copies, "stock added");
            }
            LedgerEvent::BookRemoved { book_id } => {
                info!(%book_id, "book removed");
            }
            LedgerEvent::CheckedOut { book_id, borrower, due_date } => {
                info!(%book_id, %borrower, %due_date, "book checked out");
            }
            LedgerEvent::Returned { book_id, borrower, overdue_days, .. } => {
                info!(%book_id, %borrower, overdue_days, "book returned");
            }
        }
    }
}

/// Warns about copies that came back late
#[derive(Debug)]
pub struct LateReturnNotifier;

impl LedgerObserver for LateReturnNotifier {
    fn on_event(&self, event: &LedgerEvent) {
        if let LedgerEvent::Returned { book_id, borrower, overdue_days, fine: Some(fine) } = event {
            warn!(%book_id, %borrower, overdue_days, fine, "late return, fine due");
        }
    }
}
