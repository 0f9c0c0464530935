//! The catalogue and loans a fresh desk opens with.

use chrono::{Days, NaiveDate};

use crate::{
    book::{Book, Loan},
    clock::Clock,
    config::LedgerConfig,
    ledger::LoanLedger,
};

/// Sample books as (id, title, author, genre, copies, borrowed)
const SAMPLE_BOOKS: [(&str, &str, &str, &str, u32, u32); 5] = [
    ("B001", "Python Basics", "John Doe", "Programming", 5, 2),
    ("B002", "Data Science 101", "Jane Smith", "Data Science", 3, 3),
    ("B003", "Algorithms Unlocked", "Thomas Cormen", "Computer Science", 4, 1),
    ("B004", "Artificial Intelligence", "Stuart Russell", "AI", 2, 0),
    ("B005", "Database Systems", "Abraham Silberschatz", "Database", 3, 2),
];

/// Sample loans as (book id, borrower, due date offset in days from today)
const SAMPLE_LOANS: [(&str, &str, i64); 3] =
    [("B001", "Alice", -2), ("B002", "Bob", 5), ("B005", "Charlie", -1)];

/// Build a ledger per `config`, seeded with the sample data when it asks for it
#[must_use]
pub fn sample_ledger(config: &LedgerConfig, clock: impl Clock + 'static) -> LoanLedger {
    let mut ledger = LoanLedger::with_config(config, clock);
    if config.seed_sample_data {
        seed(&mut ledger);
    }
    ledger
}

/// Load the sample books and loans into `ledger`, dating loans relative to its today
pub fn seed(ledger: &mut LoanLedger) {
    let today = ledger.today();

    for (id, title, author, genre, copies, borrowed) in SAMPLE_BOOKS {
        let mut book = Book::new(id, title, author, genre, copies);
        book.borrowed = borrowed;
        ledger.insert_book(book);
    }

    for (book_id, borrower, offset) in SAMPLE_LOANS {
        ledger.insert_loan(Loan::new(book_id, borrower, shift(today, offset)));
    }
}

/// Move `date` by a signed number of days, keeping it when out of range
fn shift(date: NaiveDate, offset: i64) -> NaiveDate {
    let days = Days::new(offset.unsigned_abs());
    let shifted =
        if offset < 0 { date.checked_sub_days(days) } else { date.checked_add_days(days) };
    shifted.unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap_or_default()
    }

    #[test]
    fn test_seeded_catalogue() {
        let ledger = sample_ledger(&LedgerConfig::default(), ManualClock::new(today()));
        let ids: Vec<&str> = ledger.books().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["B001", "B002", "B003", "B004", "B005"]);
        assert_eq!(ledger.loans().len(), 3);
    }

    #[test]
    fn test_seeded_reports() {
        let ledger = sample_ledger(&LedgerConfig::default(), ManualClock::new(today()));

        let popular = ledger.popular_report();
        assert_eq!(popular.len(), 1);
        assert!(matches!(popular.first(), Some(e) if e.title == "Data Science 101"));

        let overdue = ledger.overdue_report();
        let borrowers: Vec<&str> = overdue.iter().map(|e| e.borrower.as_str()).collect();
        assert_eq!(borrowers, ["Alice", "Charlie"]);
    }

    #[test]
    fn test_seeding_can_be_disabled() {
        let config = LedgerConfig { seed_sample_data: false, ..LedgerConfig::default() };
        let ledger = sample_ledger(&config, ManualClock::new(today()));
        assert!(ledger.books().is_empty());
        assert!(ledger.loans().is_empty());
    }
}
