use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A title held by the library together with its stock counters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Book {
    /// Unique catalogue key
    pub id: String,
    /// Book title
    pub title: String,
    /// Book author
    pub author: String,
    /// Genre used for keyword search
    pub genre: String,
    /// Copies currently on the shelf
    pub copies: u32,
    /// Lifetime number of checkouts; never decreases
    pub borrowed: u32,
}

impl Book {
    /// Create a new book with no checkout history
    #[must_use]
    pub fn new(id: &str, title: &str, author: &str, genre: &str, copies: u32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
            copies,
            borrowed: 0,
        }
    }

    /// Whether at least one copy can be checked out
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.copies > 0
    }

    /// Case-insensitive substring match against title, author and genre.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        [&self.title, &self.author, &self.genre]
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// A single checkout of one copy of a book
///
/// The book is referenced by id only, so a loan outlives the removal of its book.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Loan {
    /// Id of the borrowed book
    pub book_id: String,
    /// Name of the patron holding the copy
    pub borrower: String,
    /// Last day the copy may be kept without a fine
    pub due_date: NaiveDate,
    /// Set once when the copy comes back
    pub returned: bool,
}

impl Loan {
    /// Open a new loan
    #[must_use]
    pub fn new(book_id: &str, borrower: &str, due_date: NaiveDate) -> Self {
        Self {
            book_id: book_id.to_string(),
            borrower: borrower.to_string(),
            due_date,
            returned: false,
        }
    }

    /// Whether the copy is still out
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.returned
    }

    /// Whether this open loan belongs to `book_id` and `borrower`
    #[must_use]
    pub fn is_open_for(&self, book_id: &str, borrower: &str) -> bool {
        self.is_open() && self.book_id == book_id && self.borrower == borrower
    }

    /// An open loan is overdue once `today` is past its due date
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_open() && self.due_date < today
    }

    /// Whole days past the due date, zero when returned on time
    #[must_use]
    pub fn days_overdue(&self, today: NaiveDate) -> u32 {
        let days = today.signed_duration_since(self.due_date).num_days();
        u32::try_from(days.max(0)).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }

    #[test]
    fn test_matches_any_field_ignoring_case() {
        let book = Book::new("B003", "Algorithms Unlocked", "Thomas Cormen", "Computer Science", 4);
        assert!(book.matches("unlocked"));
        assert!(book.matches("cormen"));
        assert!(book.matches("science"));
        assert!(!book.matches("python"));
    }

    #[test]
    fn test_days_overdue() {
        let loan = Loan::new("B001", "Alice", date(2024, 3, 10));
        assert_eq!(loan.days_overdue(date(2024, 3, 9)), 0);
        assert_eq!(loan.days_overdue(date(2024, 3, 10)), 0);
        assert_eq!(loan.days_overdue(date(2024, 3, 13)), 3);
    }

    #[test]
    fn test_due_today_is_not_overdue() {
        let loan = Loan::new("B001", "Alice", date(2024, 3, 10));
        assert!(!loan.is_overdue(date(2024, 3, 10)));
        assert!(loan.is_overdue(date(2024, 3, 11)));
    }

    #[test]
    fn test_returned_loan_is_never_overdue() {
        let mut loan = Loan::new("B001", "Alice", date(2024, 3, 10));
        loan.returned = true;
        assert!(!loan.is_overdue(date(2024, 4, 1)));
        assert!(!loan.is_open_for("B001", "Alice"));
    }
}
