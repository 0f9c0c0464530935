use std::fmt::Write;

use crate::{
    book::Book,
    ledger::{OverdueEntry, PopularEntry, ReturnReceipt},
};

/// Text rendering of ledger results for people
#[derive(Debug)]
pub struct ReportFormatter;

impl ReportFormatter {
    /// One line per matching book, or a notice when nothing matched
    #[must_use]
    pub fn search_results(books: &[Book]) -> String {
        if books.is_empty() {
            return "No matching books found.".to_string();
        }
        books.iter().map(Self::search_line).collect::<Vec<_>>().join("\n")
    }

    /// A single search hit
    #[must_use]
    pub fn search_line(book: &Book) -> String {
        format!(
            "{}: {} by {} - {} (Available: {})",
            book.id, book.title, book.author, book.genre, book.copies
        )
    }

    /// The popular-books report
    #[must_use]
    pub fn popular(entries: &[PopularEntry]) -> String {
        if entries.is_empty() {
            return "No popular books yet.".to_string();
        }
        entries
            .iter()
            .map(|entry| format!("{} borrowed {} times", entry.title, entry.borrowed))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The overdue-loans report. Loans of removed books show their id instead of a title.
    #[must_use]
    pub fn overdue(entries: &[OverdueEntry]) -> String {
        if entries.is_empty() {
            return "No overdue books.".to_string();
        }
        entries
            .iter()
            .map(|entry| {
                let title = entry
                    .title
                    .clone()
                    .unwrap_or_else(|| format!("[removed book {}]", entry.book_id));
                format!("{title} borrowed by {} (Due: {})", entry.borrower, entry.due_date)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Message for a completed return
    #[must_use]
    pub fn return_message(receipt: &ReturnReceipt) -> String {
        match receipt.fine {
            Some(fine) => format!("Book returned late. Fine: {}", Self::format_fine(fine)),
            None => "Book returned on time. No fine.".to_string(),
        }
    }

    /// Render an amount the way people write it: `6.0`, `0.75`
    #[must_use]
    pub fn format_fine(amount: f64) -> String {
        if amount.fract() == 0.0 { format!("{amount:.1}") } else { format!("{amount}") }
    }

    /// Generate a markdown table of the catalogue
    #[must_use]
    pub fn inventory_table(books: &[Book]) -> String {
        if books.is_empty() {
            return "No books in the catalogue.".to_string();
        }

        let mut table = String::from("| ID | Title | Author | Genre | Available | Borrowed |\n");
        table.push_str("|----|-------|--------|-------|-----------|----------|\n");

        for book in books {
            // Writing to a String cannot fail
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {} | {} |",
                book.id, book.title, book.author, book.genre, book.copies, book.borrowed
            );
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn due() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 18).unwrap_or_default()
    }

    #[test]
    fn test_search_results() {
        let books = vec![
            Book::new("B001", "Python Basics", "John Doe", "Programming", 5),
            Book::new("B003", "Algorithms Unlocked", "Thomas Cormen", "Computer Science", 4),
        ];
        assert_eq!(
            ReportFormatter::search_results(&books),
            "B001: Python Basics by John Doe - Programming (Available: 5)\n\
             B003: Algorithms Unlocked by Thomas Cormen - Computer Science (Available: 4)"
        );
        assert_eq!(ReportFormatter::search_results(&[]), "No matching books found.");
    }

    #[test]
    fn test_popular() {
        let entries = vec![PopularEntry {
            book_id: "B002".to_string(),
            title: "Data Science 101".to_string(),
            borrowed: 3,
        }];
        assert_eq!(ReportFormatter::popular(&entries), "Data Science 101 borrowed 3 times");
        assert_eq!(ReportFormatter::popular(&[]), "No popular books yet.");
    }

    #[test]
    fn test_overdue_with_removed_book() {
        let entries = vec![
            OverdueEntry {
                book_id: "B001".to_string(),
                title: Some("Python Basics".to_string()),
                borrower: "Alice".to_string(),
                due_date: due(),
            },
            OverdueEntry {
                book_id: "B404".to_string(),
                title: None,
                borrower: "Zed".to_string(),
                due_date: due(),
            },
        ];
        assert_eq!(
            ReportFormatter::overdue(&entries),
            "Python Basics borrowed by Alice (Due: 2024-05-18)\n\
             [removed book B404] borrowed by Zed (Due: 2024-05-18)"
        );
        assert_eq!(ReportFormatter::overdue(&[]), "No overdue books.");
    }

    #[test]
    fn test_format_fine() {
        assert_eq!(ReportFormatter::format_fine(2.0), "2.0");
        assert_eq!(ReportFormatter::format_fine(6.0), "6.0");
        assert_eq!(ReportFormatter::format_fine(0.75), "0.75");
    }

    #[test]
    fn test_return_message() {
        let mut receipt = ReturnReceipt {
            book_id: "B001".to_string(),
            borrower: "Alice".to_string(),
            due_date: due(),
            returned_on: due(),
            overdue_days: 0,
            fine: None,
        };
        assert_eq!(ReportFormatter::return_message(&receipt), "Book returned on time. No fine.");

        receipt.overdue_days = 2;
        receipt.fine = Some(4.0);
        assert_eq!(ReportFormatter::return_message(&receipt), "Book returned late. Fine: 4.0");
    }

    #[test]
    fn test_inventory_table() {
        let books = [Book::new("B004", "AI", "Russell", "AI", 2)];
        let table = ReportFormatter::inventory_table(&books);
        assert!(table.starts_with("| ID | Title |"));
        assert!(table.ends_with("| B004 | AI | Russell | AI | 2 | 0 |\n"));
    }
}
