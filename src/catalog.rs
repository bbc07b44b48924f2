//! In-memory book and review catalog
//!
//! The catalog is loaded once at startup from the JSON fixtures embedded in
//! the binary and owned by [`CatalogStore`]. Books are the only mutable
//! collection (POST /books appends); reviews never change after load, so they
//! sit outside the lock.

use std::cmp::Ordering;
use std::fmt;
use std::sync::RwLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const BOOKS_JSON: &str = include_str!("../data/books.json");
const REVIEWS_JSON: &str = include_str!("../data/reviews.json");

/// Record identifier as it appears in the source data: either a JSON number
/// or a string. Lookups always compare the string form, so `99` and `"99"`
/// name the same book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// String-coerced equality against a path segment.
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            RecordId::Int(n) => n.to_string() == candidate,
            RecordId::Text(s) => s.as_str() == candidate,
        }
    }

    /// Whether the id carries a usable value. Empty strings fail the
    /// add-book presence check.
    pub fn is_present(&self) -> bool {
        match self {
            RecordId::Int(_) => true,
            RecordId::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// A catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: RecordId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u64,
    /// Kept as the raw string it was loaded with; parsed on demand by the
    /// range filter so unparsable dates keep their exclude-everything
    /// behavior instead of failing the load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

impl Book {
    /// Ranking score for /books/best.
    pub fn score(&self) -> f64 {
        self.rating * self.review_count as f64
    }

    /// Publication date, if present and parsable.
    pub fn published_date(&self) -> Option<NaiveDate> {
        self.date_published.as_deref().and_then(parse_date)
    }
}

/// A reader review attached to a book by `bookId` (string-compared, no
/// referential integrity).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: RecordId,
    pub book_id: RecordId,
    pub rating: u8,
    pub content: String,
}

#[derive(Deserialize)]
struct BooksFile {
    books: Vec<Book>,
}

#[derive(Deserialize)]
struct ReviewsFile {
    reviews: Vec<Review>,
}

/// Parse a calendar date in the fixture format. Anything else is `None`,
/// which the range filter treats as "never in range".
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Owner of the two in-memory collections.
///
/// Handlers receive this through shared state rather than a module-level
/// singleton. The book list is behind an `RwLock` because the tokio runtime
/// runs handlers in parallel; readers clone data out instead of holding the
/// guard.
pub struct CatalogStore {
    books: RwLock<Vec<Book>>,
    reviews: Vec<Review>,
}

impl CatalogStore {
    /// Parse the embedded fixtures. Called once at state construction.
    pub fn load() -> anyhow::Result<Self> {
        let books: BooksFile = serde_json::from_str(BOOKS_JSON)?;
        let reviews: ReviewsFile = serde_json::from_str(REVIEWS_JSON)?;
        Ok(Self::from_parts(books.books, reviews.reviews))
    }

    /// Build a store from explicit collections.
    pub fn from_parts(books: Vec<Book>, reviews: Vec<Review>) -> Self {
        Self {
            books: RwLock::new(books),
            reviews,
        }
    }

    /// Full book list in load order.
    pub fn all_books(&self) -> Vec<Book> {
        self.books.read().expect("books lock poisoned").clone()
    }

    pub fn book_count(&self) -> usize {
        self.books.read().expect("books lock poisoned").len()
    }

    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    /// Top `limit` books by rating × reviewCount, descending. Sorts a copy;
    /// the stable sort keeps load order between equal scores.
    pub fn best_books(&self, limit: usize) -> Vec<Book> {
        let mut ranked = self.all_books();
        ranked.sort_by(|a, b| {
            b.score()
                .partial_cmp(&a.score())
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(limit);
        ranked
    }

    /// Exact string-equality lookup against each book's id.
    pub fn find_book(&self, id: &str) -> Option<Book> {
        self.books
            .read()
            .expect("books lock poisoned")
            .iter()
            .find(|b| b.id.matches(id))
            .cloned()
    }

    /// Books whose publication date falls within `[start, end]` inclusive.
    ///
    /// An unparsable bound yields an empty result, and a book with a missing
    /// or unparsable `datePublished` is excluded. Both mirror the original
    /// service's invalid-date comparisons and are deliberately not hardened.
    pub fn books_in_range(&self, start: &str, end: &str) -> Vec<Book> {
        let (start, end) = match (parse_date(start), parse_date(end)) {
            (Some(s), Some(e)) => (s, e),
            _ => return Vec::new(),
        };
        self.books
            .read()
            .expect("books lock poisoned")
            .iter()
            .filter(|b| {
                b.published_date()
                    .map_or(false, |d| d >= start && d <= end)
            })
            .cloned()
            .collect()
    }

    /// Books with the featured flag set.
    pub fn featured_books(&self) -> Vec<Book> {
        self.books
            .read()
            .expect("books lock poisoned")
            .iter()
            .filter(|b| b.featured)
            .cloned()
            .collect()
    }

    /// Reviews whose `bookId` matches the given id (string comparison).
    /// Existence of the book itself is the caller's concern.
    pub fn reviews_for_book(&self, id: &str) -> Vec<Review> {
        self.reviews
            .iter()
            .filter(|r| r.book_id.matches(id))
            .cloned()
            .collect()
    }

    /// Append a book and return the stored representation. No uniqueness
    /// check: duplicate ids are accepted silently, as in the original.
    pub fn add_book(&self, book: Book) -> Book {
        let mut books = self.books.write().expect("books lock poisoned");
        books.push(book.clone());
        book
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: i64, rating: f64, review_count: u64, date: &str, featured: bool) -> Book {
        Book {
            id: RecordId::Int(id),
            title: format!("Book {id}"),
            author: "Author".to_string(),
            rating,
            review_count,
            date_published: Some(date.to_string()),
            featured,
        }
    }

    fn store() -> CatalogStore {
        CatalogStore::from_parts(
            vec![
                book(1, 4.0, 100, "1999-06-01", true),
                book(2, 5.0, 10, "2000-06-01", false),
                book(3, 2.0, 150, "2001-06-01", false),
                book(4, 4.0, 100, "not-a-date", true),
            ],
            vec![
                Review {
                    id: RecordId::Int(1),
                    book_id: RecordId::Int(1),
                    rating: 5,
                    content: "great".to_string(),
                },
                Review {
                    id: RecordId::Int(2),
                    book_id: RecordId::Text("1".to_string()),
                    rating: 3,
                    content: "fine".to_string(),
                },
            ],
        )
    }

    #[test]
    fn record_id_matches_string_form() {
        assert!(RecordId::Int(99).matches("99"));
        assert!(!RecordId::Int(99).matches("099"));
        assert!(RecordId::Text("99".to_string()).matches("99"));
        assert!(!RecordId::Text("abc".to_string()).matches("ab"));
    }

    #[test]
    fn fixtures_parse() {
        let store = CatalogStore::load().expect("embedded fixtures must parse");
        assert!(store.book_count() > 0);
        assert!(store.review_count() > 0);
    }

    #[test]
    fn best_books_sorted_descending_with_stable_ties() {
        let store = store();
        let best = store.best_books(10);
        let scores: Vec<f64> = best.iter().map(Book::score).collect();
        let mut sorted = scores.clone();
        sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
        assert_eq!(scores, sorted);
        // books 1 and 4 tie at 400; load order decides
        assert!(best[0].id.matches("1"));
        assert!(best[1].id.matches("4"));
    }

    #[test]
    fn best_books_does_not_mutate_load_order() {
        let store = store();
        let _ = store.best_books(2);
        let all = store.all_books();
        assert!(all[0].id.matches("1"));
        assert!(all[3].id.matches("4"));
    }

    #[test]
    fn range_is_inclusive_on_both_bounds() {
        let store = store();
        let hits = store.books_in_range("1999-06-01", "2000-06-01");
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|b| b.id.matches("1") || b.id.matches("2")));
    }

    #[test]
    fn unparsable_bound_excludes_everything() {
        let store = store();
        assert!(store.books_in_range("garbage", "2020-01-01").is_empty());
        assert!(store.books_in_range("1990-01-01", "soon").is_empty());
    }

    #[test]
    fn unparsable_publication_date_never_matches() {
        let store = store();
        let hits = store.books_in_range("1900-01-01", "2100-01-01");
        assert!(!hits.iter().any(|b| b.id.matches("4")));
    }

    #[test]
    fn reviews_match_by_string_comparison() {
        let store = store();
        // numeric and textual bookIds both hit id "1"
        assert_eq!(store.reviews_for_book("1").len(), 2);
        assert!(store.reviews_for_book("3").is_empty());
    }

    #[test]
    fn add_book_appends_without_uniqueness_check() {
        let store = store();
        let dup = book(1, 1.0, 1, "2020-01-01", false);
        store.add_book(dup);
        assert_eq!(store.book_count(), 5);
        // first match still wins lookups
        let found = store.find_book("1").unwrap();
        assert_eq!(found.rating, 4.0);
    }
}
