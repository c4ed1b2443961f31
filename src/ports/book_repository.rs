//! Book repository port.

use crate::domain::book::Book;
use crate::domain::foundation::{BookId, DomainError};
use async_trait::async_trait;

/// Repository port for Book persistence. Books are append-only.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Save a new book.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, book: &Book) -> Result<(), DomainError>;

    /// Find a book by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, DomainError>;
}
