use shelf_core::{
    AuthContext, BookChanges, BookId, BookStore, BookSummary, NewBook, Page, PageRequest,
};

use super::errors::BookError;

/// Columns a book listing may be ordered by.
pub const BOOK_SORT_COLUMNS: &[&str] = &["id", "title", "author", "created_at", "updated_at"];

pub struct CreateBookUseCase<'a, B: BookStore> {
    book_store: &'a B,
}

impl<'a, B: BookStore> CreateBookUseCase<'a, B> {
    pub fn new(book_store: &'a B) -> Self {
        Self { book_store }
    }

    #[tracing::instrument(
        name = "CreateBookUseCase::execute",
        skip(self, book),
        fields(owner_id = %book.owner_id)
    )]
    pub async fn execute(&self, book: NewBook) -> Result<BookSummary, BookError> {
        let created = self.book_store.create(book).await?;
        tracing::info!(book_id = %created.id, "book created");
        Ok(created.summary())
    }
}

pub struct ListBooksUseCase<'a, B: BookStore> {
    book_store: &'a B,
}

impl<'a, B: BookStore> ListBooksUseCase<'a, B> {
    pub fn new(book_store: &'a B) -> Self {
        Self { book_store }
    }

    #[tracing::instrument(name = "ListBooksUseCase::execute", skip(self))]
    pub async fn execute(&self, request: &PageRequest) -> Result<Page<BookSummary>, BookError> {
        let page = self.book_store.list(request).await?;
        Ok(page.map(|book| book.summary()))
    }
}

pub struct GetBookUseCase<'a, B: BookStore> {
    book_store: &'a B,
}

impl<'a, B: BookStore> GetBookUseCase<'a, B> {
    pub fn new(book_store: &'a B) -> Self {
        Self { book_store }
    }

    #[tracing::instrument(name = "GetBookUseCase::execute", skip(self))]
    pub async fn execute(&self, id: BookId) -> Result<BookSummary, BookError> {
        Ok(self.book_store.find_by_id(id).await?.summary())
    }
}

/// Owner or admin only.
pub struct UpdateBookUseCase<'a, B: BookStore> {
    book_store: &'a B,
}

impl<'a, B: BookStore> UpdateBookUseCase<'a, B> {
    pub fn new(book_store: &'a B) -> Self {
        Self { book_store }
    }

    #[tracing::instrument(name = "UpdateBookUseCase::execute", skip(self, caller, changes))]
    pub async fn execute(
        &self,
        caller: &AuthContext,
        id: BookId,
        changes: BookChanges,
    ) -> Result<BookSummary, BookError> {
        let book = self.book_store.find_by_id(id).await?;
        if !caller.can_act_on(book.owner_id) {
            return Err(BookError::Forbidden);
        }
        if changes.is_empty() {
            return Ok(book.summary());
        }
        let updated = self.book_store.update_fields(id, changes).await?;
        Ok(updated.summary())
    }
}

/// Owner or admin only.
pub struct DeleteBookUseCase<'a, B: BookStore> {
    book_store: &'a B,
}

impl<'a, B: BookStore> DeleteBookUseCase<'a, B> {
    pub fn new(book_store: &'a B) -> Self {
        Self { book_store }
    }

    #[tracing::instrument(name = "DeleteBookUseCase::execute", skip(self, caller))]
    pub async fn execute(&self, caller: &AuthContext, id: BookId) -> Result<(), BookError> {
        let book = self.book_store.find_by_id(id).await?;
        if !caller.can_act_on(book.owner_id) {
            return Err(BookError::Forbidden);
        }
        self.book_store.soft_delete(id).await?;
        tracing::info!(book_id = %id, "book deleted");
        Ok(())
    }
}
