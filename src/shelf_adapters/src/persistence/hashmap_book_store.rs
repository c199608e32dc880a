use std::{cmp::Ordering, collections::BTreeMap, sync::Arc};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use shelf_core::{
    Book, BookChanges, BookId, BookStore, BookStoreError, NewBook, Page, PageRequest, SortOrder,
};

use super::hashmap_user_store::HashMapUserStore;

struct BookRecord {
    book: Book,
    deleted_at: Option<DateTime<Utc>>,
}

#[derive(Default)]
struct BookTable {
    rows: BTreeMap<i64, BookRecord>,
    last_id: i64,
}

/// In-memory book store. Owners are looked up in the shared user store on
/// every read, the way a join would.
#[derive(Clone)]
pub struct HashMapBookStore {
    books: Arc<RwLock<BookTable>>,
    users: HashMapUserStore,
}

impl HashMapBookStore {
    pub fn new(users: HashMapUserStore) -> Self {
        Self {
            books: Arc::new(RwLock::new(BookTable::default())),
            users,
        }
    }

    async fn with_owner(&self, mut book: Book) -> Book {
        book.owner = self.users.active_summary(book.owner_id).await;
        book
    }
}

fn compare(a: &Book, b: &Book, column: &str) -> Ordering {
    match column {
        "title" => a.title.cmp(&b.title),
        "author" => a.author.cmp(&b.author),
        "created_at" => a.created_at.cmp(&b.created_at),
        "updated_at" => a.updated_at.cmp(&b.updated_at),
        _ => a.id.cmp(&b.id),
    }
}

#[async_trait::async_trait]
impl BookStore for HashMapBookStore {
    async fn create(&self, book: NewBook) -> Result<Book, BookStoreError> {
        let stored = {
            let mut books = self.books.write().await;
            books.last_id += 1;
            let id = BookId::new(books.last_id)
                .map_err(|e| BookStoreError::Unexpected(e.to_string()))?;
            let now = Utc::now();
            let stored = Book {
                id,
                title: book.title,
                author: book.author,
                description: book.description,
                owner_id: book.owner_id,
                owner: None,
                created_at: now,
                updated_at: now,
            };
            books.rows.insert(
                id.get(),
                BookRecord {
                    book: stored.clone(),
                    deleted_at: None,
                },
            );
            stored
        };
        Ok(self.with_owner(stored).await)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Book, BookStoreError> {
        let book = {
            let books = self.books.read().await;
            books
                .rows
                .get(&id.get())
                .filter(|r| r.deleted_at.is_none())
                .map(|r| r.book.clone())
                .ok_or(BookStoreError::NotFound)?
        };
        Ok(self.with_owner(book).await)
    }

    async fn list(&self, request: &PageRequest) -> Result<Page<Book>, BookStoreError> {
        let (page_items, total) = {
            let books = self.books.read().await;
            let needle = request.search.as_deref().map(str::to_lowercase);

            let mut matching: Vec<&Book> = books
                .rows
                .values()
                .filter(|r| r.deleted_at.is_none())
                .map(|r| &r.book)
                .filter(|b| match &needle {
                    Some(needle) => {
                        b.title.to_lowercase().contains(needle)
                            || b.author.to_lowercase().contains(needle)
                    }
                    None => true,
                })
                .collect();

            matching.sort_by(|a, b| {
                let ordering = compare(a, b, request.sort);
                match request.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });

            let total = matching.len() as u64;
            let items: Vec<Book> = matching
                .into_iter()
                .skip(request.offset() as usize)
                .take(request.limit() as usize)
                .cloned()
                .collect();
            (items, total)
        };

        let mut items = Vec::with_capacity(page_items.len());
        for book in page_items {
            items.push(self.with_owner(book).await);
        }
        Ok(Page::new(items, request, total))
    }

    async fn update_fields(
        &self,
        id: BookId,
        changes: BookChanges,
    ) -> Result<Book, BookStoreError> {
        let book = {
            let mut books = self.books.write().await;
            let record = books
                .rows
                .get_mut(&id.get())
                .filter(|r| r.deleted_at.is_none())
                .ok_or(BookStoreError::NotFound)?;

            let book = &mut record.book;
            if let Some(title) = changes.title {
                book.title = title;
            }
            if let Some(author) = changes.author {
                book.author = author;
            }
            if let Some(description) = changes.description {
                book.description = description;
            }
            book.updated_at = Utc::now();
            book.clone()
        };
        Ok(self.with_owner(book).await)
    }

    async fn soft_delete(&self, id: BookId) -> Result<(), BookStoreError> {
        let mut books = self.books.write().await;
        let record = books
            .rows
            .get_mut(&id.get())
            .filter(|r| r.deleted_at.is_none())
            .ok_or(BookStoreError::NotFound)?;
        record.deleted_at = Some(Utc::now());
        Ok(())
    }
}
