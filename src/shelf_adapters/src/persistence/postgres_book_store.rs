use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};

use shelf_core::{
    Book, BookChanges, BookId, BookStore, BookStoreError, NewBook, Page, PageRequest, RoleError,
    UserId, UserSummary,
};

/// Book columns plus the owner, joined only while the owner is active.
const BOOK_SELECT: &str = r#"
    SELECT b.id, b.title, b.author, b.description, b.user_id, b.created_at, b.updated_at,
           u.email AS owner_email, u.name AS owner_name, u.role AS owner_role,
           u.created_at AS owner_created_at, u.updated_at AS owner_updated_at
    FROM books b
    LEFT JOIN users u ON u.id = b.user_id AND u.deleted_at IS NULL
"#;

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    description: String,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    owner_email: Option<String>,
    owner_name: Option<String>,
    owner_role: Option<String>,
    owner_created_at: Option<DateTime<Utc>>,
    owner_updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<BookRow> for Book {
    type Error = BookStoreError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let owner_id =
            UserId::new(row.user_id).map_err(|e| BookStoreError::Unexpected(e.to_string()))?;

        let owner = match (
            row.owner_email,
            row.owner_name,
            row.owner_role,
            row.owner_created_at,
            row.owner_updated_at,
        ) {
            (Some(email), Some(name), Some(role), Some(created_at), Some(updated_at)) => {
                Some(UserSummary {
                    id: owner_id,
                    email,
                    name,
                    role: role
                        .parse()
                        .map_err(|e: RoleError| BookStoreError::Unexpected(e.to_string()))?,
                    created_at,
                    updated_at,
                })
            }
            _ => None,
        };

        Ok(Book {
            id: BookId::new(row.id).map_err(|e| BookStoreError::Unexpected(e.to_string()))?,
            title: row.title,
            author: row.author,
            description: row.description,
            owner_id,
            owner,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn map_error(e: sqlx::Error) -> BookStoreError {
    match e {
        sqlx::Error::RowNotFound => BookStoreError::NotFound,
        other => BookStoreError::Unexpected(other.to_string()),
    }
}

#[derive(Clone)]
pub struct PostgresBookStore {
    pool: PgPool,
}

impl PostgresBookStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresBookStore { pool }
    }
}

#[async_trait::async_trait]
impl BookStore for PostgresBookStore {
    #[tracing::instrument(name = "Adding book to PostgreSQL", skip_all)]
    async fn create(&self, book: NewBook) -> Result<Book, BookStoreError> {
        let id: i64 = sqlx::query_scalar(
            r#"
                INSERT INTO books (title, author, description, user_id)
                VALUES ($1, $2, $3, $4)
                RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .bind(book.owner_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(map_error)?;

        let id = BookId::new(id).map_err(|e| BookStoreError::Unexpected(e.to_string()))?;
        self.find_by_id(id).await
    }

    #[tracing::instrument(name = "Retrieving book from PostgreSQL", skip(self))]
    async fn find_by_id(&self, id: BookId) -> Result<Book, BookStoreError> {
        let sql = format!("{BOOK_SELECT} WHERE b.id = $1 AND b.deleted_at IS NULL");
        let row = sqlx::query_as::<_, BookRow>(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_error)?
            .ok_or(BookStoreError::NotFound)?;

        Book::try_from(row)
    }

    #[tracing::instrument(name = "Listing books from PostgreSQL", skip(self))]
    async fn list(&self, request: &PageRequest) -> Result<Page<Book>, BookStoreError> {
        const FILTER: &str = r"b.deleted_at IS NULL AND ($1::TEXT IS NULL
            OR b.title ILIKE $1 ESCAPE '\' OR b.author ILIKE $1 ESCAPE '\')";
        let pattern = request.search_pattern();

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM books b WHERE {FILTER}"))
                .bind(pattern.as_deref())
                .fetch_one(&self.pool)
                .await
                .map_err(map_error)?;

        let sql = format!(
            "{BOOK_SELECT} WHERE {FILTER} ORDER BY b.{} {} LIMIT $2 OFFSET $3",
            request.sort,
            request.order.as_sql()
        );
        let rows = sqlx::query_as::<_, BookRow>(&sql)
            .bind(pattern.as_deref())
            .bind(request.limit())
            .bind(request.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_error)?;

        let items = rows
            .into_iter()
            .map(Book::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, request, total.max(0) as u64))
    }

    #[tracing::instrument(name = "Updating book in PostgreSQL", skip(self, changes))]
    async fn update_fields(
        &self,
        id: BookId,
        changes: BookChanges,
    ) -> Result<Book, BookStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE books
                SET title = COALESCE($2, title),
                    author = COALESCE($3, author),
                    description = COALESCE($4, description),
                    updated_at = NOW()
                WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.get())
        .bind(changes.title)
        .bind(changes.author)
        .bind(changes.description)
        .execute(&self.pool)
        .await
        .map_err(map_error)?;

        if result.rows_affected() == 0 {
            return Err(BookStoreError::NotFound);
        }

        self.find_by_id(id).await
    }

    #[tracing::instrument(name = "Soft deleting book in PostgreSQL", skip(self))]
    async fn soft_delete(&self, id: BookId) -> Result<(), BookStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE books
                SET deleted_at = NOW()
                WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(map_error)?;

        if result.rows_affected() == 0 {
            return Err(BookStoreError::NotFound);
        }

        Ok(())
    }
}
