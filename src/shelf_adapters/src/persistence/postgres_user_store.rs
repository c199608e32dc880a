use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres};

use shelf_core::{
    DisplayName, Email, NewUser, Page, PageRequest, PasswordHash, User, UserChanges, UserId,
    UserStore, UserStoreError,
};

const USER_COLUMNS: &str = "id, email, name, password_hash, role, created_at, updated_at";

#[derive(sqlx::FromRow)]
pub(crate) struct UserRow {
    id: i64,
    email: String,
    name: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let unexpected = |e: &dyn std::fmt::Display| UserStoreError::Unexpected(e.to_string());

        Ok(User {
            id: UserId::new(row.id).map_err(|e| unexpected(&e))?,
            email: Email::try_from(Secret::new(row.email)).map_err(|e| unexpected(&e))?,
            name: DisplayName::parse(&row.name).map_err(|e| unexpected(&e))?,
            password_hash: PasswordHash::new(Secret::new(row.password_hash)),
            role: row.role.parse().map_err(|e| unexpected(&e))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn map_error(e: sqlx::Error) -> UserStoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.constraint().is_some() {
            return UserStoreError::ConstraintViolation;
        }
    }
    UserStoreError::Unexpected(e.to_string())
}

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }

    async fn fetch_one_active(
        &self,
        query: sqlx::query::QueryAs<'_, Postgres, UserRow, sqlx::postgres::PgArguments>,
    ) -> Result<User, UserStoreError> {
        let row = query.fetch_optional(&self.pool).await.map_err(map_error)?;
        let Some(row) = row else {
            return Err(UserStoreError::NotFound);
        };
        User::try_from(row)
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL"
        );
        let query = sqlx::query_as::<_, UserRow>(&sql).bind(email.as_ref().expose_secret());
        self.fetch_one_active(query).await
    }

    #[tracing::instrument(name = "Retrieving user by id from PostgreSQL", skip(self))]
    async fn find_by_id(&self, id: UserId) -> Result<User, UserStoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL");
        let query = sqlx::query_as::<_, UserRow>(&sql).bind(id.get());
        self.fetch_one_active(query).await
    }

    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn create(&self, user: NewUser) -> Result<User, UserStoreError> {
        let sql = format!(
            r#"
                INSERT INTO users (email, name, password_hash, role)
                VALUES ($1, $2, $3, $4)
                RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.email.as_ref().expose_secret())
            .bind(user.name.as_str())
            .bind(user.password_hash.as_ref().expose_secret())
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_error)?;

        User::try_from(row)
    }

    #[tracing::instrument(name = "Updating user in PostgreSQL", skip(self, changes))]
    async fn update_fields(
        &self,
        id: UserId,
        changes: UserChanges,
    ) -> Result<User, UserStoreError> {
        let sql = format!(
            r#"
                UPDATE users
                SET email = COALESCE($2, email),
                    name = COALESCE($3, name),
                    password_hash = COALESCE($4, password_hash),
                    role = COALESCE($5, role),
                    updated_at = NOW()
                WHERE id = $1 AND deleted_at IS NULL
                RETURNING {USER_COLUMNS}
            "#
        );

        let query = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.get())
            .bind(changes.email.as_ref().map(|e| e.as_str().to_owned()))
            .bind(changes.name.as_ref().map(|n| n.as_str().to_owned()))
            .bind(
                changes
                    .password_hash
                    .as_ref()
                    .map(|h| h.as_ref().expose_secret().clone()),
            )
            .bind(changes.role.map(|r| r.as_str()));

        self.fetch_one_active(query).await
    }

    #[tracing::instrument(name = "Soft deleting user in PostgreSQL", skip(self))]
    async fn soft_delete(&self, id: UserId) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET deleted_at = NOW()
                WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(map_error)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::NotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Listing users from PostgreSQL", skip(self))]
    async fn list(&self, request: &PageRequest) -> Result<Page<User>, UserStoreError> {
        const FILTER: &str = r"deleted_at IS NULL AND ($1::TEXT IS NULL
            OR name ILIKE $1 ESCAPE '\' OR email ILIKE $1 ESCAPE '\')";
        let pattern = request.search_pattern();

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM users WHERE {FILTER}"))
            .bind(pattern.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(map_error)?;

        // `sort` is whitelisted by PageRequest, so splicing it is safe.
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE {FILTER} ORDER BY {} {} LIMIT $2 OFFSET $3",
            request.sort,
            request.order.as_sql()
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(pattern.as_deref())
            .bind(request.limit())
            .bind(request.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_error)?;

        let items = rows
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, request, total.max(0) as u64))
    }
}
