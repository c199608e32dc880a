//! Runs the SQL stores against a real Postgres. Needs Docker:
//! `cargo test -p shelf_service --test api -- --ignored`.

use secrecy::Secret;
use shelf_adapters::{PostgresBookStore, PostgresUserStore};
use shelf_core::{
    BookChanges, BookStore, BookStoreError, DisplayName, Email, NewBook, NewUser, PageParams,
    PageRequest, PasswordHash, Role, UserChanges, UserStore, UserStoreError,
};
use shelf_service::{get_postgres_pool, run_migrations};
use sqlx::PgPool;
use testcontainers_modules::{
    postgres,
    testcontainers::{ContainerAsync, runners::AsyncRunner},
};

async fn migrated_pool() -> (ContainerAsync<postgres::Postgres>, PgPool) {
    let container = postgres::Postgres::default().start().await.unwrap();
    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();

    let url = format!("postgres://postgres:postgres@{host}:{port}/postgres");
    let pool = get_postgres_pool(&url, 2).await.unwrap();
    run_migrations(&pool).await.unwrap();

    (container, pool)
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: Email::parse(Secret::new(email.to_owned())).unwrap(),
        name: DisplayName::parse("Reader").unwrap(),
        password_hash: PasswordHash::new(Secret::new("$argon2id$v=19$stub".to_owned())),
        role: Role::User,
    }
}

#[tokio::test]
#[ignore = "needs Docker"]
async fn postgres_user_store_round_trip() {
    let (_container, pool) = migrated_pool().await;
    let store = PostgresUserStore::new(pool);

    let user = store.create(new_user("pg@example.com")).await.unwrap();
    assert_eq!(user.role, Role::User);
    assert_eq!(store.find_by_email(&user.email).await.unwrap().id, user.id);

    assert_eq!(
        store.create(new_user("pg@example.com")).await.unwrap_err(),
        UserStoreError::ConstraintViolation
    );

    let updated = store
        .update_fields(
            user.id,
            UserChanges {
                role: Some(Role::Admin),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.role, Role::Admin);
    assert_eq!(updated.name, user.name);

    store.soft_delete(user.id).await.unwrap();
    assert_eq!(
        store.find_by_id(user.id).await.unwrap_err(),
        UserStoreError::NotFound
    );
    assert_eq!(
        store.soft_delete(user.id).await.unwrap_err(),
        UserStoreError::NotFound
    );

    // The partial index only covers live rows.
    let again = store.create(new_user("pg@example.com")).await.unwrap();
    assert_ne!(again.id, user.id);
}

#[tokio::test]
#[ignore = "needs Docker"]
async fn postgres_book_store_joins_owner_and_paginates() {
    let (_container, pool) = migrated_pool().await;
    let users = PostgresUserStore::new(pool.clone());
    let books = PostgresBookStore::new(pool);

    let owner = users.create(new_user("owner@example.com")).await.unwrap();
    for (title, author) in [
        ("Emma", "Jane Austen"),
        ("Dune", "Frank Herbert"),
        ("Persuasion", "Jane Austen"),
    ] {
        books
            .create(NewBook::parse(owner.id, title, author, None).unwrap())
            .await
            .unwrap();
    }

    let request = PageRequest::parse(
        PageParams {
            size: Some(1),
            sort: Some("title".to_owned()),
            search: Some("AUSTEN".to_owned()),
            ..Default::default()
        },
        &["id", "title"],
    )
    .unwrap();
    let page = books.list(&request).await.unwrap();

    assert_eq!(page.info.total, 2);
    assert_eq!(page.info.total_pages, 2);
    assert_eq!(page.items[0].title, "Emma");
    assert_eq!(page.items[0].owner.as_ref().map(|o| o.id), Some(owner.id));

    let wildcard = PageRequest::parse(
        PageParams {
            search: Some("_".to_owned()),
            ..Default::default()
        },
        &["id"],
    )
    .unwrap();
    assert_eq!(books.list(&wildcard).await.unwrap().info.total, 0);

    let book = page.items[0].id;
    let changed = books
        .update_fields(
            book,
            BookChanges::parse(Some("Emma (annotated)"), None, None).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(changed.title, "Emma (annotated)");
    assert_eq!(changed.author, "Jane Austen");

    books.soft_delete(book).await.unwrap();
    assert_eq!(
        books.find_by_id(book).await.unwrap_err(),
        BookStoreError::NotFound
    );
}
