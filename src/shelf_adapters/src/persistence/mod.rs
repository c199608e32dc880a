pub mod hashmap_book_store;
pub mod hashmap_user_store;
pub mod postgres_book_store;
pub mod postgres_user_store;

pub use hashmap_book_store::HashMapBookStore;
pub use hashmap_user_store::HashMapUserStore;
pub use postgres_book_store::PostgresBookStore;
pub use postgres_user_store::PostgresUserStore;
