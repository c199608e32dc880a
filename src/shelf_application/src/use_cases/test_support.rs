//! In-memory fakes shared by the use case tests.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use secrecy::{ExposeSecret, Secret};
use shelf_core::{
    AccessToken, Book, BookChanges, BookId, BookStore, BookStoreError, DisplayName, Email,
    HashingError, NewBook, NewUser, Page, PageRequest, Password, PasswordHash, PasswordHasher, Role,
    TokenClaims, TokenError, TokenService, TokenSubject, User, UserChanges, UserId, UserStore,
    UserStoreError,
};
use tokio::sync::RwLock;

pub fn email(raw: &str) -> Email {
    Email::try_from(Secret::new(raw.to_owned())).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::try_from(Secret::new(raw.to_owned())).unwrap()
}

pub fn name(raw: &str) -> DisplayName {
    DisplayName::parse(raw).unwrap()
}

#[derive(Clone, Default)]
pub struct MockUserStore {
    users: Arc<RwLock<HashMap<i64, User>>>,
}

impl MockUserStore {
    pub async fn insert(&self, email_raw: &str, password_raw: &str, role: Role) -> User {
        let hash = PlainHasher.hash(&password(password_raw)).await.unwrap();
        self.create(NewUser {
            email: email(email_raw),
            name: name("Test User"),
            password_hash: hash,
            role,
        })
        .await
        .unwrap()
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|u| &u.email == email)
            .cloned()
            .ok_or(UserStoreError::NotFound)
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .get(&id.get())
            .cloned()
            .ok_or(UserStoreError::NotFound)
    }

    async fn create(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(UserStoreError::ConstraintViolation);
        }
        let id = UserId::new(users.keys().max().copied().unwrap_or(0) + 1).unwrap();
        let now = Utc::now();
        let stored = User {
            id,
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        users.insert(id.get(), stored.clone());
        Ok(stored)
    }

    async fn update_fields(
        &self,
        id: UserId,
        changes: UserChanges,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if let Some(email) = &changes.email {
            if users.values().any(|u| u.id != id && &u.email == email) {
                return Err(UserStoreError::ConstraintViolation);
            }
        }
        let user = users.get_mut(&id.get()).ok_or(UserStoreError::NotFound)?;
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn soft_delete(&self, id: UserId) -> Result<(), UserStoreError> {
        self.users
            .write()
            .await
            .remove(&id.get())
            .map(|_| ())
            .ok_or(UserStoreError::NotFound)
    }

    async fn list(&self, request: &PageRequest) -> Result<Page<User>, UserStoreError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        let total = users.len() as u64;
        let items = users
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit() as usize)
            .collect();
        Ok(Page::new(items, request, total))
    }
}

#[derive(Clone, Default)]
pub struct MockBookStore {
    books: Arc<RwLock<HashMap<i64, Book>>>,
}

#[async_trait]
impl BookStore for MockBookStore {
    async fn create(&self, book: NewBook) -> Result<Book, BookStoreError> {
        let mut books = self.books.write().await;
        let id = BookId::new(books.keys().max().copied().unwrap_or(0) + 1).unwrap();
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
        books.insert(id.get(), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Book, BookStoreError> {
        self.books
            .read()
            .await
            .get(&id.get())
            .cloned()
            .ok_or(BookStoreError::NotFound)
    }

    async fn list(&self, request: &PageRequest) -> Result<Page<Book>, BookStoreError> {
        let books: Vec<Book> = self.books.read().await.values().cloned().collect();
        let total = books.len() as u64;
        Ok(Page::new(books, request, total))
    }

    async fn update_fields(
        &self,
        id: BookId,
        changes: BookChanges,
    ) -> Result<Book, BookStoreError> {
        let mut books = self.books.write().await;
        let book = books.get_mut(&id.get()).ok_or(BookStoreError::NotFound)?;
        if let Some(title) = changes.title {
            book.title = title;
        }
        if let Some(author) = changes.author {
            book.author = author;
        }
        if let Some(description) = changes.description {
            book.description = description;
        }
        Ok(book.clone())
    }

    async fn soft_delete(&self, id: BookId) -> Result<(), BookStoreError> {
        self.books
            .write()
            .await
            .remove(&id.get())
            .map(|_| ())
            .ok_or(BookStoreError::NotFound)
    }
}

/// Reversible "hash" with a per-call counter standing in for the salt.
#[derive(Clone, Default)]
pub struct PlainHasher;

#[async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, HashingError> {
        static SALT: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);
        let salt = SALT.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        Ok(PasswordHash::new(Secret::new(format!(
            "plain${salt}${}",
            password.as_ref().expose_secret()
        ))))
    }

    async fn verify(&self, password: &Password, hash: &PasswordHash) -> bool {
        hash.as_ref()
            .expose_secret()
            .rsplit_once('$')
            .is_some_and(|(_, plain)| plain == password.as_ref().expose_secret())
    }
}

#[derive(Clone, Default)]
pub struct FailingHasher;

#[async_trait]
impl PasswordHasher for FailingHasher {
    async fn hash(&self, _password: &Password) -> Result<PasswordHash, HashingError> {
        Err(HashingError("entropy exhausted".to_owned()))
    }

    async fn verify(&self, _password: &Password, _hash: &PasswordHash) -> bool {
        false
    }
}

/// Tokens of the form `id|email|role|binding`, unsigned.
#[derive(Clone, Default)]
pub struct PlainTokens;

impl TokenService for PlainTokens {
    fn issue(&self, subject: &TokenSubject) -> Result<AccessToken, TokenError> {
        Ok(AccessToken::new(format!(
            "{}|{}|{}|{}",
            subject.id, subject.email, subject.role, subject.binding
        )))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let parts: Vec<&str> = token.split('|').collect();
        let [id, email, role, binding] = parts.as_slice() else {
            return Err(TokenError::InvalidToken);
        };
        let id = id.parse().map_err(|_| TokenError::InvalidToken)?;
        Ok(TokenClaims {
            subject: UserId::new(id).map_err(|_| TokenError::InvalidToken)?,
            email: (*email).to_owned(),
            role: role.parse().map_err(|_| TokenError::InvalidToken)?,
            binding: (*binding).to_owned(),
            issued_at: 0,
            expires_at: i64::MAX,
        })
    }
}
