use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    user::{UserId, UserSummary},
    validation::{FieldError, ValidationErrors, check_length},
};

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_AUTHOR_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    pub fn new(id: i64) -> Result<Self, FieldError> {
        if id <= 0 {
            return Err(FieldError::new("id", "Invalid ID"));
        }
        Ok(Self(id))
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored book together with its owner, when the owner is still active.
#[derive(Debug, Clone)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub owner_id: UserId,
    pub owner: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.id,
            title: self.title.clone(),
            author: self.author.clone(),
            description: self.description.clone(),
            user_id: self.owner_id,
            user: self.owner.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: String,
    pub owner_id: UserId,
}

impl NewBook {
    pub fn parse(
        owner_id: UserId,
        title: &str,
        author: &str,
        description: Option<&str>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let title = errors.check(parse_text("title", title, MAX_TITLE_LENGTH));
        let author = errors.check(parse_text("author", author, MAX_AUTHOR_LENGTH));
        let description = errors.check(parse_description(description.unwrap_or_default()));
        errors.into_result()?;

        match (title, author, description) {
            (Some(title), Some(author), Some(description)) => Ok(Self {
                title,
                author,
                description,
                owner_id,
            }),
            _ => Err(ValidationErrors::new()),
        }
    }
}

/// Partial update. Empty strings count as "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
}

impl BookChanges {
    pub fn parse(
        title: Option<&str>,
        author: Option<&str>,
        description: Option<&str>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let title = errors.check_opt(
            non_empty(title).map(|t| parse_text("title", t, MAX_TITLE_LENGTH)),
        );
        let author = errors.check_opt(
            non_empty(author).map(|a| parse_text("author", a, MAX_AUTHOR_LENGTH)),
        );
        let description = errors.check_opt(non_empty(description).map(parse_description));
        errors.into_result()?;

        Ok(Self {
            title,
            author,
            description,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.description.is_none()
    }
}

/// Wire shape of a book, with the owner embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub user_id: UserId,
    pub user: Option<UserSummary>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_text(field: &'static str, value: &str, max: usize) -> Result<String, FieldError> {
    let trimmed = value.trim();
    check_length(field, trimmed, 1, max)?;
    Ok(trimmed.to_owned())
}

fn parse_description(value: &str) -> Result<String, FieldError> {
    let trimmed = value.trim();
    check_length("desc", trimmed, 0, MAX_DESCRIPTION_LENGTH)?;
    Ok(trimmed.to_owned())
}
