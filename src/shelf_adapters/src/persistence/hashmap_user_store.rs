use std::{cmp::Ordering, collections::BTreeMap, sync::Arc};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use shelf_core::{
    Email, NewUser, Page, PageRequest, SortOrder, User, UserChanges, UserId, UserStore,
    UserStoreError, UserSummary,
};

struct UserRecord {
    user: User,
    deleted_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    fn active(&self) -> Option<&User> {
        self.deleted_at.is_none().then_some(&self.user)
    }
}

#[derive(Default)]
struct UserTable {
    rows: BTreeMap<i64, UserRecord>,
    last_id: i64,
}

impl UserTable {
    fn active(&self) -> impl Iterator<Item = &User> {
        self.rows.values().filter_map(UserRecord::active)
    }

    fn email_taken(&self, email: &Email, except: Option<UserId>) -> bool {
        self.active()
            .any(|u| &u.email == email && Some(u.id) != except)
    }
}

/// In-memory user store. Soft-deleted rows stay in the map but are skipped
/// by every read.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<UserTable>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Public projection of an active user, used to embed book owners.
    pub async fn active_summary(&self, id: UserId) -> Option<UserSummary> {
        let users = self.users.read().await;
        users
            .rows
            .get(&id.get())
            .and_then(UserRecord::active)
            .map(User::summary)
    }
}

fn compare(a: &User, b: &User, column: &str) -> Ordering {
    match column {
        "name" => a.name.as_str().cmp(b.name.as_str()),
        "email" => a.email.as_str().cmp(b.email.as_str()),
        "role" => a.role.as_str().cmp(b.role.as_str()),
        "created_at" => a.created_at.cmp(&b.created_at),
        "updated_at" => a.updated_at.cmp(&b.updated_at),
        _ => a.id.cmp(&b.id),
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .active()
            .find(|u| &u.email == email)
            .cloned()
            .ok_or(UserStoreError::NotFound)
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .rows
            .get(&id.get())
            .and_then(UserRecord::active)
            .cloned()
            .ok_or(UserStoreError::NotFound)
    }

    async fn create(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.email_taken(&user.email, None) {
            return Err(UserStoreError::ConstraintViolation);
        }

        users.last_id += 1;
        let id = UserId::new(users.last_id).map_err(|e| UserStoreError::Unexpected(e.to_string()))?;
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
        users.rows.insert(
            id.get(),
            UserRecord {
                user: stored.clone(),
                deleted_at: None,
            },
        );
        Ok(stored)
    }

    async fn update_fields(
        &self,
        id: UserId,
        changes: UserChanges,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if let Some(email) = &changes.email {
            if users.email_taken(email, Some(id)) {
                return Err(UserStoreError::ConstraintViolation);
            }
        }

        let record = users
            .rows
            .get_mut(&id.get())
            .filter(|r| r.deleted_at.is_none())
            .ok_or(UserStoreError::NotFound)?;

        let user = &mut record.user;
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn soft_delete(&self, id: UserId) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let record = users
            .rows
            .get_mut(&id.get())
            .filter(|r| r.deleted_at.is_none())
            .ok_or(UserStoreError::NotFound)?;
        record.deleted_at = Some(Utc::now());
        Ok(())
    }

    async fn list(&self, request: &PageRequest) -> Result<Page<User>, UserStoreError> {
        let users = self.users.read().await;
        let needle = request.search.as_deref().map(str::to_lowercase);

        let mut matching: Vec<&User> = users
            .active()
            .filter(|u| match &needle {
                Some(needle) => {
                    u.name.as_str().to_lowercase().contains(needle)
                        || u.email.as_str().to_lowercase().contains(needle)
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
        let items = matching
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit() as usize)
            .cloned()
            .collect();

        Ok(Page::new(items, request, total))
    }
}
