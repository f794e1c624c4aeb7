//! In-memory `UserStore` for handler tests

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::{ConflictPolicy, User, UserStore};
use crate::db::{DbError, LookupField};

#[derive(Default)]
pub(crate) struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    policy: ConflictPolicy,
}

impl MemoryUserStore {
    pub(crate) fn with_policy(policy: ConflictPolicy) -> Self {
        Self {
            users: Mutex::default(),
            policy,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<User>> {
        self.users.lock().expect("memory store poisoned")
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<Uuid, DbError> {
        let mut users = self.lock();
        if let Some(existing) = users.iter().find(|u| u.email == email) {
            return match self.policy {
                ConflictPolicy::UpdateExisting => Ok(existing.id),
                ConflictPolicy::DoNothing => Err(DbError::EmailTaken {
                    email: email.to_owned(),
                }),
            };
        }

        let id = Uuid::new_v4();
        users.push(User {
            id,
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email: email.to_owned(),
        });
        Ok(id)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let mut users = self.lock();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(DbError::NotFound {
                resource: "user",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, DbError> {
        self.lock()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| DbError::NotFound {
                resource: "user",
                id: id.to_string(),
            })
    }

    async fn get_by_email(&self, email: &str) -> Result<User, DbError> {
        self.lock()
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| DbError::NotFound {
                resource: "user",
                id: email.to_owned(),
            })
    }

    async fn find_by(&self, field: LookupField, value: &str) -> Result<Vec<User>, DbError> {
        let mut found: Vec<User> = self
            .lock()
            .iter()
            .filter(|u| match field {
                LookupField::FirstName => u.first_name == value,
                LookupField::LastName => u.last_name == value,
                LookupField::Email => u.email == value,
            })
            .cloned()
            .collect();
        found.sort_by_key(|u| u.id);
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mirrors_repository_semantics() {
        let store = MemoryUserStore::default();

        let id1 = store.insert("Anish", "Sinha", "a@x.com").await.unwrap();
        let again = store.insert("Anish", "Sinha", "a@x.com").await.unwrap();
        assert_eq!(id1, again);
        assert_eq!(store.find_by(LookupField::Email, "a@x.com").await.unwrap().len(), 1);

        store.delete(id1).await.unwrap();
        assert!(matches!(
            store.get_by_id(id1).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
        assert!(matches!(
            store.delete(id1).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn strict_policy_reports_taken_email() {
        let store = MemoryUserStore::with_policy(ConflictPolicy::DoNothing);
        store.insert("Jenny", "Kim", "j@x.com").await.unwrap();

        let err = store.insert("Jenny", "Kim", "j@x.com").await.unwrap_err();
        assert!(matches!(err, DbError::EmailTaken { .. }));
    }
}
