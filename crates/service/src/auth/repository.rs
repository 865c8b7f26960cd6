use async_trait::async_trait;
use uuid::Uuid;

use super::domain::Account;
use super::errors::AuthError;

/// Storage port for accounts.
///
/// Implementations only need single-row atomicity. `create` must refuse a
/// second account for an email that is already stored.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn get_by_email(&self, email: &str) -> Result<Option<Account>, AuthError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Account>, AuthError>;
    async fn create(&self, account: Account) -> Result<Account, AuthError>;
}

/// In-process store, used by tests and when no database is configured.
pub mod memory {
    use super::*;
    use dashmap::{mapref::entry::Entry, DashMap};

    #[derive(Debug, Default)]
    pub struct InMemoryAccountRepository {
        accounts: DashMap<String, Account>, // key: email
    }

    impl InMemoryAccountRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn len(&self) -> usize {
            self.accounts.len()
        }

        pub fn is_empty(&self) -> bool {
            self.accounts.is_empty()
        }
    }

    #[async_trait]
    impl AccountRepository for InMemoryAccountRepository {
        async fn get_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
            Ok(self.accounts.get(email).map(|a| a.value().clone()))
        }

        async fn get_by_id(&self, id: Uuid) -> Result<Option<Account>, AuthError> {
            Ok(self
                .accounts
                .iter()
                .find(|a| a.value().id == id)
                .map(|a| a.value().clone()))
        }

        async fn create(&self, account: Account) -> Result<Account, AuthError> {
            match self.accounts.entry(account.email.clone()) {
                Entry::Occupied(_) => Err(AuthError::Repository("email already registered".into())),
                Entry::Vacant(slot) => {
                    slot.insert(account.clone());
                    Ok(account)
                }
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn account(email: &str) -> Account {
            Account::new("Ana Silva".into(), email.into(), "$argon2id$x".into())
        }

        #[tokio::test]
        async fn create_then_lookup() {
            let repo = InMemoryAccountRepository::new();
            let created = repo.create(account("ana@x.com")).await.unwrap();

            let by_email = repo.get_by_email("ana@x.com").await.unwrap().unwrap();
            assert_eq!(by_email.id, created.id);
            let by_id = repo.get_by_id(created.id).await.unwrap().unwrap();
            assert_eq!(by_id.email, "ana@x.com");
            assert!(repo.get_by_id(Uuid::new_v4()).await.unwrap().is_none());
        }

        #[tokio::test]
        async fn email_lookup_is_case_sensitive() {
            let repo = InMemoryAccountRepository::new();
            repo.create(account("ana@x.com")).await.unwrap();
            assert!(repo.get_by_email("ANA@x.com").await.unwrap().is_none());
        }

        #[tokio::test]
        async fn duplicate_email_is_refused() {
            let repo = InMemoryAccountRepository::new();
            repo.create(account("ana@x.com")).await.unwrap();
            let err = repo.create(account("ana@x.com")).await.unwrap_err();
            assert!(matches!(err, AuthError::Repository(_)));
            assert_eq!(repo.len(), 1);
        }
    }
}
