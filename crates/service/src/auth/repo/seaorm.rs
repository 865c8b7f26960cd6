use chrono::Utc;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use models::account;
use models::errors::ModelError;

use crate::auth::domain::Account;
use crate::auth::errors::AuthError;
use crate::auth::repository::AccountRepository;

/// Account store on PostgreSQL. The unique index on `account.email` backs the
/// one-account-per-email rule.
#[derive(Clone)]
pub struct SeaOrmAccountRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(m: account::Model) -> Account {
    Account {
        id: m.id,
        name: m.name,
        email: m.email,
        password_hash: m.password_hash,
        created_at: m.created_at.with_timezone(&Utc),
    }
}

fn repo_err(e: ModelError) -> AuthError {
    AuthError::Repository(e.to_string())
}

#[async_trait::async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn get_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
        let found = account::find_by_email(&self.db, email).await.map_err(repo_err)?;
        Ok(found.map(to_domain))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Account>, AuthError> {
        let found = account::find_by_id(&self.db, id).await.map_err(repo_err)?;
        Ok(found.map(to_domain))
    }

    async fn create(&self, a: Account) -> Result<Account, AuthError> {
        let row = account::NewAccount {
            id: a.id,
            name: a.name,
            email: a.email,
            password_hash: a.password_hash,
            created_at: a.created_at,
        };
        let created = account::insert(&self.db, row).await.map_err(repo_err)?;
        Ok(to_domain(created))
    }
}
