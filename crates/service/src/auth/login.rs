use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{AuthSession, LoginRequest};
use super::errors::AuthError;
use super::hasher::{hash_blocking, verify_blocking, CredentialHasher};
use super::repository::AccountRepository;
use super::token::TokenIssuer;

/// Checks a password and issues a token.
///
/// An unknown email and a wrong password both end in
/// [`AuthError::InvalidCredentials`] so callers cannot probe for accounts.
/// Both paths also run one argon2 derivation, keeping response times alike.
#[derive(Clone)]
pub struct LoginAccount {
    repo: Arc<dyn AccountRepository>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl LoginAccount {
    pub fn new(
        repo: Arc<dyn AccountRepository>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self { repo, hasher, tokens }
    }

    #[instrument(name = "login_account", skip(self, input), fields(email = %input.email))]
    pub async fn execute(&self, input: LoginRequest) -> Result<AuthSession, AuthError> {
        let Some(account) = self.repo.get_by_email(&input.email).await? else {
            // same cost as a real verify; the result is irrelevant
            let _ = hash_blocking(Arc::clone(&self.hasher), input.password).await;
            info!(reason = "unknown_email", "login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        let matches = verify_blocking(
            Arc::clone(&self.hasher),
            input.password,
            account.password_hash.clone(),
        )
        .await?;
        if !matches {
            info!(account_id = %account.id, reason = "password_mismatch", "login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&account)?;
        info!(account_id = %account.id, "login_succeeded");
        Ok(AuthSession { name: account.name, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::domain::Account;
    use crate::auth::hasher::Argon2Hasher;
    use crate::auth::repository::memory::InMemoryAccountRepository;
    use crate::auth::token::{JwtTokenIssuer, DEFAULT_TOKEN_LIFETIME};
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn setup() -> (Arc<JwtTokenIssuer>, LoginAccount) {
        let repo = Arc::new(InMemoryAccountRepository::new());
        let hasher = Arc::new(Argon2Hasher::with_costs(4096, 1, 1).unwrap());
        let tokens = Arc::new(JwtTokenIssuer::new("test-secret", DEFAULT_TOKEN_LIFETIME).unwrap());
        let hash = hasher.hash("secret1").unwrap();
        repo.create(Account::new("Ana Silva".into(), "ana@x.com".into(), hash)).await.unwrap();
        (tokens.clone(), LoginAccount::new(repo, hasher, tokens))
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest { email: email.into(), password: password.into() }
    }

    #[tokio::test]
    async fn correct_password_returns_name_and_token() {
        let (tokens, uc) = setup().await;
        let session = uc.execute(login("ana@x.com", "secret1")).await.unwrap();
        assert_eq!(session.name, "Ana Silva");
        assert!(!session.token.is_empty());
        assert_eq!(tokens.verify(&session.token).unwrap().name, "Ana Silva");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let (_, uc) = setup().await;
        let wrong = uc.execute(login("ana@x.com", "wrong")).await.unwrap_err();
        let unknown = uc.execute(login("nobody@x.com", "secret1")).await.unwrap_err();

        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert_eq!(wrong.to_string(), unknown.to_string());
        assert_eq!(wrong.public_messages(), unknown.public_messages());
    }

    /// Records how many argon2-sized operations a login performs.
    #[derive(Default)]
    struct CountingHasher {
        calls: AtomicUsize,
    }

    impl CredentialHasher for CountingHasher {
        fn hash(&self, password: &str) -> Result<String, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("plain:{password}"))
        }

        fn verify(&self, password: &str, hash: &str) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            hash == format!("plain:{password}")
        }
    }

    #[tokio::test]
    async fn unknown_email_pays_the_same_hashing_cost() {
        let repo = Arc::new(InMemoryAccountRepository::new());
        repo.create(Account::new("Ana Silva".into(), "ana@x.com".into(), "plain:secret1".into())).await.unwrap();
        let hasher = Arc::new(CountingHasher::default());
        let tokens = Arc::new(JwtTokenIssuer::new("test-secret", DEFAULT_TOKEN_LIFETIME).unwrap());
        let uc = LoginAccount::new(repo, hasher.clone(), tokens);

        let err = uc.execute(login("nobody@x.com", "secret1")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(hasher.calls.load(Ordering::SeqCst), 1);

        let err = uc.execute(login("ana@x.com", "wrong")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(hasher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn corrupted_stored_hash_is_a_credential_failure() {
        let repo = Arc::new(InMemoryAccountRepository::new());
        repo.create(Account::new("Bob Lee".into(), "bob@x.com".into(), "garbage".into())).await.unwrap();
        let tokens = Arc::new(JwtTokenIssuer::new("test-secret", DEFAULT_TOKEN_LIFETIME).unwrap());
        let uc = LoginAccount::new(repo, Arc::new(Argon2Hasher::default()), tokens);

        let err = uc.execute(login("bob@x.com", "garbage")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
}
