use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::domain::{AuthClaims, AuthSession, LoginRequest, RegistrationRequest};
use super::errors::AuthError;
use super::hasher::{Argon2Hasher, CredentialHasher};
use super::login::LoginAccount;
use super::register::RegisterAccount;
use super::repository::AccountRepository;
use super::token::{JwtTokenIssuer, TokenIssuer};

/// Registration, login and token checks behind one handle, independent of
/// the web framework.
#[derive(Clone)]
pub struct AuthService {
    register: RegisterAccount,
    login: LoginAccount,
    tokens: Arc<dyn TokenIssuer>,
}

impl AuthService {
    pub fn new(
        repo: Arc<dyn AccountRepository>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            register: RegisterAccount::new(Arc::clone(&repo), Arc::clone(&hasher), Arc::clone(&tokens)),
            login: LoginAccount::new(repo, hasher, Arc::clone(&tokens)),
            tokens,
        }
    }

    /// Wire argon2 hashing and JWT signing from the `[auth]` config section.
    /// Fails with [`AuthError::Configuration`] when the secret is missing.
    pub fn from_config(
        repo: Arc<dyn AccountRepository>,
        cfg: &configs::AuthConfig,
    ) -> Result<Self, AuthError> {
        let (hasher, tokens) = Self::credentials_from_config(cfg)?;
        Ok(Self::new(repo, hasher, tokens))
    }

    /// Hasher and token issuer from the `[auth]` section, without a store.
    /// Lets startup reject a bad secret before touching the database.
    pub fn credentials_from_config(
        cfg: &configs::AuthConfig,
    ) -> Result<(Arc<dyn CredentialHasher>, Arc<dyn TokenIssuer>), AuthError> {
        let hasher = match cfg.argon2 {
            Some(a) => Argon2Hasher::with_costs(a.memory_kib, a.iterations, a.parallelism)?,
            None => Argon2Hasher::default(),
        };
        let tokens = JwtTokenIssuer::new(&cfg.jwt_secret, Duration::from_secs(cfg.token_lifetime_secs))?;
        info!(token_lifetime_secs = cfg.token_lifetime_secs, "auth service configured");
        Ok((Arc::new(hasher), Arc::new(tokens)))
    }

    /// Register a new account and return its name with a fresh token.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::AuthService;
    /// use service::auth::domain::RegistrationRequest;
    /// use service::auth::hasher::Argon2Hasher;
    /// use service::auth::repository::memory::InMemoryAccountRepository;
    /// use service::auth::token::{JwtTokenIssuer, DEFAULT_TOKEN_LIFETIME};
    ///
    /// let svc = AuthService::new(
    ///     Arc::new(InMemoryAccountRepository::new()),
    ///     Arc::new(Argon2Hasher::default()),
    ///     Arc::new(JwtTokenIssuer::new("secret", DEFAULT_TOKEN_LIFETIME).unwrap()),
    /// );
    /// let input = RegistrationRequest { name: "Ana Silva".into(), email: "ana@x.com".into(), password: "secret1".into() };
    /// let session = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(session.name, "Ana Silva");
    /// ```
    pub async fn register(&self, input: RegistrationRequest) -> Result<AuthSession, AuthError> {
        self.register.execute(input).await
    }

    /// Authenticate by email and password.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthError, AuthService};
    /// use service::auth::domain::{LoginRequest, RegistrationRequest};
    /// use service::auth::hasher::Argon2Hasher;
    /// use service::auth::repository::memory::InMemoryAccountRepository;
    /// use service::auth::token::{JwtTokenIssuer, DEFAULT_TOKEN_LIFETIME};
    ///
    /// let svc = AuthService::new(
    ///     Arc::new(InMemoryAccountRepository::new()),
    ///     Arc::new(Argon2Hasher::default()),
    ///     Arc::new(JwtTokenIssuer::new("secret", DEFAULT_TOKEN_LIFETIME).unwrap()),
    /// );
    /// tokio_test::block_on(svc.register(RegistrationRequest { name: "Ana Silva".into(), email: "ana@x.com".into(), password: "secret1".into() })).unwrap();
    /// let session = tokio_test::block_on(svc.login(LoginRequest { email: "ana@x.com".into(), password: "secret1".into() })).unwrap();
    /// assert!(!session.token.is_empty());
    /// let err = tokio_test::block_on(svc.login(LoginRequest { email: "ana@x.com".into(), password: "wrong".into() })).unwrap_err();
    /// assert!(matches!(err, AuthError::InvalidCredentials));
    /// ```
    pub async fn login(&self, input: LoginRequest) -> Result<AuthSession, AuthError> {
        self.login.execute(input).await
    }

    /// Check a bearer token and return its claims.
    pub fn verify_token(&self, token: &str) -> Result<AuthClaims, AuthError> {
        self.tokens.verify(token)
    }
}
