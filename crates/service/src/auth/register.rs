use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{Account, AuthSession, RegistrationRequest};
use super::errors::AuthError;
use super::hasher::{hash_blocking, CredentialHasher};
use super::repository::AccountRepository;
use super::token::TokenIssuer;
use super::validator::RegistrationValidator;

pub const EMAIL_ALREADY_REGISTERED: &str = "Email já registrado na plataforma.";

/// Creates an account and signs the caller in.
///
/// The duplicate-email lookup and the insert are separate repository calls, so
/// two concurrent registrations for one address can both pass the lookup. The
/// store's own uniqueness rule decides the race; the loser gets a repository
/// error.
#[derive(Clone)]
pub struct RegisterAccount {
    repo: Arc<dyn AccountRepository>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenIssuer>,
    validator: RegistrationValidator,
}

impl RegisterAccount {
    pub fn new(
        repo: Arc<dyn AccountRepository>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self { repo, hasher, tokens, validator: RegistrationValidator }
    }

    #[instrument(name = "register_account", skip(self, input), fields(email = %input.email))]
    pub async fn execute(&self, input: RegistrationRequest) -> Result<AuthSession, AuthError> {
        let mut result = self.validator.validate(&input);

        if let Some(existing) = self.repo.get_by_email(&input.email).await? {
            debug!(account_id = %existing.id, "email already registered");
            result.push(EMAIL_ALREADY_REGISTERED);
        }

        if !result.is_valid() {
            info!(failures = result.errors().len(), "registration rejected");
            return Err(AuthError::ValidationFailed(result.into_errors()));
        }

        let RegistrationRequest { name, email, password } = input;
        let password_hash = hash_blocking(Arc::clone(&self.hasher), password).await?;
        let account = self.repo.create(Account::new(name, email, password_hash)).await?;
        let token = self.tokens.issue(&account)?;

        info!(account_id = %account.id, "account_registered");
        Ok(AuthSession { name: account.name, token })
    }
}
