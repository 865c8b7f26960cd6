use thiserror::Error;

pub const INVALID_CREDENTIALS: &str = "Usuário e/ou senha inválidos.";
pub const INVALID_TOKEN: &str = "Token inválido ou expirado.";
pub const INTERNAL_FAILURE: &str = "Ocorreu um erro interno. Tente novamente mais tarde.";

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {}", .0.join(" "))]
    ValidationFailed(Vec<String>),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("token error: {0}")]
    Token(String),
    #[error("repository error: {0}")]
    Repository(String),
}

/// How the transport layer should classify a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Client,
    Unauthorized,
    Internal,
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::ValidationFailed(_) => 1001,
            AuthError::InvalidCredentials => 1004,
            AuthError::InvalidToken => 1005,
            AuthError::Configuration(_) => 1100,
            AuthError::Hash(_) => 1101,
            AuthError::Token(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            AuthError::ValidationFailed(_) => ErrorClass::Client,
            AuthError::InvalidCredentials | AuthError::InvalidToken => ErrorClass::Unauthorized,
            AuthError::Configuration(_)
            | AuthError::Hash(_)
            | AuthError::Token(_)
            | AuthError::Repository(_) => ErrorClass::Internal,
        }
    }

    /// HTTP status for the error class.
    pub fn status(&self) -> u16 {
        match self.class() {
            ErrorClass::Client => 400,
            ErrorClass::Unauthorized => 401,
            ErrorClass::Internal => 500,
        }
    }

    /// Messages safe to hand back to the caller. Internal details stay in logs.
    pub fn public_messages(&self) -> Vec<String> {
        match self {
            AuthError::ValidationFailed(errors) => errors.clone(),
            AuthError::InvalidCredentials => vec![INVALID_CREDENTIALS.to_string()],
            AuthError::InvalidToken => vec![INVALID_TOKEN.to_string()],
            _ => vec![INTERNAL_FAILURE.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_map_to_statuses() {
        assert_eq!(AuthError::ValidationFailed(vec![]).status(), 400);
        assert_eq!(AuthError::InvalidCredentials.status(), 401);
        assert_eq!(AuthError::InvalidToken.status(), 401);
        assert_eq!(AuthError::Repository("down".into()).status(), 500);
        assert_eq!(AuthError::Configuration("no secret".into()).class(), ErrorClass::Internal);
    }

    #[test]
    fn internal_details_are_not_public() {
        let err = AuthError::Repository("connection refused to 10.0.0.3".into());
        let msgs = err.public_messages();
        assert_eq!(msgs, vec![INTERNAL_FAILURE.to_string()]);
    }

    #[test]
    fn validation_messages_keep_order() {
        let err = AuthError::ValidationFailed(vec!["a".into(), "b".into()]);
        assert_eq!(err.public_messages(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.code(), 1001);
    }
}
