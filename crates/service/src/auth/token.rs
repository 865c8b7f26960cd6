//! Signed bearer tokens (HS256 JWT).
//!
//! Claims: `sub` (account id), `email`, `name`, plus `iat`/`nbf`/`exp` in
//! seconds since the epoch. Verification allows no clock skew.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use super::domain::{Account, AuthClaims};
use super::errors::AuthError;

/// Token lifetime used when none is configured.
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(60);

/// Issues and checks bearer tokens for accounts.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, account: &Account) -> Result<String, AuthError>;

    /// Decode and check signature and expiry.
    fn verify(&self, token: &str) -> Result<AuthClaims, AuthError>;
}

pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: chrono::Duration,
}

impl JwtTokenIssuer {
    /// Build an issuer for `secret`. An empty secret or a zero lifetime is a
    /// configuration error and should stop the service from starting.
    pub fn new(secret: &str, lifetime: Duration) -> Result<Self, AuthError> {
        if secret.trim().is_empty() {
            return Err(AuthError::Configuration("jwt secret is not configured".into()));
        }
        if lifetime.is_zero() {
            return Err(AuthError::Configuration("token lifetime must be positive".into()));
        }
        let lifetime = chrono::Duration::from_std(lifetime)
            .map_err(|e| AuthError::Configuration(format!("token lifetime out of range: {e}")))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime,
        })
    }

    pub fn lifetime(&self) -> chrono::Duration {
        self.lifetime
    }

    /// Claims for `account` as issued at `issued_at`.
    pub fn claims_for(&self, account: &Account, issued_at: DateTime<Utc>) -> AuthClaims {
        let iat = issued_at.timestamp();
        AuthClaims {
            sub: account.id.to_string(),
            email: account.email.clone(),
            name: account.name.clone(),
            iat,
            nbf: iat,
            exp: (issued_at + self.lifetime).timestamp(),
        }
    }

    /// Sign a token as if issued at `issued_at`.
    pub fn issue_at(&self, account: &Account, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = self.claims_for(account, issued_at);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Token(e.to_string()))
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, account: &Account) -> Result<String, AuthError> {
        self.issue_at(account, Utc::now())
    }

    fn verify(&self, token: &str) -> Result<AuthClaims, AuthError> {
        decode::<AuthClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "token rejected");
                AuthError::InvalidToken
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn account() -> Account {
        Account::new("Ana Silva".into(), "ana@x.com".into(), "$argon2id$placeholder".into())
    }

    fn issuer() -> JwtTokenIssuer {
        JwtTokenIssuer::new("test-secret", DEFAULT_TOKEN_LIFETIME).unwrap()
    }

    #[test]
    fn empty_secret_is_a_configuration_error() {
        assert!(matches!(JwtTokenIssuer::new("", DEFAULT_TOKEN_LIFETIME), Err(AuthError::Configuration(_))));
        assert!(matches!(JwtTokenIssuer::new("   ", DEFAULT_TOKEN_LIFETIME), Err(AuthError::Configuration(_))));
        assert!(matches!(JwtTokenIssuer::new("s", Duration::ZERO), Err(AuthError::Configuration(_))));
    }

    #[test]
    fn issued_token_carries_identity_claims() {
        let issuer = issuer();
        let account = account();
        let token = issuer.issue(&account).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.sub, account.id.to_string());
        assert_eq!(claims.email, "ana@x.com");
        assert_eq!(claims.name, "Ana Silva");
        assert_eq!(claims.exp - claims.iat, 60);
        assert_eq!(claims.nbf, claims.iat);
    }

    #[test]
    fn independent_verifier_accepts_token() {
        let account = account();
        let token = issuer().issue(&account).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<serde_json::Value>(&token, &DecodingKey::from_secret(b"test-secret"), &validation).unwrap();
        assert_eq!(data.header.alg, Algorithm::HS256);
        assert_eq!(data.claims["sub"], account.id.to_string());
        assert_eq!(data.claims["email"], "ana@x.com");
        assert_eq!(data.claims["name"], "Ana Silva");
    }

    #[test]
    fn expiry_follows_configured_lifetime() {
        let issuer = JwtTokenIssuer::new("test-secret", Duration::from_secs(900)).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let claims = issuer.claims_for(&account(), at);
        assert_eq!(claims.iat, at.timestamp());
        assert_eq!(claims.exp, at.timestamp() + 900);
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = issuer();
        let token = issuer
            .issue_at(&account(), Utc::now() - chrono::Duration::seconds(120))
            .unwrap();
        assert!(matches!(issuer.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let other = JwtTokenIssuer::new("other-secret", DEFAULT_TOKEN_LIFETIME).unwrap();
        let token = other.issue(&account()).unwrap();
        assert!(matches!(issuer().verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn tampered_or_malformed_token_is_rejected() {
        let issuer = issuer();
        let token = issuer.issue(&account()).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[2] = "AAAA";
        let tampered = parts.join(".");
        assert!(matches!(issuer.verify(&tampered), Err(AuthError::InvalidToken)));
        assert!(matches!(issuer.verify("not.a.jwt"), Err(AuthError::InvalidToken)));
        assert!(matches!(issuer.verify(""), Err(AuthError::InvalidToken)));
    }
}
