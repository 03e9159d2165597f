//! HS256 token verification on top of the pure claims model.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use thiserror::Error;

use crate::claims::{validate_claims, JwtClaims, TokenValidationError};

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("token rejected: {0}")]
    Decode(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// Token verification boundary consumed by the HTTP middleware.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, JwtError>;
}

/// HS256 shared-secret validator.
///
/// Signature checking is delegated to `jsonwebtoken`; the time window is
/// checked with [`validate_claims`] against the supplied `now`, which keeps
/// the check deterministic in tests.
pub struct Hs256JwtValidator {
    decoding: DecodingKey,
}

impl Hs256JwtValidator {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret.as_ref()),
        }
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, JwtError> {
        // Claims carry RFC3339 timestamps rather than numeric exp/iat, so the
        // library's registered-claim checks are disabled in favour of
        // validate_claims.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.decoding, &validation)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use emporium_core::UserId;
    use jsonwebtoken::{EncodingKey, Header};

    fn encode(secret: &str, claims: &JwtClaims) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_round_trips() {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: UserId::new(),
            issued_at: now,
            expires_at: now + Duration::minutes(10),
        };
        let token = encode("secret", &claims);

        let validated = Hs256JwtValidator::new("secret")
            .validate(&token, now + Duration::minutes(1))
            .unwrap();
        assert_eq!(validated, claims);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: UserId::new(),
            issued_at: now,
            expires_at: now + Duration::minutes(10),
        };
        let token = encode("secret", &claims);

        let err = Hs256JwtValidator::new("other-secret")
            .validate(&token, now)
            .unwrap_err();
        assert!(matches!(err, JwtError::Decode(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: UserId::new(),
            issued_at: now - Duration::minutes(20),
            expires_at: now - Duration::minutes(10),
        };
        let token = encode("secret", &claims);

        let err = Hs256JwtValidator::new("secret")
            .validate(&token, now)
            .unwrap_err();
        assert!(matches!(
            err,
            JwtError::Claims(TokenValidationError::Expired)
        ));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let err = Hs256JwtValidator::new("secret")
            .validate("not.a.jwt", Utc::now())
            .unwrap_err();
        assert!(matches!(err, JwtError::Decode(_)));
    }
}
