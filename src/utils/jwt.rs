//! Token issue/verify on top of the jsonwebtoken crate.
//!
//! Claims carry the account id, role and owned profile id so a verified
//! token maps straight onto an access principal. The account is still
//! re-checked against the database per request (see the extractor), so a
//! token outlives a deleted account by at most one rejected call.

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::Error,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Account (user) id.
    pub sub: String,
    pub role: Role,
    /// Owned profile id: teacher, student or parent id matching `role`.
    pub profile_id: Uuid,
    pub iat: i64,
    pub exp: i64,
}

pub struct JwtManager {
    secret: String,
}

impl JwtManager {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn create_jwt(
        &self,
        user_id: &str,
        role: Role,
        profile_id: Uuid,
        ttl_seconds: i64,
    ) -> Result<String, Error> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: user_id.to_string(),
            role,
            profile_id,
            iat: now,
            exp: now + ttl_seconds,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    pub fn verify_jwt(&self, token: &str) -> Result<TokenClaims, Error> {
        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::errors::ErrorKind;

    use super::*;

    #[test]
    fn issued_token_round_trips() {
        let manager = JwtManager::new("test-secret");
        let user_id = Uuid::new_v4().to_string();
        let profile_id = Uuid::new_v4();

        let token = manager
            .create_jwt(&user_id, Role::Teacher, profile_id, 3600)
            .unwrap();
        let claims = manager.verify_jwt(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::Teacher);
        assert_eq!(claims.profile_id, profile_id);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let manager = JwtManager::new("test-secret");
        let token = manager
            .create_jwt("user", Role::Parent, Uuid::new_v4(), 3600)
            .unwrap();

        assert!(JwtManager::new("other-secret").verify_jwt(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let manager = JwtManager::new("test-secret");
        let token = manager
            .create_jwt("user", Role::Student, Uuid::new_v4(), -600)
            .unwrap();

        let err = manager.verify_jwt(&token).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ExpiredSignature));
    }
}
