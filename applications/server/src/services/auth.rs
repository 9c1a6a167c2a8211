/// Authentication service - JWT issuing and verification
use crate::error::{Result, ServerError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use setlist_core::UserId;

#[derive(Debug, Clone)]
pub struct AuthService {
    secret: String,
    access_token_expiration: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
}

impl AuthService {
    pub fn new(secret: String, access_expiration_hours: u64) -> Self {
        Self {
            secret,
            access_token_expiration: Duration::hours(access_expiration_hours as i64),
        }
    }

    /// Create an access token
    pub fn create_access_token(&self, user_id: &UserId) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.as_str().to_string(),
            exp: (now + self.access_token_expiration).timestamp(),
            iat: now.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), &claims, &encoding_key).map_err(ServerError::from)
    }

    /// Verify an access token and return the caller it was issued to
    pub fn verify_access_token(&self, token: &str) -> Result<UserId> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())?;

        if token_data.claims.sub.trim().is_empty() {
            return Err(ServerError::Auth("Token has no subject".to_string()));
        }
        Ok(UserId::new(token_data.claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation_and_verification() {
        let auth = AuthService::new("secret".to_string(), 24);
        let user_id = UserId::new("user-123");

        let token = auth.create_access_token(&user_id).unwrap();
        assert_eq!(auth.verify_access_token(&token).unwrap(), user_id);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let issuer = AuthService::new("secret-a".to_string(), 24);
        let verifier = AuthService::new("secret-b".to_string(), 24);

        let token = issuer.create_access_token(&UserId::new("user-123")).unwrap();
        assert!(verifier.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let auth = AuthService::new("secret".to_string(), 24);
        assert!(auth.verify_access_token("not-a-jwt").is_err());
    }
}
