//! JWT token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use catalog_shared::constants::{REALM_ADMIN, REALM_STOREFRONT, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
    #[error("Wrong token type: expected {expected}, got {actual}")]
    WrongTokenType { expected: &'static str, actual: String },
    #[error("Token issued for another realm")]
    WrongRealm,
}

/// The two user populations; a token from one realm never opens the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Realm {
    Admin,
    Storefront,
}

impl Realm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Realm::Admin => REALM_ADMIN,
            Realm::Storefront => REALM_STOREFRONT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub user_id: i64,
    pub realm: Realm,
    pub token_type: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl JwtService {
    pub fn new(secret: &str, issuer: String, access_expiry: i64, refresh_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            access_token_expiry: access_expiry,
            refresh_token_expiry: refresh_expiry,
        }
    }

    pub fn access_token_expiry(&self) -> i64 {
        self.access_token_expiry
    }

    pub fn generate_access_token(&self, user_id: i64, realm: Realm) -> Result<String, JwtError> {
        self.generate_token(user_id, realm, TOKEN_TYPE_ACCESS, self.access_token_expiry)
    }

    pub fn generate_refresh_token(&self, user_id: i64, realm: Realm) -> Result<String, JwtError> {
        self.generate_token(user_id, realm, TOKEN_TYPE_REFRESH, self.refresh_token_expiry)
    }

    pub fn generate_pair(&self, user_id: i64, realm: Realm) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: self.generate_access_token(user_id, realm)?,
            refresh_token: self.generate_refresh_token(user_id, realm)?,
            token_type: "Bearer",
            expires_in: self.access_token_expiry,
        })
    }

    fn generate_token(&self, user_id: i64, realm: Realm, token_type: &str, expiry: i64) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            user_id,
            realm,
            token_type: token_type.to_string(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[self.issuer.as_str()]);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::ValidationError(e.to_string()),
            })
    }

    /// Validates an access token and checks it belongs to `realm`.
    pub fn validate_access(&self, token: &str, realm: Realm) -> Result<Claims, JwtError> {
        self.validate_typed(token, realm, TOKEN_TYPE_ACCESS)
    }

    /// Validates a refresh token of any realm.
    pub fn validate_refresh(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;
        Self::expect_type(&claims, TOKEN_TYPE_REFRESH)?;
        Ok(claims)
    }

    fn validate_typed(&self, token: &str, realm: Realm, token_type: &'static str) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;
        Self::expect_type(&claims, token_type)?;
        if claims.realm != realm {
            return Err(JwtError::WrongRealm);
        }
        Ok(claims)
    }

    fn expect_type(claims: &Claims, expected: &'static str) -> Result<(), JwtError> {
        if claims.token_type != expected {
            return Err(JwtError::WrongTokenType {
                expected,
                actual: claims.token_type.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("unit-test-secret", "eyewear-catalog".into(), 900, 3600)
    }

    #[test]
    fn test_access_token_roundtrip() {
        let jwt = service();
        let token = jwt.generate_access_token(42, Realm::Admin).unwrap();
        let claims = jwt.validate_access(&token, Realm::Admin).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.realm, Realm::Admin);
    }

    #[test]
    fn test_realms_do_not_mix() {
        let jwt = service();
        let token = jwt.generate_access_token(7, Realm::Storefront).unwrap();
        assert!(matches!(jwt.validate_access(&token, Realm::Admin), Err(JwtError::WrongRealm)));
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let jwt = service();
        let pair = jwt.generate_pair(7, Realm::Storefront).unwrap();
        assert!(matches!(
            jwt.validate_access(&pair.refresh_token, Realm::Storefront),
            Err(JwtError::WrongTokenType { .. })
        ));
        assert_eq!(jwt.validate_refresh(&pair.refresh_token).unwrap().user_id, 7);
        assert!(jwt.validate_refresh(&pair.access_token).is_err());
    }

    #[test]
    fn test_expired_token() {
        let jwt = JwtService::new("unit-test-secret", "eyewear-catalog".into(), -3600, 3600);
        let token = jwt.generate_access_token(1, Realm::Admin).unwrap();
        assert!(matches!(jwt.validate_token(&token), Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_other_secret_or_issuer_rejected() {
        let token = service().generate_access_token(1, Realm::Admin).unwrap();
        let other_secret = JwtService::new("another-secret", "eyewear-catalog".into(), 900, 3600);
        assert!(other_secret.validate_token(&token).is_err());
        let other_issuer = JwtService::new("unit-test-secret", "someone-else".into(), 900, 3600);
        assert!(other_issuer.validate_token(&token).is_err());
    }

    #[test]
    fn test_realm_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Realm::Storefront).unwrap(), "\"storefront\"");
    }
}
