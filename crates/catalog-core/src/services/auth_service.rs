// ============================================================================
// Catalog Core - Authentication Service
// File: crates/catalog-core/src/services/auth_service.rs
// ============================================================================
//! Login, registration and token refresh for the admin console and the
//! storefront.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};
use validator::Validate;

use catalog_security::{JwtError, JwtService, PasswordService, Realm, TokenPair};
use catalog_shared::utils::mask_email;

use crate::domain::{Customer, CustomerDraft, CustomerStatus, NewCustomer, SysUser};
use crate::error::DomainError;
use crate::repositories::{CustomerRepository, SysUserRepository};

/// Who a token was issued to.
#[derive(Debug, Clone, Serialize)]
pub struct PrincipalInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub realm: Realm,
}

impl From<&SysUser> for PrincipalInfo {
    fn from(user: &SysUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            realm: Realm::Admin,
        }
    }
}

impl From<&Customer> for PrincipalInfo {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            username: customer.username.clone(),
            email: customer.email.clone(),
            realm: Realm::Storefront,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub user: PrincipalInfo,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub status: CustomerStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerProfile {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            username: customer.username,
            email: customer.email,
            avatar: customer.avatar,
            status: customer.status,
            created_at: customer.created_at,
        }
    }
}

/// Authentication service for both user populations
pub struct AuthService<S, C>
where
    S: SysUserRepository + ?Sized,
    C: CustomerRepository + ?Sized,
{
    sys_users: Arc<S>,
    customers: Arc<C>,
    jwt: Arc<JwtService>,
}

impl<S, C> AuthService<S, C>
where
    S: SysUserRepository + ?Sized,
    C: CustomerRepository + ?Sized,
{
    pub fn new(sys_users: Arc<S>, customers: Arc<C>, jwt: Arc<JwtService>) -> Self {
        Self { sys_users, customers, jwt }
    }

    /// Back-office login with email and password
    pub async fn admin_login(&self, email: &str, password: &str) -> Result<LoginResult, DomainError> {
        let email = email.trim();
        info!("Admin login attempt for: {}", mask_email(email));

        // 1. Find the account
        let user = self.sys_users.find_by_email(email).await?.ok_or_else(|| {
            warn!("Admin login failed: unknown email {}", mask_email(email));
            DomainError::InvalidCredentials
        })?;

        // 2. Verify the password before revealing account state
        Self::check_password(password, &user.password_hash)?;

        if !user.is_active {
            warn!(user_id = user.id, "Admin login rejected: account disabled");
            return Err(DomainError::AccountDisabled);
        }

        // 3. Upgrade legacy hashes
        if PasswordService::needs_rehash(&user.password_hash) {
            match PasswordService::hash(password) {
                Ok(hash) => {
                    if let Err(e) = self.sys_users.update_password_hash(user.id, &hash).await {
                        error!(user_id = user.id, "Failed to store upgraded password hash: {}", e);
                    }
                }
                Err(e) => error!(user_id = user.id, "Failed to rehash password: {}", e),
            }
        }

        // 4. Issue tokens
        let tokens = self.jwt.generate_pair(user.id, Realm::Admin).map_err(token_error)?;

        info!(user_id = user.id, "Admin login successful");
        Ok(LoginResult { user: PrincipalInfo::from(&user), tokens })
    }

    /// Storefront registration
    pub async fn register_customer(
        &self,
        input: NewCustomer,
        ip_address: Option<String>,
        auto_activate: bool,
    ) -> Result<Customer, DomainError> {
        let input = NewCustomer {
            username: input.username.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            password: input.password,
        };
        input.validate()?;
        info!("Registration attempt for: {}", mask_email(&input.email));

        // 1. Uniqueness
        if self.customers.find_by_email(&input.email).await?.is_some() {
            warn!("Registration failed: email already exists: {}", mask_email(&input.email));
            return Err(DomainError::EmailAlreadyExists(input.email));
        }
        if self.customers.find_by_username(&input.username).await?.is_some() {
            warn!("Registration failed: username already exists: {}", input.username);
            return Err(DomainError::UsernameAlreadyExists(input.username));
        }

        // 2. Hash password
        let password_hash =
            PasswordService::hash(&input.password).map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        // 3. Save
        let status = if auto_activate { CustomerStatus::Active } else { CustomerStatus::Inactive };
        let draft = CustomerDraft {
            username: input.username,
            email: input.email,
            password_hash,
            status,
            role_id: None,
            ip_address,
        };
        let created = self.customers.create(&draft).await?;

        info!(customer_id = created.id, status = created.status.as_str(), "Registration successful");
        Ok(created)
    }

    /// Storefront login with email and password
    pub async fn customer_login(&self, email: &str, password: &str) -> Result<LoginResult, DomainError> {
        let email = email.trim().to_lowercase();
        info!("Customer login attempt for: {}", mask_email(&email));

        let customer = self.customers.find_by_email(&email).await?.ok_or_else(|| {
            warn!("Customer login failed: unknown email {}", mask_email(&email));
            DomainError::InvalidCredentials
        })?;

        Self::check_password(password, &customer.password_hash)?;

        if !customer.can_login() {
            warn!(customer_id = customer.id, "Customer login rejected: account not active");
            return Err(DomainError::AccountDisabled);
        }

        if PasswordService::needs_rehash(&customer.password_hash) {
            match PasswordService::hash(password) {
                Ok(hash) => {
                    if let Err(e) = self.customers.update_password_hash(customer.id, &hash).await {
                        error!(customer_id = customer.id, "Failed to store upgraded password hash: {}", e);
                    }
                }
                Err(e) => error!(customer_id = customer.id, "Failed to rehash password: {}", e),
            }
        }

        let tokens = self.jwt.generate_pair(customer.id, Realm::Storefront).map_err(token_error)?;

        info!(customer_id = customer.id, "Customer login successful");
        Ok(LoginResult { user: PrincipalInfo::from(&customer), tokens })
    }

    /// Exchanges a refresh token for a new access token in the same realm.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        let claims = self.jwt.validate_refresh(refresh_token).map_err(|e| {
            warn!("Refresh rejected: {}", e);
            DomainError::InvalidToken(e.to_string())
        })?;

        // The account must still exist and be allowed in
        match claims.realm {
            Realm::Admin => {
                let user = self.sys_users.find_by_id(claims.user_id).await?.ok_or(DomainError::UserNotFound)?;
                if !user.is_active {
                    return Err(DomainError::AccountDisabled);
                }
            }
            Realm::Storefront => {
                let customer = self.customers.find_by_id(claims.user_id).await?.ok_or(DomainError::UserNotFound)?;
                if !customer.can_login() {
                    return Err(DomainError::AccountDisabled);
                }
            }
        }

        let access_token = self
            .jwt
            .generate_access_token(claims.user_id, claims.realm)
            .map_err(token_error)?;

        info!(user_id = claims.user_id, realm = claims.realm.as_str(), "Access token refreshed");
        Ok(TokenPair {
            access_token,
            refresh_token: refresh_token.to_string(),
            token_type: "Bearer",
            expires_in: self.jwt.access_token_expiry(),
        })
    }

    pub async fn customer_profile(&self, customer_id: i64) -> Result<CustomerProfile, DomainError> {
        self.customers
            .find_by_id(customer_id)
            .await?
            .map(CustomerProfile::from)
            .ok_or(DomainError::UserNotFound)
    }

    fn check_password(password: &str, hash: &str) -> Result<(), DomainError> {
        let valid = PasswordService::verify(password, hash).map_err(|_| DomainError::InvalidCredentials)?;
        if !valid {
            warn!("Login failed: invalid password");
            return Err(DomainError::InvalidCredentials);
        }
        Ok(())
    }
}

fn token_error(e: JwtError) -> DomainError {
    DomainError::TokenGenerationError(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockCustomerRepository, MockSysUserRepository};
    use mockall::predicate::eq;

    const SECRET: &str = "test-secret-key-that-is-long-enough";

    fn jwt() -> Arc<JwtService> {
        Arc::new(JwtService::new(SECRET, "catalog".into(), 900, 3600))
    }

    fn sys_user(hash: String, is_active: bool) -> SysUser {
        SysUser {
            id: 7,
            username: "admin".into(),
            email: "admin@example.com".into(),
            password_hash: hash,
            is_active,
            created_at: Utc::now(),
        }
    }

    fn customer(hash: String, status: CustomerStatus) -> Customer {
        Customer {
            id: 21,
            username: "jane".into(),
            email: "jane@example.com".into(),
            password_hash: hash,
            avatar: None,
            status,
            role_id: None,
            ip_address: None,
            created_at: Utc::now(),
        }
    }

    fn service(
        sys: MockSysUserRepository,
        cus: MockCustomerRepository,
    ) -> AuthService<MockSysUserRepository, MockCustomerRepository> {
        AuthService::new(Arc::new(sys), Arc::new(cus), jwt())
    }

    #[tokio::test]
    async fn test_admin_login_issues_admin_tokens() {
        let hash = PasswordService::hash("s3cret!").unwrap();
        let mut sys = MockSysUserRepository::new();
        sys.expect_find_by_email()
            .with(eq("admin@example.com"))
            .returning(move |_| Ok(Some(sys_user(hash.clone(), true))));
        sys.expect_update_password_hash().never();

        let result = service(sys, MockCustomerRepository::new())
            .admin_login(" admin@example.com ", "s3cret!")
            .await
            .unwrap();
        assert_eq!(result.user.id, 7);
        let claims = jwt().validate_access(&result.tokens.access_token, Realm::Admin).unwrap();
        assert_eq!(claims.user_id, 7);
    }

    #[tokio::test]
    async fn test_admin_login_wrong_password() {
        let hash = PasswordService::hash("s3cret!").unwrap();
        let mut sys = MockSysUserRepository::new();
        sys.expect_find_by_email().returning(move |_| Ok(Some(sys_user(hash.clone(), true))));

        let err = service(sys, MockCustomerRepository::new())
            .admin_login("admin@example.com", "nope")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_admin_login_disabled_account() {
        let hash = PasswordService::hash("s3cret!").unwrap();
        let mut sys = MockSysUserRepository::new();
        sys.expect_find_by_email().returning(move |_| Ok(Some(sys_user(hash.clone(), false))));

        let err = service(sys, MockCustomerRepository::new())
            .admin_login("admin@example.com", "s3cret!")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::AccountDisabled));
    }

    #[tokio::test]
    async fn test_admin_login_upgrades_bcrypt_hash() {
        let legacy = bcrypt::hash("s3cret!", 4).unwrap();
        let mut sys = MockSysUserRepository::new();
        sys.expect_find_by_email().returning(move |_| Ok(Some(sys_user(legacy.clone(), true))));
        sys.expect_update_password_hash()
            .withf(|id, hash| *id == 7 && hash.starts_with("$argon2"))
            .times(1)
            .returning(|_, _| Ok(()));

        let result = service(sys, MockCustomerRepository::new())
            .admin_login("admin@example.com", "s3cret!")
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_register_starts_inactive() {
        let mut cus = MockCustomerRepository::new();
        cus.expect_find_by_email().with(eq("jane@example.com")).returning(|_| Ok(None));
        cus.expect_find_by_username().with(eq("jane")).returning(|_| Ok(None));
        cus.expect_create()
            .withf(|d| d.status == CustomerStatus::Inactive && d.password_hash.starts_with("$argon2"))
            .returning(|d| Ok(customer(d.password_hash.clone(), d.status)));

        let created = service(MockSysUserRepository::new(), cus)
            .register_customer(
                NewCustomer {
                    username: "jane".into(),
                    email: "Jane@Example.com".into(),
                    password: "secret1".into(),
                },
                Some("127.0.0.1".into()),
                false,
            )
            .await
            .unwrap();
        assert_eq!(created.status, CustomerStatus::Inactive);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut cus = MockCustomerRepository::new();
        cus.expect_find_by_email()
            .returning(|_| Ok(Some(customer("x".into(), CustomerStatus::Active))));
        cus.expect_create().never();

        let err = service(MockSysUserRepository::new(), cus)
            .register_customer(
                NewCustomer {
                    username: "jane2".into(),
                    email: "jane@example.com".into(),
                    password: "secret1".into(),
                },
                None,
                true,
            )
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let err = service(MockSysUserRepository::new(), MockCustomerRepository::new())
            .register_customer(
                NewCustomer {
                    username: "jane".into(),
                    email: "jane@example.com".into(),
                    password: "123".into(),
                },
                None,
                true,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_customer_login_inactive_is_rejected() {
        let hash = PasswordService::hash("secret1").unwrap();
        let mut cus = MockCustomerRepository::new();
        cus.expect_find_by_email()
            .returning(move |_| Ok(Some(customer(hash.clone(), CustomerStatus::Inactive))));

        let err = service(MockSysUserRepository::new(), cus)
            .customer_login("jane@example.com", "secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::AccountDisabled));
    }

    #[tokio::test]
    async fn test_refresh_keeps_realm() {
        let hash = PasswordService::hash("secret1").unwrap();
        let mut cus = MockCustomerRepository::new();
        cus.expect_find_by_id()
            .with(eq(21))
            .returning(move |_| Ok(Some(customer(hash.clone(), CustomerStatus::Active))));

        let refresh = jwt().generate_refresh_token(21, Realm::Storefront).unwrap();
        let pair = service(MockSysUserRepository::new(), cus).refresh(&refresh).await.unwrap();

        assert_eq!(pair.refresh_token, refresh);
        assert!(jwt().validate_access(&pair.access_token, Realm::Storefront).is_ok());
        assert!(jwt().validate_access(&pair.access_token, Realm::Admin).is_err());
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let access = jwt().generate_access_token(7, Realm::Admin).unwrap();
        let err = service(MockSysUserRepository::new(), MockCustomerRepository::new())
            .refresh(&access)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn test_customer_profile_missing() {
        let mut cus = MockCustomerRepository::new();
        cus.expect_find_by_id().returning(|_| Ok(None));
        let err = service(MockSysUserRepository::new(), cus).customer_profile(1).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
