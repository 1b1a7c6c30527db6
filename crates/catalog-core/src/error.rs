//! Domain errors

use thiserror::Error;

use crate::tree::LinkError;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Category not found: {0}")]
    CategoryNotFound(i64),

    #[error("Parent category not found: {0}")]
    ParentCategoryNotFound(i64),

    #[error("Category name already exists: {0}")]
    CategoryNameAlreadyExists(String),

    #[error("Permission not found: {0}")]
    PermissionNotFound(i64),

    #[error("Parent permission not found: {0}")]
    ParentPermissionNotFound(i64),

    #[error("Permission name or route/method pair already exists: {0}")]
    PermissionAlreadyExists(String),

    #[error("Brand not found: {0}")]
    BrandNotFound(i64),

    #[error("Brand name already exists: {0}")]
    BrandNameAlreadyExists(String),

    #[error("A node cannot be its own parent: {0}")]
    SelfParent(i64),

    #[error("{id} cannot be moved under its own descendant {parent_id}")]
    ParentCycle { id: i64, parent_id: i64 },

    #[error("Hierarchy would be deeper than {0} levels")]
    TreeTooDeep(usize),

    #[error("Admin role not found: {0}")]
    SysRoleNotFound(i64),

    #[error("Admin role name already exists: {0}")]
    SysRoleNameAlreadyExists(String),

    #[error("Customer role not found: {0}")]
    RoleNotFound(i64),

    #[error("Customer role name or code already exists: {0}")]
    RoleAlreadyExists(String),

    #[error("Frame material not found: {0}")]
    FrameMaterialNotFound(i64),

    #[error("Frame material name already exists: {0}")]
    FrameMaterialNameAlreadyExists(String),

    #[error("Series not found: {0}")]
    SeriesNotFound(i64),

    #[error("Series name already exists: {0}")]
    SeriesNameAlreadyExists(String),

    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    #[error("Item code already exists: {0}")]
    ItemCodeAlreadyExists(String),

    #[error("Referenced record not found: {0}")]
    ReferenceNotFound(String),

    #[error("You cannot delete your own account")]
    CannotDeleteSelf,

    #[error("User not found")]
    UserNotFound,

    #[error("Account is disabled")]
    AccountDisabled,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{}: {}", field, msg),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        messages.sort();
        DomainError::ValidationError(messages.join(", "))
    }
}

impl From<LinkError> for DomainError {
    fn from(err: LinkError) -> Self {
        match err {
            LinkError::Cycle { node, parent } => DomainError::ParentCycle { id: node, parent_id: parent },
            LinkError::TooDeep { max } => DomainError::TreeTooDeep(max),
        }
    }
}

impl DomainError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::CategoryNotFound(_)
                | DomainError::PermissionNotFound(_)
                | DomainError::BrandNotFound(_)
                | DomainError::SysRoleNotFound(_)
                | DomainError::RoleNotFound(_)
                | DomainError::FrameMaterialNotFound(_)
                | DomainError::SeriesNotFound(_)
                | DomainError::ProductNotFound(_)
                | DomainError::UserNotFound
        )
    }

    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            DomainError::CategoryNameAlreadyExists(_)
                | DomainError::PermissionAlreadyExists(_)
                | DomainError::BrandNameAlreadyExists(_)
                | DomainError::SysRoleNameAlreadyExists(_)
                | DomainError::RoleAlreadyExists(_)
                | DomainError::FrameMaterialNameAlreadyExists(_)
                | DomainError::SeriesNameAlreadyExists(_)
                | DomainError::ItemCodeAlreadyExists(_)
                | DomainError::EmailAlreadyExists(_)
                | DomainError::UsernameAlreadyExists(_)
        )
    }
}
