//! Account management, login and token authentication

use crate::contract::error::internal;
use crate::contract::{
    ActivityEntry, AuthContext, InventoryError, NewUser, Permission, ProfileUpdate, Role, User,
};
use super::activity::ActivityLog;
use super::auth::{PasswordHashing, TokenIssuer};
use super::repository::UserRepository;
use super::service::authorize;
use super::validation::{optional_text, validate_password, validate_username};
use anyhow::anyhow;
use std::sync::Arc;

/// Username of the account created on first start
pub const SUPERADMIN_USERNAME: &str = "superadmin";

const INVALID_LOGIN: &str = "Invalid username or password";
const INVALID_TOKEN: &str = "Could not validate credentials";

/// Successful login
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub access_token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: User,
}

pub struct AccountService {
    users: Arc<dyn UserRepository>,
    activity: ActivityLog,
    passwords: PasswordHashing,
    tokens: TokenIssuer,
    activity_log_limit: u64,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        activity: ActivityLog,
        passwords: PasswordHashing,
        tokens: TokenIssuer,
        activity_log_limit: u64,
    ) -> Self {
        Self {
            users,
            activity,
            passwords,
            tokens,
            activity_log_limit,
        }
    }

    async fn hash_password(&self, password: &str) -> Result<String, InventoryError> {
        let passwords = self.passwords.clone();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || passwords.hash(&password))
            .await
            .map_err(|e| internal(anyhow!(e)))?
            .map_err(internal)
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, InventoryError> {
        let passwords = self.passwords.clone();
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || passwords.verify(&password, &hash))
            .await
            .map_err(|e| internal(anyhow!(e)))
    }

    async fn require_user(&self, id: i32) -> Result<User, InventoryError> {
        self.users
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| InventoryError::not_found("User", id))
    }

    /// Create the default superadmin unless an account with that name exists.
    /// Returns whether an account was created.
    pub async fn ensure_superadmin(&self, password: &str) -> Result<bool, InventoryError> {
        if self
            .users
            .find_by_username(SUPERADMIN_USERNAME)
            .await
            .map_err(internal)?
            .is_some()
        {
            tracing::info!("Superadmin user already exists");
            return Ok(false);
        }

        let user = User {
            id: 0,
            username: SUPERADMIN_USERNAME.to_string(),
            name: None,
            password_hash: self.hash_password(password).await?,
            role: Role::Superadmin,
            created_at: chrono::Utc::now(),
        };
        self.users.create(&user).await.map_err(internal)?;
        tracing::warn!(
            username = SUPERADMIN_USERNAME,
            "Created default superadmin user; change its password"
        );
        Ok(true)
    }

    // ===== Authentication =====

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginSession, InventoryError> {
        let user = self
            .users
            .find_by_username(username.trim())
            .await
            .map_err(internal)?
            .ok_or_else(|| InventoryError::unauthorized(INVALID_LOGIN))?;

        if !self.verify_password(password, &user.password_hash).await? {
            tracing::info!(username = %user.username, "Rejected login with wrong password");
            return Err(InventoryError::unauthorized(INVALID_LOGIN));
        }

        let access_token = self
            .tokens
            .issue(user.id, &user.username)
            .map_err(internal)?;
        tracing::info!(user_id = user.id, username = %user.username, "User logged in");

        Ok(LoginSession {
            access_token,
            expires_in: self.tokens.ttl_seconds(),
            user,
        })
    }

    /// Resolve a bearer token to the current account
    pub async fn authenticate(&self, token: &str) -> Result<AuthContext, InventoryError> {
        let user_id = self.tokens.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            InventoryError::unauthorized(INVALID_TOKEN)
        })?;

        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| InventoryError::unauthorized(INVALID_TOKEN))?;

        Ok(AuthContext::from(&user))
    }

    // ===== User Management =====

    pub async fn register(&self, ctx: &AuthContext, request: NewUser) -> Result<User, InventoryError> {
        authorize(ctx, Permission::ManageUsers)?;
        let username = validate_username(&request.username)?;
        validate_password(&request.password)?;

        if !ctx.role.can_assign(request.role) {
            return Err(InventoryError::forbidden(
                "Admins can only create Editor or Viewer users",
            ));
        }

        if self
            .users
            .find_by_username(&username)
            .await
            .map_err(internal)?
            .is_some()
        {
            return Err(InventoryError::conflict("Username already exists"));
        }

        let user = User {
            id: 0,
            username,
            name: None,
            password_hash: self.hash_password(&request.password).await?,
            role: request.role,
            created_at: chrono::Utc::now(),
        };
        let user = self.users.create(&user).await.map_err(internal)?;
        tracing::info!(user_id = user.id, username = %user.username, role = %user.role, "User created");

        self.activity
            .record(
                ctx,
                "Create User",
                format!("user {}", user.username),
                Some(format!("Created new user with role {}", user.role)),
            )
            .await;

        Ok(user)
    }

    pub async fn list_users(&self, ctx: &AuthContext) -> Result<Vec<User>, InventoryError> {
        authorize(ctx, Permission::ManageUsers)?;
        self.users.list_all().await.map_err(internal)
    }

    /// Delete an account; returns the deleted username
    pub async fn delete_user(&self, ctx: &AuthContext, user_id: i32) -> Result<String, InventoryError> {
        authorize(ctx, Permission::ManageUsers)?;
        let target = self.require_user(user_id).await?;

        if target.id == ctx.user_id {
            return Err(InventoryError::conflict("Cannot delete your own account"));
        }
        if ctx.role == Role::Admin && matches!(target.role, Role::Admin | Role::Superadmin) {
            return Err(InventoryError::forbidden(
                "Admins cannot delete Admin or Superadmin users",
            ));
        }

        self.users.delete(target.id).await.map_err(internal)?;
        tracing::info!(user_id = target.id, username = %target.username, "User deleted");

        self.activity
            .record(
                ctx,
                "Delete User",
                format!("user {}", target.username),
                Some("Deleted user account".to_string()),
            )
            .await;

        Ok(target.username)
    }

    // ===== Profile =====

    pub async fn profile(&self, ctx: &AuthContext) -> Result<User, InventoryError> {
        self.require_user(ctx.user_id).await
    }

    pub async fn update_profile(
        &self,
        ctx: &AuthContext,
        update: ProfileUpdate,
    ) -> Result<User, InventoryError> {
        let mut user = self.require_user(ctx.user_id).await?;

        if let Some(name) = update.name {
            user.name = optional_text(Some(name));
        }

        if let Some(username) = update.username {
            let username = validate_username(&username)?;
            if username != user.username {
                if let Some(existing) = self
                    .users
                    .find_by_username(&username)
                    .await
                    .map_err(internal)?
                {
                    if existing.id != user.id {
                        return Err(InventoryError::conflict("Username already exists"));
                    }
                }
                user.username = username;
            }
        }

        if let Some(password) = update.password {
            validate_password(&password)?;
            user.password_hash = self.hash_password(&password).await?;
        }

        let user = self.users.update(&user).await.map_err(internal)?;
        tracing::info!(user_id = user.id, "Profile updated");

        self.activity
            .record(
                &AuthContext::from(&user),
                "Update Profile",
                format!("user {}", user.username),
                Some("User updated their profile".to_string()),
            )
            .await;

        Ok(user)
    }

    // ===== Activity =====

    /// Most recent activity entries, newest first
    pub async fn activity_logs(&self, ctx: &AuthContext) -> Result<Vec<ActivityEntry>, InventoryError> {
        authorize(ctx, Permission::ViewInventory)?;
        self.activity
            .repository()
            .list_recent(self.activity_log_limit)
            .await
            .map_err(internal)
    }
}
