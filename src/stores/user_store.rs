use std::sync::Arc;

use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash, PasswordHasher,
    PasswordVerifier, Version,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::auth::Role;
use crate::errors::InternalError;
use crate::stores::AuditStore;
use crate::types::db::user::{self, Entity as User};

/// UserStore manages back-office user accounts and credential checks
pub struct UserStore {
    db: DatabaseConnection,
    password_pepper: String,
    audit_store: Arc<AuditStore>,
}

impl UserStore {
    pub fn new(db: DatabaseConnection, password_pepper: String, audit_store: Arc<AuditStore>) -> Self {
        Self {
            db,
            password_pepper,
            audit_store,
        }
    }

    /// Create a new user with a hashed password
    ///
    /// # Errors
    ///
    /// `Duplicate` when the username or email is already taken
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
        actor_id: &str,
    ) -> Result<user::Model, InternalError> {
        let existing = User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_username", e))?;
        if existing.is_some() {
            return Err(InternalError::duplicate("username"));
        }

        let existing = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))?;
        if existing.is_some() {
            return Err(InternalError::duplicate("email"));
        }

        let password_hash = self.hash_password(password)?;
        let now = Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::database("begin_create_user", e))?;

        let new_user = user::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            role: Set(role.as_str().to_string()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = new_user.insert(&txn).await.map_err(|e| {
            // Unique constraint is the race backstop behind the pre-checks
            if InternalError::is_unique_violation(&e) {
                InternalError::duplicate("username or email")
            } else {
                InternalError::database("insert_user", e)
            }
        })?;

        self.audit_store
            .record(
                &txn,
                actor_id,
                "user_created",
                "user",
                &created.id,
                serde_json::json!({ "username": created.username, "role": created.role }),
            )
            .await?;

        txn.commit()
            .await
            .map_err(|e| InternalError::database("commit_create_user", e))?;

        Ok(created)
    }

    /// Verify username/password and return the user on success.
    ///
    /// Returns `Ok(None)` for unknown usernames, wrong passwords, and
    /// deactivated accounts - callers cannot distinguish which.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<user::Model>, InternalError> {
        let user = User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_username", e))?;

        let Some(user) = user else {
            return Ok(None);
        };

        if !user.is_active {
            return Ok(None);
        }

        let parsed_hash = match PasswordHash::new(&user.password_hash) {
            Ok(hash) => hash,
            Err(_) => return Ok(None),
        };

        let argon2 = self.argon2()?;
        if argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_err()
        {
            return Ok(None);
        }

        Ok(Some(user))
    }

    pub async fn list_users(&self) -> Result<Vec<user::Model>, InternalError> {
        User::find()
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_users", e))
    }

    /// Soft-deactivate a user. SUPER_ADMIN accounts cannot be deactivated.
    pub async fn deactivate_user(
        &self,
        id: &str,
        actor_id: &str,
    ) -> Result<user::Model, InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::database("begin_deactivate_user", e))?;

        let user = User::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("get_user", e))?
            .ok_or(InternalError::not_found("user"))?;

        if Role::parse(&user.role) == Some(Role::SuperAdmin) {
            return Err(InternalError::rule("Super admin cannot be deactivated"));
        }

        let username = user.username.clone();
        let mut active: user::ActiveModel = user.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now().timestamp());
        let updated = active
            .update(&txn)
            .await
            .map_err(|e| InternalError::database("deactivate_user", e))?;

        self.audit_store
            .record(
                &txn,
                actor_id,
                "user_deactivated",
                "user",
                id,
                serde_json::json!({ "username": username }),
            )
            .await?;

        txn.commit()
            .await
            .map_err(|e| InternalError::database("commit_deactivate_user", e))?;

        Ok(updated)
    }

    fn hash_password(&self, password: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);
        let argon2 = self.argon2()?;

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| InternalError::crypto("hash_password", e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Argon2id with the server-side pepper as the secret parameter
    fn argon2(&self) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(
            self.password_pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
    }
}
