use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::Role;
use crate::config::BootstrapSettings;
use crate::errors::InternalError;
use crate::services::TokenService;
use crate::stores::{
    AcademicStore, AuditStore, DocumentStore, FeeStore, StudentStore, UserStore,
};

/// Main-owned application state.
///
/// Every store is created once here and shared with the API groups through
/// `Arc`, so there is exactly one owner of the database connection pool and
/// no module-level singletons.
pub struct AppData {
    pub db: DatabaseConnection,
    pub token_service: Arc<TokenService>,
    pub audit_store: Arc<AuditStore>,
    pub user_store: Arc<UserStore>,
    pub academic_store: Arc<AcademicStore>,
    pub student_store: Arc<StudentStore>,
    pub document_store: Arc<DocumentStore>,
    pub fee_store: Arc<FeeStore>,
}

impl AppData {
    /// Wire up stores over an already-migrated connection
    pub fn init(db: DatabaseConnection, settings: &BootstrapSettings) -> Self {
        let token_service = Arc::new(TokenService::new(settings.jwt_secret.clone()));
        let audit_store = Arc::new(AuditStore::new());

        let user_store = Arc::new(UserStore::new(
            db.clone(),
            settings.password_pepper.clone(),
            Arc::clone(&audit_store),
        ));
        let academic_store = Arc::new(AcademicStore::new(db.clone()));
        let student_store = Arc::new(StudentStore::new(db.clone(), Arc::clone(&audit_store)));
        let document_store = Arc::new(DocumentStore::new(db.clone(), Arc::clone(&audit_store)));
        let fee_store = Arc::new(FeeStore::new(db.clone(), Arc::clone(&audit_store)));

        Self {
            db,
            token_service,
            audit_store,
            user_store,
            academic_store,
            student_store,
            document_store,
            fee_store,
        }
    }

    /// Seed the bootstrap SUPER_ADMIN account when configured and absent
    pub async fn seed_bootstrap_admin(
        &self,
        settings: &BootstrapSettings,
    ) -> Result<(), InternalError> {
        let Some(password) = &settings.bootstrap_admin_password else {
            return Ok(());
        };

        let username = &settings.bootstrap_admin_username;
        let email = format!("{}@localhost", username);
        match self
            .user_store
            .create_user(username, &email, password, Role::SuperAdmin, "bootstrap")
            .await
        {
            Ok(user) => {
                tracing::info!("Seeded bootstrap super admin '{}'", user.username);
                Ok(())
            }
            Err(InternalError::Duplicate { .. }) => {
                tracing::debug!("Bootstrap super admin already exists, skipping");
                Ok(())
            }
            Err(other) => Err(other),
        }
    }
}
