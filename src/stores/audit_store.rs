use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::errors::InternalError;
use crate::types::db::audit_log;

/// Append-only audit trail.
///
/// `record` takes the caller's connection so audit rows commit (or roll
/// back) atomically with the change they describe.
pub struct AuditStore;

impl AuditStore {
    pub fn new() -> Self {
        Self
    }

    /// Append an audit entry on the given connection/transaction
    pub async fn record<C: ConnectionTrait>(
        &self,
        conn: &C,
        actor_id: &str,
        action: &str,
        entity: &str,
        entity_id: &str,
        detail: serde_json::Value,
    ) -> Result<(), InternalError> {
        let entry = audit_log::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            timestamp: Set(Utc::now().to_rfc3339()),
            actor_id: Set(actor_id.to_string()),
            action: Set(action.to_string()),
            entity: Set(entity.to_string()),
            entity_id: Set(entity_id.to_string()),
            detail: Set(detail.to_string()),
        };

        entry
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("write_audit_entry", e))?;

        Ok(())
    }

    /// Fetch the audit trail for one entity, newest first
    pub async fn entries_for(
        &self,
        db: &DatabaseConnection,
        entity: &str,
        entity_id: &str,
    ) -> Result<Vec<audit_log::Model>, InternalError> {
        audit_log::Entity::find()
            .filter(audit_log::Column::Entity.eq(entity))
            .filter(audit_log::Column::EntityId.eq(entity_id))
            .order_by_desc(audit_log::Column::Id)
            .all(db)
            .await
            .map_err(|e| InternalError::database("list_audit_entries", e))
    }
}

impl Default for AuditStore {
    fn default() -> Self {
        Self::new()
    }
}
