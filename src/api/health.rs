use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::types::dto::common::MessageResponse;

/// Liveness endpoint, outside the auth gate
pub struct HealthApi;

#[derive(Tags)]
enum HealthTags {
    /// Service health
    Health,
}

#[OpenApi(prefix_path = "/health")]
impl HealthApi {
    /// Report service liveness
    #[oai(path = "/", method = "get", tag = "HealthTags::Health")]
    async fn health(&self) -> Json<MessageResponse> {
        Json(MessageResponse::new("ok"))
    }
}
