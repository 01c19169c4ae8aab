// End-to-end checks of the auth gate: cookie authentication, the role
// capability table behind each endpoint, and the page gate redirects.
mod common;

use std::sync::Arc;

use poem::http::StatusCode;
use poem::middleware::CookieJarManager;
use poem::test::TestClient;
use poem::{get, handler, Endpoint, EndpointExt, Route};
use poem_openapi::OpenApiService;

use admissions_backend::api::{
    AcademicsApi, AuthApi, DocumentsApi, FeesApi, HealthApi, StudentsApi, UsersApi,
};
use admissions_backend::app_data::AppData;
use admissions_backend::auth::{PageGate, Role};

fn api_client(app: &Arc<AppData>) -> TestClient<impl Endpoint> {
    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(Arc::clone(&app.user_store), Arc::clone(&app.token_service)),
            UsersApi::new(Arc::clone(&app.user_store), Arc::clone(&app.token_service)),
            AcademicsApi::new(Arc::clone(&app.academic_store), Arc::clone(&app.token_service)),
            StudentsApi::new(
                Arc::clone(&app.student_store),
                Arc::clone(&app.fee_store),
                Arc::clone(&app.token_service),
            ),
            DocumentsApi::new(Arc::clone(&app.document_store), Arc::clone(&app.token_service)),
            FeesApi::new(Arc::clone(&app.fee_store), Arc::clone(&app.token_service)),
        ),
        "Admissions Backend",
        "test",
    );

    TestClient::new(
        Route::new()
            .nest("/api", api_service)
            .with(CookieJarManager::new()),
    )
}

async fn token_for(app: &AppData, username: &str, role: Role) -> String {
    let user = common::seed_user(app, username, role).await;
    app.token_service
        .issue(&user.id, &user.username, role)
        .expect("Failed to issue token")
}

fn auth_cookie(token: &str) -> String {
    format!("admit_token={}", token)
}

#[tokio::test]
async fn test_request_without_cookie_is_401() {
    let app = common::setup().await;
    let cli = api_client(&app);

    let resp = cli.get("/api/students").send().await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_request_with_garbage_token_is_401() {
    let app = common::setup().await;
    let cli = api_client(&app);

    let resp = cli
        .get("/api/auth/me")
        .header("Cookie", auth_cookie("not-a-real-token"))
        .send()
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = common::setup().await;
    let cli = api_client(&app);

    let resp = cli.get("/api/health").send().await;
    resp.assert_status_is_ok();
}

#[tokio::test]
async fn test_login_sets_cookie_and_me_round_trips() {
    let app = common::setup().await;
    common::seed_user(&app, "clerk", Role::AdmissionStaff).await;
    let cli = api_client(&app);

    let resp = cli
        .post("/api/auth/login")
        .body_json(&serde_json::json!({
            "username": "clerk",
            "password": "password-123",
        }))
        .send()
        .await;
    resp.assert_status_is_ok();

    let json = resp.json().await;
    let token = json
        .value()
        .object()
        .get("token")
        .string()
        .to_string();

    let me = cli
        .get("/api/auth/me")
        .header("Cookie", auth_cookie(&token))
        .send()
        .await;
    me.assert_status_is_ok();
    let me_json = me.json().await;
    me_json
        .value()
        .object()
        .get("role")
        .assert_string("ADMISSION_STAFF");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_401() {
    let app = common::setup().await;
    common::seed_user(&app, "clerk", Role::AdmissionStaff).await;
    let cli = api_client(&app);

    let resp = cli
        .post("/api/auth/login")
        .body_json(&serde_json::json!({
            "username": "clerk",
            "password": "wrong",
        }))
        .send()
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_as_deactivated_user_is_401() {
    let app = common::setup().await;
    let admin = common::seed_user(&app, "admin", Role::Admin).await;
    let clerk = common::seed_user(&app, "clerk", Role::AdmissionStaff).await;
    app.user_store
        .deactivate_user(&clerk.id, &admin.id)
        .await
        .expect("deactivation should succeed");

    let cli = api_client(&app);
    let resp = cli
        .post("/api/auth/login")
        .body_json(&serde_json::json!({
            "username": "clerk",
            "password": "password-123",
        }))
        .send()
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_fee_adjustment_is_accounts_officer_only() {
    let app = common::setup().await;
    let cli = api_client(&app);
    let fixture = common::seed_academics(&app, 10_000).await;
    let clerk = common::seed_user(&app, "clerk", Role::AdmissionStaff).await;
    let student = common::seed_student(&app, &fixture.offering_id, &clerk.id).await;

    // Admin holds broad rights, but fee adjustment is stricter
    let admin_token = token_for(&app, "admin", Role::Admin).await;
    let resp = cli
        .post(format!("/api/students/{}/fee-adjustments", student.id))
        .header("Cookie", auth_cookie(&admin_token))
        .body_json(&serde_json::json!({
            "adjusted_fee": 8000,
            "reason": "Sibling discount",
        }))
        .send()
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);
    let json = resp.json().await;
    let message = json.value().object().get("message").string().to_string();
    assert!(message.contains("ACCOUNTS_OFFICER"));

    let accounts_token = token_for(&app, "accounts", Role::AccountsOfficer).await;
    let resp = cli
        .post(format!("/api/students/{}/fee-adjustments", student.id))
        .header("Cookie", auth_cookie(&accounts_token))
        .body_json(&serde_json::json!({
            "adjusted_fee": 8000,
            "reason": "Sibling discount",
        }))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_document_declaration_role_set() {
    let app = common::setup().await;
    let cli = api_client(&app);
    let fixture = common::seed_academics(&app, 10_000).await;
    let officer = common::seed_user(&app, "doc-officer", Role::DocumentOfficer).await;
    let student = common::seed_student(&app, &fixture.offering_id, &officer.id).await;
    let required = common::required_document_type_ids(&app).await;

    let accounts_token = token_for(&app, "accounts", Role::AccountsOfficer).await;
    let resp = cli
        .post(format!("/api/students/{}/documents", student.id))
        .header("Cookie", auth_cookie(&accounts_token))
        .body_json(&serde_json::json!({
            "document_type_id": required[0],
            "declared": true,
        }))
        .send()
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);

    let officer_token = app
        .token_service
        .issue(&officer.id, &officer.username, Role::DocumentOfficer)
        .unwrap();
    let resp = cli
        .post(format!("/api/students/{}/documents", student.id))
        .header("Cookie", auth_cookie(&officer_token))
        .body_json(&serde_json::json!({
            "document_type_id": required[0],
            "declared": true,
        }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    json.value()
        .object()
        .get("status")
        .assert_string("DOCUMENTS_INCOMPLETE");
}

#[tokio::test]
async fn test_application_entry_forbidden_for_document_officer() {
    let app = common::setup().await;
    let cli = api_client(&app);
    let fixture = common::seed_academics(&app, 10_000).await;

    let officer_token = token_for(&app, "doc-officer", Role::DocumentOfficer).await;
    let resp = cli
        .post("/api/students")
        .header("Cookie", auth_cookie(&officer_token))
        .body_json(&serde_json::json!({
            "full_name": "Asha Verma",
            "course_offering_id": fixture.offering_id,
        }))
        .send()
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_user_management_forbidden_below_admin() {
    let app = common::setup().await;
    let cli = api_client(&app);

    let clerk_token = token_for(&app, "clerk", Role::AdmissionStaff).await;
    let resp = cli
        .get("/api/users")
        .header("Cookie", auth_cookie(&clerk_token))
        .send()
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);

    let admin_token = token_for(&app, "admin", Role::Admin).await;
    let resp = cli
        .get("/api/users")
        .header("Cookie", auth_cookie(&admin_token))
        .send()
        .await;
    resp.assert_status_is_ok();
}

#[tokio::test]
async fn test_every_role_can_list_students() {
    let app = common::setup().await;
    let cli = api_client(&app);

    for (idx, role) in Role::ALL.into_iter().enumerate() {
        let token = token_for(&app, &format!("user{}", idx), role).await;
        let resp = cli
            .get("/api/students")
            .header("Cookie", auth_cookie(&token))
            .send()
            .await;
        resp.assert_status_is_ok();
    }
}

#[handler]
fn page() -> &'static str {
    "page"
}

fn page_client(app: &Arc<AppData>) -> TestClient<impl Endpoint> {
    let pages = Route::new()
        .at("/login", get(page))
        .at("/unauthorized", get(page))
        .at("/dashboard", get(page))
        .at("/documents", get(page))
        .at("/fees", get(page))
        .with(PageGate::new(Arc::clone(&app.token_service)));
    TestClient::new(pages)
}

#[tokio::test]
async fn test_page_gate_public_path_passes_through() {
    let app = common::setup().await;
    let cli = page_client(&app);

    let resp = cli.get("/login").send().await;
    resp.assert_status_is_ok();
}

#[tokio::test]
async fn test_page_gate_redirects_anonymous_to_login() {
    let app = common::setup().await;
    let cli = page_client(&app);

    let resp = cli.get("/dashboard").send().await;
    resp.assert_status(StatusCode::SEE_OTHER);
    resp.assert_header("location", "/login");
}

#[tokio::test]
async fn test_page_gate_redirects_disallowed_prefix_to_unauthorized() {
    let app = common::setup().await;
    let cli = page_client(&app);
    let token = token_for(&app, "doc-officer", Role::DocumentOfficer).await;

    let resp = cli
        .get("/fees")
        .header("Cookie", auth_cookie(&token))
        .send()
        .await;
    resp.assert_status(StatusCode::SEE_OTHER);
    resp.assert_header("location", "/unauthorized");
}

#[tokio::test]
async fn test_page_gate_allows_role_owned_prefix() {
    let app = common::setup().await;
    let cli = page_client(&app);
    let token = token_for(&app, "doc-officer", Role::DocumentOfficer).await;

    let resp = cli
        .get("/documents")
        .header("Cookie", auth_cookie(&token))
        .send()
        .await;
    resp.assert_status_is_ok();
}

#[tokio::test]
async fn test_page_gate_admin_covers_everything() {
    let app = common::setup().await;
    let cli = page_client(&app);
    let token = token_for(&app, "admin", Role::Admin).await;

    for path in ["/dashboard", "/documents", "/fees"] {
        let resp = cli
            .get(path)
            .header("Cookie", auth_cookie(&token))
            .send()
            .await;
        resp.assert_status_is_ok();
    }
}
