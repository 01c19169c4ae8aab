mod api;
mod app_data;
mod auth;
mod config;
mod errors;
mod lifecycle;
mod services;
mod stores;
mod types;

use std::sync::Arc;

use poem::middleware::CookieJarManager;
use poem::{get, handler, listener::TcpListener, EndpointExt, Route, Server};
use poem_openapi::OpenApiService;

use crate::api::{AcademicsApi, AuthApi, DocumentsApi, FeesApi, HealthApi, StudentsApi, UsersApi};
use crate::app_data::AppData;
use crate::auth::PageGate;
use crate::config::BootstrapSettings;

#[handler]
fn login_page() -> poem::web::Html<&'static str> {
    poem::web::Html(include_str!("../static/login.html"))
}

#[handler]
fn unauthorized_page() -> poem::web::Html<&'static str> {
    poem::web::Html(include_str!("../static/unauthorized.html"))
}

#[handler]
fn dashboard_page() -> poem::web::Html<&'static str> {
    poem::web::Html(include_str!("../static/dashboard.html"))
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    dotenv::dotenv().ok();

    if let Err(e) = config::init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let settings = match BootstrapSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let db = match config::init_database(&settings).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Database initialization failed: {}", e);
            std::process::exit(1);
        }
    };

    let app_data = Arc::new(AppData::init(db, &settings));
    if let Err(e) = app_data.seed_bootstrap_admin(&settings).await {
        tracing::error!("Bootstrap admin seeding failed: {}", e);
        std::process::exit(1);
    }

    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(
                Arc::clone(&app_data.user_store),
                Arc::clone(&app_data.token_service),
            ),
            UsersApi::new(
                Arc::clone(&app_data.user_store),
                Arc::clone(&app_data.token_service),
            ),
            AcademicsApi::new(
                Arc::clone(&app_data.academic_store),
                Arc::clone(&app_data.token_service),
            ),
            StudentsApi::new(
                Arc::clone(&app_data.student_store),
                Arc::clone(&app_data.fee_store),
                Arc::clone(&app_data.token_service),
            ),
            DocumentsApi::new(
                Arc::clone(&app_data.document_store),
                Arc::clone(&app_data.token_service),
            ),
            FeesApi::new(
                Arc::clone(&app_data.fee_store),
                Arc::clone(&app_data.token_service),
            ),
        ),
        "Admissions Backend",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("http://{}/api", settings.bind_addr));

    let ui = api_service.swagger_ui();

    // Page shell routes sit behind the gate; API routes check per endpoint
    let pages = Route::new()
        .at("/login", get(login_page))
        .at("/unauthorized", get(unauthorized_page))
        .at("/dashboard", get(dashboard_page))
        .at("/students", get(dashboard_page))
        .at("/applications", get(dashboard_page))
        .at("/documents", get(dashboard_page))
        .at("/fees", get(dashboard_page))
        .at("/payments", get(dashboard_page))
        .at("/reports", get(dashboard_page))
        .with(PageGate::new(Arc::clone(&app_data.token_service)));

    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .nest("/", pages)
        .with(CookieJarManager::new());

    tracing::info!("Starting server on http://{}", settings.bind_addr);
    tracing::info!("Swagger UI available under /swagger");

    Server::new(TcpListener::bind(settings.bind_addr.clone()))
        .run_with_graceful_shutdown(
            app,
            async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutdown signal received");
            },
            None,
        )
        .await
}
