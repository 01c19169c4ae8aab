//! Path-based access gate for page routes.
//!
//! Runs ahead of page rendering: requests without a valid token cookie are
//! redirected to the login page, requests to a path outside the principal's
//! role allow-list are redirected to the unauthorized page, and a fixed set
//! of public paths bypass the gate entirely. API routes do their own
//! per-endpoint checks and are not mounted behind this gate.

use std::sync::Arc;

use poem::web::Redirect;
use poem::{Endpoint, IntoResponse, Middleware, Request, Response, Result};

use crate::auth::role::Role;
use crate::auth::AUTH_COOKIE;
use crate::services::TokenService;

/// Paths that bypass the gate entirely
const PUBLIC_PREFIXES: &[&str] = &["/login", "/unauthorized", "/health", "/static"];

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PREFIXES.iter().any(|prefix| prefix_matches(prefix, path))
}

/// URL path prefixes each role may open as pages
pub fn page_prefixes(role: Role) -> &'static [&'static str] {
    match role {
        Role::SuperAdmin | Role::Admin => &["/"],
        Role::AdmissionStaff => &["/dashboard", "/students", "/applications"],
        Role::DocumentOfficer => &["/dashboard", "/students", "/documents"],
        Role::AccountsOfficer => &["/dashboard", "/students", "/fees", "/payments"],
        Role::Principal | Role::Director => &["/dashboard", "/students", "/reports"],
    }
}

pub fn page_allowed(role: Role, path: &str) -> bool {
    page_prefixes(role)
        .iter()
        .any(|prefix| prefix_matches(prefix, path))
}

fn prefix_matches(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Middleware enforcing the role → path allow-list on page routes
pub struct PageGate {
    token_service: Arc<TokenService>,
}

impl PageGate {
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }
}

impl<E: Endpoint> Middleware<E> for PageGate {
    type Output = PageGateEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        PageGateEndpoint {
            inner: ep,
            token_service: Arc::clone(&self.token_service),
        }
    }
}

pub struct PageGateEndpoint<E> {
    inner: E,
    token_service: Arc<TokenService>,
}

impl<E: Endpoint> Endpoint for PageGateEndpoint<E> {
    type Output = Response;

    async fn call(&self, req: Request) -> Result<Self::Output> {
        let path = req.uri().path().to_string();

        if is_public_path(&path) {
            return self.inner.call(req).await.map(IntoResponse::into_response);
        }

        let principal = cookie_token(&req)
            .and_then(|token| self.token_service.verify(&token).ok());

        match principal {
            None => Ok(Redirect::see_other("/login").into_response()),
            Some(principal) if !page_allowed(principal.role, &path) => {
                tracing::debug!(
                    role = principal.role.as_str(),
                    path = %path,
                    "page gate rejected request"
                );
                Ok(Redirect::see_other("/unauthorized").into_response())
            }
            Some(_) => self.inner.call(req).await.map(IntoResponse::into_response),
        }
    }
}

/// Pull the auth token out of the Cookie header, if present
fn cookie_token(req: &Request) -> Option<String> {
    let header = req.header("Cookie")?;
    for pair in header.split(';') {
        if let Some((name, value)) = pair.trim().split_once('=') {
            if name == AUTH_COOKIE {
                return Some(value.to_string());
            }
        }
    }
    None
}
