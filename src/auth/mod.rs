// Auth layer - roles, principals, and the page gate
pub mod page_gate;
pub mod principal;
pub mod role;

pub use page_gate::PageGate;
pub use principal::Principal;
pub use role::{Capability, Role};

/// Name of the cookie carrying the signed auth token
pub const AUTH_COOKIE: &str = "admit_token";
