// Services layer - business logic helpers
pub mod token_service;

pub use token_service::TokenService;
