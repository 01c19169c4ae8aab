// API request/response models
pub mod academic;
pub mod auth;
pub mod common;
pub mod document;
pub mod fee;
pub mod student;
pub mod user;
