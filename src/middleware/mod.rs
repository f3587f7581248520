pub mod auth;

pub use auth::{cookie_auth, AuthUser};
