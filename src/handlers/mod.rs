pub mod auth;
pub mod catalog;
pub mod foods;
pub mod gallery;
pub mod purchases;
pub mod users;
