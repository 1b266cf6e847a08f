//! Application services layer.

pub mod admin;
pub mod analytics;
pub mod chrome;
pub mod contact;
pub mod error;
pub mod page;
pub mod render;
pub mod repos;
