//! Application services for the administrative listener.

pub mod analytics;
pub mod chrome;
pub mod submissions;
