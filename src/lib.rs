//! Vitrine: a section-composed marketing site with page-view analytics and a
//! loopback-only admin surface.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
