//! # Monty Backend
//!
//! Classroom management for Montessori teachers: the student roster,
//! observations, the weekly schedule, the materials library, daily progress
//! tracking, per-user settings, a small assistant, progress reports and
//! weekly parent newsletters.
//!
//! ## Architecture
//!
//! - [`api`]: identifier newtypes and the shared entity vocabulary
//! - [`models`]: entity and payload types
//! - [`auth`]: password hashing and HS256 bearer tokens
//! - [`config`]: server settings from the environment
//! - [`db`]: repository traits, local and Postgres backends, service layer
//! - [`services`]: reports, newsletters, the dashboard and the assistant
//! - [`http`]: the axum REST API (feature `http-server`)

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
