//! # tasktrack
//!
//! Self-hosted task tracking service: authenticated users create tasks,
//! decompose them into subtasks, and track completion progress.
//!
//! ## Architecture
//!
//! ```text
//!   request ──► auth middleware ──► route handler
//!                (UserStore)            │
//!                                       ▼
//!                                   TaskBoard ──► progress engine
//! ```
//!
//! An inbound request first resolves the caller's identity from the
//! `X-Session-Token` header, then reads or mutates the task board; any
//! status or subtask mutation runs the progress engine before the response
//! is rendered.
//!
//! ## Modules
//! - `api`: axum transport (routes, auth middleware, DTOs)
//! - `store`: in-memory user and task/subtask stores
//! - `progress`: progress computation and the completion cascade
//! - `config`: environment-driven server configuration

pub mod api;
pub mod config;
pub mod progress;
pub mod store;

pub use config::Config;
