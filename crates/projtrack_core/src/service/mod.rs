//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the commands and queries a
//!   presentation layer needs.
//! - Keep UI layers decoupled from storage details.

pub mod project_service;
