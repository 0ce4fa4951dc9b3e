//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and template calls into editor-level APIs.
//! - Keep callers decoupled from storage details.

pub mod resume_service;
