//! Résumé domain model.
//!
//! # Responsibility
//! - Define the rich-text document tree and the résumé aggregate built on it.
//! - Own the validation rules that gate persistence.
//!
//! # Invariants
//! - Every persisted record is identified by a stable `ResumeId`.
//! - Core code only produces current-format content elements.

pub mod document;
pub mod resume;
pub mod timestamp;
pub mod validation;
