//! Shared utilities and common types for the Giftlink backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Invite token generation
//! - Session token (JWT) validation for the external identity gateway
//! - Common validation logic

pub mod crypto;
pub mod session;
pub mod validation;
