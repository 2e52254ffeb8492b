//! Domain layer for the Giftlink backend.
//!
//! This crate contains:
//! - Domain models (User, Group, Invitation, GiftList, Idea, Suggestion, Claim)
//! - The visibility & mutation policy
//! - The push-notification abstraction

pub mod models;
pub mod services;
