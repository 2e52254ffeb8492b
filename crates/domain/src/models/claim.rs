//! Claim domain models.
//!
//! A claim marks that a non-owner intends to gift a specific idea. Existence
//! of the `(idea, user)` pair is the whole state; claimant identity is never
//! exposed, so the list owner can be surprised.

use serde::Serialize;

/// Claim state for the calling user on one idea.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ClaimStatusResponse {
    pub claimed: bool,
}
