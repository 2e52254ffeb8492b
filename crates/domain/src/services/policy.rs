//! Visibility & mutation policy.
//!
//! Pure decision functions over the caller's relation to a list owner.
//! Handlers resolve the relation once (via the membership graph) and every
//! allow/deny and filtering decision flows through here, so the rules live
//! in one place and unit tests can exercise them without a database.
//!
//! Idea visibility is asymmetric by role and is a filter, not an error:
//! a listing call silently omits what the caller may not see.

use uuid::Uuid;

use crate::models::GroupRole;

/// May the caller see a group and its member listing? Any member may;
/// the owner holds a membership like everyone else.
pub fn can_view_group(role: Option<GroupRole>) -> bool {
    role.is_some()
}

/// May the caller rename or delete a group? The owner role only.
pub fn can_manage_group(role: Option<GroupRole>) -> bool {
    matches!(role, Some(role) if role.can_manage_group())
}

/// The caller's relation to a gift list (equivalently, to its owner).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRelation {
    /// The caller owns the list.
    Owner,
    /// The caller shares at least one group with the owner.
    Connected,
    /// No shared group.
    Unrelated,
}

impl ListRelation {
    /// Resolves the relation from identity and graph facts.
    pub fn resolve(caller: Uuid, owner: Uuid, shares_group: bool) -> Self {
        if caller == owner {
            ListRelation::Owner
        } else if shares_group {
            ListRelation::Connected
        } else {
            ListRelation::Unrelated
        }
    }
}

/// May the caller view the list at all?
pub fn can_view_list(relation: ListRelation) -> bool {
    !matches!(relation, ListRelation::Unrelated)
}

/// May the caller rename or delete the list? Owner only.
pub fn can_edit_list(relation: ListRelation) -> bool {
    matches!(relation, ListRelation::Owner)
}

/// Is a single idea visible to the caller?
///
/// The owner never sees hidden-for-owner ideas; every connected non-owner
/// sees all ideas regardless of the flag.
pub fn idea_visible_to(relation: ListRelation, hidden_for_owner: bool) -> bool {
    match relation {
        ListRelation::Owner => !hidden_for_owner,
        ListRelation::Connected => true,
        ListRelation::Unrelated => false,
    }
}

/// Direct idea creation on a list.
///
/// The owner adds normal ideas. A connected non-owner may add directly too
/// (the surprise path, bypassing suggestion review) but the idea is then
/// hidden from the owner. Returns the `hidden_for_owner` value to store, or
/// `None` when creation is forbidden.
pub fn direct_idea_visibility(relation: ListRelation) -> Option<bool> {
    match relation {
        ListRelation::Owner => Some(false),
        ListRelation::Connected => Some(true),
        ListRelation::Unrelated => None,
    }
}

/// May the caller update or delete an idea? Owner only.
pub fn can_edit_idea(relation: ListRelation) -> bool {
    matches!(relation, ListRelation::Owner)
}

/// May the caller toggle a claim on an idea?
///
/// Requires a connected non-owner, and forbids claiming an idea the caller
/// authored themselves (self-claim).
pub fn can_toggle_claim(relation: ListRelation, idea_created_by: Uuid, caller: Uuid) -> bool {
    matches!(relation, ListRelation::Connected) && idea_created_by != caller
}

/// May the caller suggest an idea for this list? Connected non-owners only;
/// suggesting to your own list is rejected.
pub fn can_suggest(relation: ListRelation) -> bool {
    matches!(relation, ListRelation::Connected)
}

/// May the caller accept or reject suggestions on this list? Owner only.
pub fn can_review_suggestions(relation: ListRelation) -> bool {
    matches!(relation, ListRelation::Owner)
}
