//! Route handler modules.

pub mod claims;
pub mod groups;
pub mod health;
pub mod ideas;
pub mod invites;
pub mod lists;
pub mod profile;
pub mod suggestions;

use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use domain::services::ListRelation;
use persistence::repositories::GroupRepository;

/// Resolves the caller's relation to a list owner.
///
/// Connection means at least one shared group right now; it is checked per
/// request and never cached, so leaving the last shared group cuts access
/// immediately.
pub(crate) async fn relation_to_owner(
    state: &AppState,
    caller: Uuid,
    owner_id: Uuid,
) -> Result<ListRelation, ApiError> {
    if caller == owner_id {
        return Ok(ListRelation::Owner);
    }
    let groups = GroupRepository::new(state.pool.clone());
    let shares = groups.shares_group(caller, owner_id).await?;
    Ok(ListRelation::resolve(caller, owner_id, shares))
}
