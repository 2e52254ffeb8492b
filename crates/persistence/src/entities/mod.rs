//! Database entity definitions (row mappings).

pub mod group;
pub mod idea;
pub mod invitation;
pub mod list;
pub mod suggestion;
pub mod user;

pub use group::{GroupEntity, GroupRoleDb, GroupWithCountEntity, MemberWithListEntity};
pub use idea::{IdeaEntity, IdeaWithClaimCountEntity};
pub use invitation::{InvitationEntity, InvitationWithGroupEntity};
pub use list::GiftListEntity;
pub use suggestion::{SuggestionEntity, SuggestionStatusDb};
pub use user::UserEntity;
