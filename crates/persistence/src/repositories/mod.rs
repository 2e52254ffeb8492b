//! Repository implementations.

pub mod claim;
pub mod group;
pub mod idea;
pub mod invitation;
pub mod list;
pub mod suggestion;
pub mod user;

pub use claim::ClaimRepository;
pub use group::GroupRepository;
pub use idea::IdeaRepository;
pub use invitation::{InvitationRepository, RedeemOutcome};
pub use list::GiftListRepository;
pub use suggestion::SuggestionRepository;
pub use user::UserRepository;
