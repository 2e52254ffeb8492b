//! Domain models.

pub mod claim;
pub mod group;
pub mod idea;
pub mod invitation;
pub mod list;
pub mod suggestion;
pub mod user;

pub use claim::*;
pub use group::*;
pub use idea::*;
pub use invitation::*;
pub use list::*;
pub use suggestion::*;
pub use user::*;
