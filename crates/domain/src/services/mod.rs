//! Domain services.

pub mod notification;
pub mod policy;

pub use notification::{MockPushNotifier, PushMessage, PushNotifier, PushResult};
pub use policy::*;
