//! Application services (outbound integrations).

pub mod email;
pub mod push;

pub use email::EmailService;
pub use push::RelayPushNotifier;
