//! Request extractors: validated JSON bodies and session restore.

pub mod session;
pub mod validated_json;

pub use session::CurrentUser;
pub use validated_json::ValidatedJson;
