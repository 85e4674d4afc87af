pub mod credential;
pub mod factory;
pub mod ownership;

pub use credential::{CredentialError, Principal, SessionTokens, VerifiedSession};
pub use factory::build_session_tokens;
pub use ownership::{MissingTargetPolicy, OwnerScope, authorize_owner};
