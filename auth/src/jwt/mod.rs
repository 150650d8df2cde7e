pub mod claims;
pub mod errors;
pub mod issuer;
pub mod lifetime;
pub mod validator;

pub use claims::Claims;
pub use errors::TokenError;
pub use issuer::TokenIssuer;
pub use issuer::DEFAULT_ISSUER;
pub use lifetime::LifetimePolicy;
pub use validator::TokenValidator;
