mod verifier;

pub mod bearer;
pub mod model;

pub use verifier::TokenVerifier;
