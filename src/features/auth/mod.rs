//! Identity and role resolution for every protected endpoint.
//!
//! The guard resolves a bearer credential into `{user_id, role}` and nothing
//! more: token issuance, refresh and account management live outside this
//! service. Authorization decisions are made against the closed [`model::Role`]
//! enum, never against raw claim strings.

pub mod guards;
pub mod model;
pub mod validator;

pub use validator::JwtValidator;
