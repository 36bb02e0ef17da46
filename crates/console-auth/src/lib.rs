//! User authentication policy resolution for the console server.
//!
//! Turns operator inputs (flags merged with the server config file) into a
//! validated, immutable auth policy and derives the authenticator
//! configuration (issuer, scopes, redirect endpoints, cookie policy) used at
//! server bring-up.

pub mod authenticator;
pub mod completion;
pub mod error;
pub mod inspect;
pub mod mode;
pub mod options;
pub mod secret;
pub mod url_join;
pub mod validation;

pub use authenticator::*;
pub use completion::*;
pub use error::*;
pub use inspect::*;
pub use mode::*;
pub use options::*;
pub use secret::*;
pub use url_join::*;
pub use validation::*;
