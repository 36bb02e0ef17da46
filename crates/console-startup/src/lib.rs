//! Startup wiring for the console user-auth policy: reads flags and config,
//! completes the policy, and builds the authenticator session settings.

mod bootstrap_helpers;
mod inspection_authenticator;
mod runtime_context;
mod startup_auth;

pub use bootstrap_helpers::init_tracing;
pub use inspection_authenticator::{InspectionAuthenticator, InspectionAuthenticatorBuilder};
pub use runtime_context::{build_auth_runtime_context, build_platform_transport, parse_base_address};
pub use startup_auth::{
    execute_console_auth_startup, render_session_summary, resolve_completed_auth_options,
};
