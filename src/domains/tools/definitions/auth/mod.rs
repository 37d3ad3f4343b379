//! Authentication and session tools.
//!
//! - `login`: exchange email/password for a token pair
//! - `refresh`: force a token refresh
//! - `status`: describe the current session without revealing secrets
//! - `tenant`: choose the default tenant for subsequent calls

pub mod login;
pub mod refresh;
pub mod status;
pub mod tenant;

pub use login::{AuthLoginParams, AuthLoginTool};
pub use refresh::{AuthRefreshParams, AuthRefreshTool};
pub use status::{AuthStatusParams, AuthStatusTool};
pub use tenant::{TenantSelectParams, TenantSelectTool};
