//! Client for the remote e-invoicing REST API.
//!
//! - `session` - connection and identity state shared by every call
//! - `request` - the request descriptor handed to the executor
//! - `response` - the success/failure envelope handed back
//! - `transport` - the HTTP seam and its reqwest implementation
//! - `executor` - [`ApiClient`], the single chokepoint for outbound calls

mod error;
pub mod executor;
pub mod request;
pub mod response;
pub mod session;
pub mod transport;

pub use error::{ApiError, ApiResult};
pub use executor::{ApiClient, API_KEY_PREFIX, LOGIN_PATH, REFRESH_PATH, TENANT_HEADER};
pub use request::{ApiRequest, HttpMethod, Upload};
pub use response::{ApiResponse, BinaryPayload, ResponseData};
pub use session::{Session, SessionStore, SessionUpdate};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
