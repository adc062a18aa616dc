//! Client half of the cookie-session flow.
//!
//! Everything composes around one rule: the token never leaves the cookie
//! store. The embedding application feeds identity events in, watches the
//! session state, and calls the typed API methods; credentialed requests,
//! cookie replacement, and the terminal handling of rejected calls all
//! happen in here.

mod api;
mod driver;
mod error;
mod session;

pub use api::ApiClient;
pub use driver::{IdentityEvent, SessionDriver};
pub use error::ClientError;
pub use session::{SessionState, SessionWatch, SignOutCause};
