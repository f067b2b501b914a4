//! Authentication: session state, persistence, guarding and sign-in.

pub mod api;
pub mod credentials;
pub mod guard;
pub mod session;

pub use api::{AuthApi, SignUpRequest};
pub use credentials::DeviceCredentialStore;
pub use guard::SessionGuard;
pub use session::{Session, StudentProfile};
