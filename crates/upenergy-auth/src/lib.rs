//! Login stub for the UpEnergy marketplace.
//!
//! Records who is using the client and their role. Any name and email are
//! accepted; the record lives in the same key-value store as the cart.

mod error;
mod session;
mod user;

pub use error::AuthError;
pub use session::{AuthSession, USER_STORAGE_KEY};
pub use user::{LoginForm, Role, User, UserPatch};
