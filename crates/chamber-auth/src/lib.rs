//! # chamber-auth
//!
//! Login sessions for the Chamber site.
//!
//! Provides token minting (`getrandom` + URL-safe base64), an in-memory
//! [`SessionStore`](chamber_core::identity::SessionStore), session cookie
//! parsing, and the [`Viewer`] gate that decides which actions a page offers.
//! The persistent store lives in `chamber-db`. The CLI uses
//! [`SessionCookie`] to print the `Set-Cookie` value for a login;
//! [`MemorySessionStore`] is for embedders that keep sessions in process.

pub mod cookie;
pub mod error;
pub mod memory_store;
pub mod token;
pub mod viewer;

pub use cookie::SessionCookie;
pub use error::AuthError;
pub use memory_store::MemorySessionStore;
pub use token::generate_token;
pub use viewer::{Viewer, resolve_user_id};
