//! # smfedit
//!
//! Edit an existing post on a Simple Machines Forum (SMF) board without a
//! browser: log in, scrape the post's edit form, change the fields you
//! care about and submit it back.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use smfedit::{Credentials, EditRequest, FieldOverrides, ForumConfig, ForumEditor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smfedit::EditError> {
//!     let editor = ForumEditor::new(ForumConfig::default());
//!     let outcome = editor
//!         .edit(
//!             &Credentials::new("me", "my_password"),
//!             &EditRequest::new(433374, "45557.0", FieldOverrides::new().subject("new subject")),
//!         )
//!         .await?;
//!     println!("submitted, check {}", outcome.permalink());
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Transport error codes
//! - [`socket`] - DNS → TCP → TLS connection setup
//! - [`http`] - Single HTTP/1.1 transactions and bodies
//! - [`urlrequest`] - Redirect-following request jobs
//! - [`cookies`] - `Set-Cookie` parsing and the session cookie jar
//! - [`client`] - Builder-style client tying the layers together
//! - [`forum`] - The SMF edit pipeline
//!
//! ## Limitations
//!
//! SMF answers accepted and rejected edits alike, so a completed run is
//! reported as [`EditOutcome::Unconfirmed`]. Token discovery relies on
//! SMF's 32-character session-check value.

pub mod base;
pub mod client;
pub mod cookies;
pub mod forum;
pub mod http;
pub mod socket;
pub mod urlrequest;

pub use base::neterror::NetError;
pub use forum::config::ForumConfig;
pub use forum::editor::{update, Credentials, EditOutcome, ForumEditor};
pub use forum::error::{EditError, ParseError};
pub use forum::request::{EditRequest, FieldOverrides, OverrideField};
