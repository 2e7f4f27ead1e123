//! Editing posts on a Simple Machines Forum board.
//!
//! An edit is four round-trips, each stage returning a fresh
//! [`Session`](session::Session):
//!
//! 1. [`bootstrap`](editor::ForumEditor::bootstrap): GET the index for a token and cookies
//! 2. [`login`](editor::ForumEditor::login): POST the hashed credentials ([`hash`])
//! 3. [`fetch_edit_form`](editor::ForumEditor::fetch_edit_form): GET the edit page, scrape
//!    its token ([`token`]) and fields ([`form`])
//! 4. [`submit`](editor::ForumEditor::submit): POST the fields with the caller's
//!    [`FieldOverrides`](request::FieldOverrides) applied

pub mod config;
pub mod editor;
pub mod error;
pub mod form;
pub mod hash;
pub mod request;
pub mod session;
pub mod token;
