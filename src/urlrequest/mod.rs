//! Request jobs: redirect handling on top of single transactions.

pub mod job;
