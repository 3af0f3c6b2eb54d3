//! Subcommand handlers
//!
//! Read commands take a loaded [`Configuration`](crate::configuration::Configuration);
//! mutating commands take a [`session::Session`] so they can write the file back.

pub mod backends;
pub mod completions;
pub mod dump;
pub mod get;
pub mod remove;
pub mod report;
pub mod session;
pub mod set;
pub mod size;
