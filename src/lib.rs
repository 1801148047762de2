//! Client-side behaviour of the Beyond Consent podcast site, in Rust.
//!
//! The site is a single document with several logical pages. Its one piece of
//! real logic is the episode catalog: a multi-field search, a category filter
//! and "load more" pagination over a small static list. Around it sit a page
//! router, a simulated audio player and contact/newsletter forms that only
//! acknowledge submissions locally.
//!
//! # Features
//!
//! - Filter episodes by text (title, description, tags) and category
//! - Incremental reveal with "load more"
//! - Simulated playback progress driven by a cancellable timer
//! - Contact, confidential and newsletter forms with toast notifications
//!
//! # Usage
//!
//! ```bash
//! # Interactive terminal site
//! cargo run
//!
//! # Print the filtered episode list and exit
//! cargo run -- --list --category legal-advice --search evidence
//! ```

pub mod cards;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod forms;
pub mod notify;
pub mod player;
pub mod router;
pub mod tui;
pub mod types;
