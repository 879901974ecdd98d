//! logbook - Learning diary for a personal portfolio
//!
//! Keeps an ordered, newest-first collection of dated diary entries in a
//! key-value storage medium and exposes add/list/delete over it, with a
//! command-line front end.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::LogbookError;
