//! Domain types and pure logic for the movie catalog loader.
//!
//! This crate has no database or async dependencies. It owns the document
//! format, its validation, and the error type shared by the other crates.

pub mod commentary;
pub mod document;
pub mod error;
pub mod search;
pub mod types;
