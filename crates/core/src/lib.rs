//! Domain building blocks shared by the database, importer and API crates.
//!
//! Nothing in here performs I/O.

pub mod error;
pub mod filter;
pub mod pagination;
pub mod text;
pub mod types;
pub mod url;
