//! Import of the external Star Wars dataset into the local store.
//!
//! - [`client`] fetches every page of an upstream collection, with retry.
//! - [`schemas`] describes the upstream JSON payloads.
//! - [`mapping`] turns payloads into insert DTOs and cross-reference sets.
//! - [`service`] runs the whole population job inside one transaction.

pub mod client;
pub mod mapping;
pub mod schemas;
pub mod service;

pub use client::{ClientConfig, ClientError, SwapiClient};
pub use service::{PopulateError, PopulateService, PopulateSummary};
