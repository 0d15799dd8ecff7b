//! Fake security-evaluation service for integration testing
//!
//! An in-process HTTP/1.1 server that answers
//! `POST /api/check-domain` from a scripted set of responses and
//! records every domain it was asked about.
//!
//! ## Module layout
//!
//! - `server` -- TCP listener, request parsing, response writing
//! - `responses` -- scripted answers per domain, with a builder

pub mod responses;
mod server;

#[allow(unused_imports)]
pub use responses::{Responses, ResponsesBuilder};
pub use server::FakeCheckServer;
