//! Async client for the Conjoin Billing API.
//!
//! # Overview
//! Every call is one HTTP round trip: a resource method builds a path, verb,
//! query and body; the dispatcher resolves it against the configured base
//! URI and version, attaches the bearer key, sends it through a
//! [`Transport`], and unwraps the `{response, data, query}` envelope.
//!
//! ```rust,ignore
//! use conjoin::{BillingOptions, Conjoin};
//!
//! let client = Conjoin::new("sk_live_...")?;
//! let opts = BillingOptions::new("project_1", "entity_1");
//! let customer = client.billing().customer().get("cus_42", &opts).await?;
//! ```
//!
//! # Design
//! - Success is decided only by the transport status (`[200, 300)`). A
//!   failure carries the envelope's `response.message` verbatim.
//! - `fetch_data` and `fetch_envelope` replace a return-shape flag; list
//!   endpoints expose both through `list` and `list_page`.
//! - No retries, caching or pagination traversal. Timeouts and pooling
//!   belong to the transport.
//! - DTOs are defined independently from the mock server crate; integration
//!   tests catch schema drift.

pub mod billing;
pub mod client;
pub mod config;
pub mod dispatcher;
pub mod envelope;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use billing::{Billing, BillingOptions};
pub use client::Conjoin;
pub use config::{Config, ConjoinOptions};
pub use dispatcher::{Dispatcher, RequestOptions};
pub use envelope::{Envelope, PageCursor, PageQuery, ResponseStatus, ResponseType};
pub use error::{ConjoinError, Result, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
