#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Architecture
//!
//! The crate centralizes the three concerns every request against a RESTful
//! service shares (a base URL scope, authentication credentials, and
//! default headers) and produces asynchronous request objects that carry
//! out the exchange and report completion exactly once.
//!
//! - **[`RestClient`]** owns the shared configuration. Its state may be
//!   read and mutated from any thread; every dispatch takes a snapshot, so
//!   in-flight requests are never affected by later mutation.
//! - **[`RestRequest`]** is a built, not-yet-started request.
//!   [`RestRequest::start`] spawns the exchange onto the tokio runtime and
//!   returns a cancellable [`RequestHandle`].
//! - **[`ResponseDelegate`]** receives the outcome: a [`RestResponse`] on
//!   success, a [`RestError`] for HTTP-status failures, transport failures,
//!   and cancellation. Construction problems (bad URLs, malformed headers,
//!   unserializable params) are instead returned synchronously from the
//!   dispatch call, before anything is started.
//! - A process-wide **default client** slot
//!   ([`client::default_client`] / [`client::set_default_client`]) is
//!   lazily filled by the first [`RestClient::scoped_to`] call.
//!
//! Two requests started in sequence may complete in either order; no
//! ordering is guaranteed across requests, and completion may run on any
//! runtime worker thread.
//!
//! ## Module Structure
//!
//! - **[client]** - the client, request/dispatch machinery, URL builders
//! - **[error]** - error taxonomy and result alias
//! - **[types]** - response, query-parameter, and outcome types

pub mod client;
pub mod error;
pub mod types;

pub use client::{
    BodyParams, ClientConfig, JsonParams, OutcomeChannel, RequestHandle, ResponseDelegate,
    RestClient, RestRequest,
};
pub use error::{RestError, Result};
pub use types::{QueryParams, RequestOutcome, RestResponse};
