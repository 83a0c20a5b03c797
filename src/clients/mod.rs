//! HTTP clients for the Shopee open platform.
//!
//! Two layers live here:
//!
//! - [`HttpClient`]: the credential-agnostic transport (reqwest with a
//!   bounded timeout, responses resolved to parsed JSON)
//! - [`ShopClient`]: the signed request executor, which adds the auth query
//!   fields and the single refresh-and-retry policy on an expired access
//!   token
//!
//! The [`response`] helpers encapsulate the upstream envelope (`error` /
//! `message` / `response`) in one place.

pub mod errors;
mod http_client;
pub(crate) mod response;
pub mod shop;

pub use errors::HttpError;
pub use http_client::{HttpClient, REQUEST_TIMEOUT};
pub use shop::{HttpMethod, ShopClient, ShopError};
