//! Tile server access
//!
//! This module provides the HTTP capability used to fetch tiles and the URL
//! template that addresses them.
//!
//! ```ignore
//! use tilestitch::provider::{AsyncReqwestClient, UrlTemplate};
//!
//! let client = AsyncReqwestClient::new(Duration::from_secs(30), "tilestitch/0.1")?;
//! let template = UrlTemplate::new("https://tile.openstreetmap.org/{z}/{x}/{y}.png")?;
//! ```

mod http;
mod template;

pub use http::{AsyncHttpClient, AsyncReqwestClient, HttpResponse, TransportError};
pub use template::{TemplateError, UrlTemplate};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
