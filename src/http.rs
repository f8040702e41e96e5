//! Transport primitives for delivering response envelopes.
//!
//! [`CallbackTransport`] is the handler's only dependency on an HTTP stack. The dispatcher hands
//! it an already-serialized body and the parsed `ResponseURL`; the transport performs exactly one
//! PUT and reports the status code; the publisher decides what the status means.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")]
use reqwest::{
	Request,
	header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderValue},
};
// self
use crate::{_prelude::*, error::DeliveryError};

/// Future returned by [`CallbackTransport::put`], resolving to the HTTP status code.
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<u16, DeliveryError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of uploading a response envelope to a
/// pre-authorized URL.
///
/// Implementations must send `body` unchanged as the request payload with a `content-type`
/// header that is present but empty and a `content-length` equal to `body.len()`.
pub trait CallbackTransport
where
	Self: 'static + Send + Sync,
{
	/// Performs a single PUT of `body` to `url`.
	fn put<'a>(&'a self, url: &'a Url, body: Vec<u8>) -> TransportFuture<'a>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestCallbackTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestCallbackTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds the callback request without sending it.
	pub fn callback_request(&self, url: &Url, body: Vec<u8>) -> Result<Request, DeliveryError> {
		let len = body.len();

		Ok(self
			.0
			.put(url.clone())
			.header(CONTENT_TYPE, HeaderValue::from_static(""))
			.header(CONTENT_LENGTH, HeaderValue::from(len))
			.body(body)
			.build()?)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestCallbackTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestCallbackTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl CallbackTransport for ReqwestCallbackTransport {
	fn put<'a>(&'a self, url: &'a Url, body: Vec<u8>) -> TransportFuture<'a> {
		Box::pin(async move {
			let request = self.callback_request(url, body)?;
			let response = self.0.execute(request).await?;

			Ok::<_, DeliveryError>(response.status().as_u16())
		})
	}
}
