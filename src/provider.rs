//! Identity-provider capability contract and built-in implementations.
//!
//! [`IdentityProviderApi`] is the handler's only dependency on the OpenID Connect provider
//! management API. It covers the three calls the lifecycle needs (create, delete, add
//! audience) and returns crate-owned error types so implementations can wrap any SDK or
//! HTTP client. [`MemoryProviderApi`] mirrors the management API's observable behavior
//! in-process for local development and tests.

pub mod memory;

pub use memory::MemoryProviderApi;

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, error::BoxError};

/// Future returned by [`IdentityProviderApi`] calls.
pub type ProviderFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, ProviderApiError>> + 'a + Send>>;

/// Management API for OpenID Connect identity providers.
///
/// Each call is awaited to completion before the next one starts; implementations must not
/// retry internally because a single failure is reported to the orchestrator as-is.
pub trait IdentityProviderApi
where
	Self: Send + Sync,
{
	/// Registers a provider for `url` trusting `thumbprints`, returning its handle.
	fn create<'a>(
		&'a self,
		url: &'a str,
		thumbprints: &'a [String],
	) -> ProviderFuture<'a, ProviderArn>;

	/// Removes the provider addressed by `arn`.
	fn delete<'a>(&'a self, arn: &'a ProviderArn) -> ProviderFuture<'a, ()>;

	/// Adds `audience` to the provider's registered client IDs.
	fn add_audience<'a>(
		&'a self,
		arn: &'a ProviderArn,
		audience: &'a str,
	) -> ProviderFuture<'a, ()>;
}

/// Error type produced by [`IdentityProviderApi`] implementations.
#[derive(Debug, ThisError)]
pub enum ProviderApiError {
	/// No provider is registered under the handle.
	#[error("OpenIDConnect provider `{arn}` does not exist.")]
	NoSuchEntity {
		/// Handle that was addressed.
		arn: ProviderArn,
	},
	/// A provider is already registered for the URL.
	#[error("OpenIDConnect provider for `{url}` already exists.")]
	EntityAlreadyExists {
		/// Provider URL that collided.
		url: String,
	},
	/// Management service rejected or failed the call.
	#[error("{message}")]
	Service {
		/// Service-supplied message.
		message: String,
		/// Underlying client or transport failure, if any.
		#[source]
		source: Option<BoxError>,
	},
}
impl ProviderApiError {
	/// Builds a [`ProviderApiError::Service`] without an underlying cause.
	pub fn service(message: impl Into<String>) -> Self {
		Self::Service { message: message.into(), source: None }
	}

	/// Builds a [`ProviderApiError::Service`] wrapping `src`.
	pub fn service_with_source(
		message: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Service { message: message.into(), source: Some(Box::new(src)) }
	}
}

/// Opaque ARN-like handle returned by [`IdentityProviderApi::create`].
///
/// Handles received from the orchestrator are not validated; an empty handle is legal and
/// simply fails to address anything.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderArn(String);
impl ProviderArn {
	/// Wraps a raw handle.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns `true` when the handle is the empty string.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl Deref for ProviderArn {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for ProviderArn {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<ProviderArn> for String {
	fn from(value: ProviderArn) -> Self {
		value.0
	}
}
impl Debug for ProviderArn {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "ProviderArn({})", self.0)
	}
}
impl Display for ProviderArn {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
