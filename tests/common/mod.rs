//! Shared fixtures for integration tests.

#![allow(dead_code)]

pub use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::Arc,
};

pub use oidc_provider_resource::{reqwest::Client as ReqwestClient, url::Url};
pub use parking_lot::Mutex;

// self
use oidc_provider_resource::{
	context::InvocationContext,
	dispatch::ReqwestDispatcher,
	event::{LifecycleEvent, RequestType, ResourceProperties},
	http::ReqwestCallbackTransport,
	provider::{IdentityProviderApi, MemoryProviderApi},
};

/// Log stream name stamped into envelopes built by test dispatchers.
pub const TEST_LOG_STREAM: &str = "2025/01/01/[$LATEST]0123456789abcdef";

/// Builds a reqwest transport that accepts the self-signed certificates produced by `httpmock`.
pub fn test_reqwest_transport() -> ReqwestCallbackTransport {
	let client = ReqwestClient::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestCallbackTransport::with_client(client)
}

/// Constructs a [`ReqwestDispatcher`] backed by an in-memory provider API.
pub fn build_reqwest_test_dispatcher() -> (ReqwestDispatcher, Arc<MemoryProviderApi>) {
	let api_backend = Arc::new(MemoryProviderApi::default());
	let api: Arc<dyn IdentityProviderApi> = api_backend.clone();
	let dispatcher = ReqwestDispatcher::with_transport(
		api,
		Arc::new(test_reqwest_transport()),
		InvocationContext::new(TEST_LOG_STREAM),
	);

	(dispatcher, api_backend)
}

/// Builds a lifecycle event whose callback points at `response_url`.
pub fn lifecycle_event(
	request_type: RequestType,
	properties: ResourceProperties,
	response_url: impl Into<String>,
) -> LifecycleEvent {
	LifecycleEvent {
		request_type,
		resource_properties: properties,
		response_url: response_url.into(),
		stack_id: "arn:aws:cloudformation:us-east-1:123456789012:stack/identity/0f1e2d3c".into(),
		request_id: "d3c1b2a0-5f6e-4a7b-8c9d-0e1f2a3b4c5d".into(),
		logical_resource_id: "AccountsProvider".into(),
		physical_resource_id: None,
	}
}

/// Builds resource properties from string slices.
pub fn resource_properties(
	url: &str,
	thumbprints: &[&str],
	audiences: &[&str],
) -> ResourceProperties {
	ResourceProperties {
		provider_url: Some(url.to_owned()),
		audiences: Some(audiences.iter().map(|a| (*a).to_owned()).collect()),
		thumbprint_list: Some(thumbprints.iter().map(|t| (*t).to_owned()).collect()),
		..Default::default()
	}
}
