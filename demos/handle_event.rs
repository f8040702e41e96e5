//! Demonstrates driving the dispatcher with raw lifecycle events, the default reqwest transport,
//! and the in-memory identity-provider API.
//!
//! A local mock server stands in for the stack manager's pre-signed callback URL.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use oidc_provider_resource::{
	context::InvocationContext,
	dispatch::ReqwestDispatcher,
	provider::{IdentityProviderApi, MemoryProviderApi},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let callback_mock = server
		.mock_async(|when, then| {
			when.method(PUT).path("/callback");
			then.status(200);
		})
		.await;
	let api = Arc::new(MemoryProviderApi::default());
	let provider_api: Arc<dyn IdentityProviderApi> = api.clone();
	let dispatcher =
		ReqwestDispatcher::new(provider_api, InvocationContext::new("2025/01/01/[$LATEST]demo"));
	let create = json!({
		"RequestType": "Create",
		"ResponseURL": server.url("/callback"),
		"StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/demo/guid",
		"RequestId": "demo-create",
		"LogicalResourceId": "DemoProvider",
		"ResourceProperties": {
			"ProviderURL": "https://accounts.example.com",
			"ThumbprintList": ["9e99a48a9960b14926bb7f3b02e22da2b0ab7280"],
			"Audiences": ["demo-client"]
		}
	});
	let created = dispatcher.handle_json(create.to_string().as_bytes()).await?;

	println!(
		"Create reported {:?} with provider handle `{}`.",
		created.status(),
		created.envelope.data.arn
	);

	let delete = json!({
		"RequestType": "Delete",
		"ResponseURL": server.url("/callback"),
		"StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/demo/guid",
		"RequestId": "demo-delete",
		"LogicalResourceId": "DemoProvider",
		"PhysicalResourceId": created.envelope.data.arn,
		"ResourceProperties": {
			"ProviderURL": "https://accounts.example.com",
			"ThumbprintList": "AA11"
		}
	});
	let deleted = dispatcher.handle_json(delete.to_string().as_bytes()).await?;

	println!(
		"Delete reported {:?} ({}); registered providers left: {}.",
		deleted.status(),
		deleted.envelope.data.message,
		api.arns().len()
	);

	callback_mock.assert_calls_async(2).await;

	Ok(())
}
