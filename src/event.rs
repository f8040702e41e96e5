//! Inbound lifecycle events delivered by the stack manager.
//!
//! Keys follow the orchestrator's PascalCase wire format. Fields the handler does not act on
//! (`ServiceToken`, `ResourceType`, `OldResourceProperties`) are accepted and dropped. Only the
//! correlation envelope is decoded strictly; resource properties are decoded leniently.

// self
// crates.io
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, error::EventError, provider::ProviderArn};

/// Lifecycle action requested by the orchestrator.
///
/// Values other than `Create`, `Update`, and `Delete` are preserved in
/// [`RequestType::Unrecognized`] so the dispatcher can acknowledge them without acting.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestType {
	/// Provision a new provider.
	Create,
	/// Replace an existing provider.
	Update,
	/// Remove an existing provider.
	Delete,
	/// Any other request type string.
	Unrecognized(String),
}
impl RequestType {
	/// Returns the wire label for the request type.
	pub fn as_str(&self) -> &str {
		match self {
			RequestType::Create => "Create",
			RequestType::Update => "Update",
			RequestType::Delete => "Delete",
			RequestType::Unrecognized(raw) => raw,
		}
	}

	/// Returns `true` for delete requests, which must never report failure.
	pub fn is_delete(&self) -> bool {
		matches!(self, RequestType::Delete)
	}
}
impl From<String> for RequestType {
	fn from(value: String) -> Self {
		match value.as_str() {
			"Create" => RequestType::Create,
			"Update" => RequestType::Update,
			"Delete" => RequestType::Delete,
			_ => RequestType::Unrecognized(value),
		}
	}
}
impl From<RequestType> for String {
	fn from(value: RequestType) -> Self {
		match value {
			RequestType::Unrecognized(raw) => raw,
			known => known.as_str().to_owned(),
		}
	}
}
impl Display for RequestType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Raw resource properties as declared in the stack template.
///
/// Decoding never fails: a property holding a JSON value of the wrong type is left unset and its
/// wire name is recorded in [`ResourceProperties::malformed`], so validation can report it and the
/// invocation still reaches the callback.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", from = "Value")]
pub struct ResourceProperties {
	/// Issuer URL of the identity provider.
	#[serde(rename = "ProviderURL", skip_serializing_if = "Option::is_none")]
	pub provider_url: Option<String>,
	/// Client IDs to register with the provider.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub audiences: Option<Vec<String>>,
	/// Server certificate thumbprints to trust.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub thumbprint_list: Option<Vec<String>>,
	/// Wire names of properties that were present with an unusable JSON type.
	#[serde(skip)]
	pub malformed: Vec<&'static str>,
}
impl ResourceProperties {
	/// Wire name used when the properties document itself is not an object.
	pub const ROOT_KEY: &'static str = "ResourceProperties";
	/// Wire name of [`ResourceProperties::provider_url`].
	pub const PROVIDER_URL_KEY: &'static str = "ProviderURL";
	/// Wire name of [`ResourceProperties::audiences`].
	pub const AUDIENCES_KEY: &'static str = "Audiences";
	/// Wire name of [`ResourceProperties::thumbprint_list`].
	pub const THUMBPRINT_LIST_KEY: &'static str = "ThumbprintList";

	/// Returns `true` when the property named `key` was present with the wrong type.
	pub fn is_malformed(&self, key: &str) -> bool {
		self.malformed.iter().any(|name| *name == key)
	}

	fn take_string_list(
		&mut self,
		fields: &mut Map<String, Value>,
		key: &'static str,
	) -> Option<Vec<String>> {
		match fields.remove(key) {
			None | Some(Value::Null) => None,
			Some(value) => match serde_json::from_value(value) {
				Ok(list) => Some(list),
				Err(_) => {
					self.malformed.push(key);

					None
				},
			},
		}
	}
}
impl From<Value> for ResourceProperties {
	fn from(value: Value) -> Self {
		let mut properties = Self::default();
		let mut fields = match value {
			Value::Object(fields) => fields,
			Value::Null => return properties,
			_ => {
				properties.malformed.push(Self::ROOT_KEY);

				return properties;
			},
		};

		match fields.remove(Self::PROVIDER_URL_KEY) {
			None | Some(Value::Null) => {},
			Some(Value::String(url)) => properties.provider_url = Some(url),
			Some(_) => properties.malformed.push(Self::PROVIDER_URL_KEY),
		}

		properties.audiences = properties.take_string_list(&mut fields, Self::AUDIENCES_KEY);
		properties.thumbprint_list =
			properties.take_string_list(&mut fields, Self::THUMBPRINT_LIST_KEY);

		properties
	}
}

/// Lifecycle event received for a single invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleEvent {
	/// Requested lifecycle action.
	pub request_type: RequestType,
	/// Desired provider configuration.
	#[serde(default)]
	pub resource_properties: ResourceProperties,
	/// Pre-authorized callback URL receiving the response envelope.
	#[serde(rename = "ResponseURL")]
	pub response_url: String,
	/// Stack correlation identifier, echoed back.
	pub stack_id: String,
	/// Request correlation identifier, echoed back.
	pub request_id: String,
	/// Logical resource correlation identifier, echoed back.
	pub logical_resource_id: String,
	/// Handle of the previously created provider (update and delete only).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub physical_resource_id: Option<String>,
}
impl LifecycleEvent {
	/// Decodes an event from raw JSON, reporting the path of the first offending field.
	pub fn from_slice(bytes: &[u8]) -> Result<Self, EventError> {
		let mut de = serde_json::Deserializer::from_slice(bytes);

		Ok(serde_path_to_error::deserialize(&mut de)?)
	}

	/// Returns the caller-supplied provider handle, empty when absent.
	pub fn provider_arn(&self) -> ProviderArn {
		ProviderArn::new(self.physical_resource_id.clone().unwrap_or_default())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const CREATE_EVENT: &str = r#"{
		"RequestType": "Create",
		"ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:oidc",
		"ResponseURL": "https://cloudformation-custom-resource-response.example.com/callback",
		"StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/demo/guid",
		"RequestId": "unique-request",
		"ResourceType": "Custom::OpenIDConnectProvider",
		"LogicalResourceId": "GoogleProvider",
		"ResourceProperties": {
			"ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:oidc",
			"ProviderURL": "https://accounts.example.com",
			"ThumbprintList": ["AA11"],
			"Audiences": ["client-1"]
		}
	}"#;

	#[test]
	fn decodes_orchestrator_event() {
		let event = LifecycleEvent::from_slice(CREATE_EVENT.as_bytes())
			.expect("Create event fixture should decode.");

		assert_eq!(event.request_type, RequestType::Create);
		assert_eq!(event.logical_resource_id, "GoogleProvider");
		assert_eq!(
			event.resource_properties.provider_url.as_deref(),
			Some("https://accounts.example.com")
		);
		assert_eq!(event.resource_properties.thumbprint_list, Some(vec!["AA11".to_owned()]));
		assert_eq!(event.resource_properties.audiences, Some(vec!["client-1".to_owned()]));
		assert!(event.physical_resource_id.is_none());
		assert!(event.provider_arn().is_empty());
	}

	#[test]
	fn missing_properties_decode_as_empty() {
		let event = LifecycleEvent::from_slice(
			br#"{"RequestType":"Delete","ResponseURL":"https://cb.example.com","StackId":"s","RequestId":"r","LogicalResourceId":"l","PhysicalResourceId":"arn:old"}"#,
		)
		.expect("Event without properties should decode.");

		assert_eq!(event.resource_properties, ResourceProperties::default());
		assert_eq!(event.provider_arn().as_ref(), "arn:old");
	}

	#[test]
	fn unrecognized_request_types_are_preserved() {
		let ty: RequestType =
			serde_json::from_str("\"Rollback\"").expect("Any string should decode as a request type.");

		assert_eq!(ty, RequestType::Unrecognized("Rollback".into()));
		assert!(!ty.is_delete());
		assert_eq!(
			serde_json::to_string(&ty).expect("Request type should serialize."),
			"\"Rollback\""
		);
	}

	#[test]
	fn malformed_event_reports_path() {
		let err = LifecycleEvent::from_slice(
			br#"{"RequestType":"Create","ResponseURL":"https://cb.example.com","StackId":7}"#,
		)
		.expect_err("A numeric stack id should be rejected.");

		assert_eq!(err.path, "StackId");
	}

	#[test]
	fn wrongly_typed_properties_are_recorded_not_rejected() {
		let event = LifecycleEvent::from_slice(
			br#"{"RequestType":"Delete","ResponseURL":"https://cb.example.com","StackId":"s","RequestId":"r","LogicalResourceId":"l","ResourceProperties":{"ProviderURL":42,"ThumbprintList":"AA11","Audiences":["client-1"]}}"#,
		)
		.expect("Wrongly typed properties should not fail the event.");
		let properties = &event.resource_properties;

		assert_eq!(properties.provider_url, None);
		assert_eq!(properties.thumbprint_list, None);
		assert_eq!(properties.audiences, Some(vec!["client-1".to_owned()]));
		assert_eq!(
			properties.malformed,
			vec![ResourceProperties::PROVIDER_URL_KEY, ResourceProperties::THUMBPRINT_LIST_KEY]
		);
	}

	#[test]
	fn non_object_properties_are_recorded_as_malformed() {
		let properties: ResourceProperties = serde_json::from_str("\"https://accounts.example.com\"")
			.expect("Any JSON should decode.");

		assert!(properties.is_malformed(ResourceProperties::ROOT_KEY));
		assert_eq!(
			serde_json::from_str::<ResourceProperties>("null").expect("Null should decode."),
			ResourceProperties::default()
		);
	}

	#[test]
	fn list_with_non_string_items_is_malformed() {
		let properties: ResourceProperties =
			serde_json::from_str(r#"{"ProviderURL":"https://a.example.com","Audiences":["a",1]}"#)
				.expect("Any JSON should decode.");

		assert_eq!(properties.provider_url.as_deref(), Some("https://a.example.com"));
		assert_eq!(properties.audiences, None);
		assert!(properties.is_malformed(ResourceProperties::AUDIENCES_KEY));
	}
}
