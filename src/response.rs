//! Response envelope construction and delivery.

// self
use crate::{
	_prelude::*,
	context::InvocationContext,
	error::DeliveryError,
	event::LifecycleEvent,
	http::CallbackTransport,
	provider::ProviderArn,
};

/// Outcome reported to the orchestrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
	/// The lifecycle operation succeeded (or a delete failure was suppressed).
	Success,
	/// The lifecycle operation failed.
	Failed,
}
impl ResponseStatus {
	/// Returns the wire label.
	pub const fn as_str(self) -> &'static str {
		match self {
			ResponseStatus::Success => "SUCCESS",
			ResponseStatus::Failed => "FAILED",
		}
	}
}
impl Display for ResponseStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Custom data attached to the envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseData {
	/// Provider handle, empty on failure.
	pub arn: String,
	/// Human-readable outcome.
	pub message: String,
}
impl ResponseData {
	/// Message attached to every successful outcome, whatever the request type.
	pub const SUCCESS_MESSAGE: &'static str = "Resource creation successful";

	/// Data for a successful operation on `arn`.
	pub fn success(arn: &ProviderArn) -> Self {
		Self { arn: arn.to_string(), message: Self::SUCCESS_MESSAGE.into() }
	}

	/// Data for a failed operation; the handle is always blank.
	pub fn failure(message: impl Into<String>) -> Self {
		Self { arn: String::new(), message: message.into() }
	}
}

/// Envelope uploaded to `ResponseURL`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseEnvelope {
	/// Reported outcome.
	pub status: ResponseStatus,
	/// Execution identifier standing in for the resource identifier.
	pub physical_resource_id: String,
	/// Echoed from the request.
	pub stack_id: String,
	/// Echoed from the request.
	pub request_id: String,
	/// Echoed from the request.
	pub logical_resource_id: String,
	/// Custom outcome data.
	pub data: ResponseData,
}
impl ResponseEnvelope {
	/// Builds an envelope answering `event`.
	pub fn new(
		status: ResponseStatus,
		data: ResponseData,
		event: &LifecycleEvent,
		context: &InvocationContext,
	) -> Self {
		Self {
			status,
			physical_resource_id: context.physical_resource_id().to_owned(),
			stack_id: event.stack_id.clone(),
			request_id: event.request_id.clone(),
			logical_resource_id: event.logical_resource_id.clone(),
			data,
		}
	}

	/// Serializes the envelope to compact JSON.
	pub fn to_body(&self) -> Result<Vec<u8>, DeliveryError> {
		Ok(serde_json::to_vec(self)?)
	}
}

/// Builds envelopes and delivers them through a [`CallbackTransport`].
pub struct ResponsePublisher<T>
where
	T: ?Sized + CallbackTransport,
{
	transport: Arc<T>,
	context: InvocationContext,
}
impl<T> ResponsePublisher<T>
where
	T: ?Sized + CallbackTransport,
{
	/// Creates a publisher for one invocation context.
	pub fn new(transport: Arc<T>, context: InvocationContext) -> Self {
		Self { transport, context }
	}

	/// Returns the invocation context stamped into every envelope.
	pub fn context(&self) -> &InvocationContext {
		&self.context
	}

	/// Builds the envelope for `event` and uploads it once.
	///
	/// Any non-2xx status from the callback endpoint is reported as
	/// [`DeliveryError::Rejected`].
	pub async fn notify(
		&self,
		status: ResponseStatus,
		data: ResponseData,
		event: &LifecycleEvent,
	) -> Result<ResponseEnvelope, DeliveryError> {
		let envelope = ResponseEnvelope::new(status, data, event, &self.context);
		let body = envelope.to_body()?;
		let url = Url::parse(&event.response_url).map_err(|source| {
			DeliveryError::InvalidResponseUrl { url: event.response_url.clone(), source }
		})?;
		let code = self.transport.put(&url, body).await?;

		if !(200..300).contains(&code) {
			return Err(DeliveryError::Rejected { status: code });
		}

		Ok(envelope)
	}
}
impl<T> Clone for ResponsePublisher<T>
where
	T: ?Sized + CallbackTransport,
{
	fn clone(&self) -> Self {
		Self { transport: Arc::clone(&self.transport), context: self.context.clone() }
	}
}
impl<T> Debug for ResponsePublisher<T>
where
	T: ?Sized + CallbackTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ResponsePublisher").field("context", &self.context).finish()
	}
}
