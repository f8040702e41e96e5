//! Invocation entry point: validate, execute, publish.
//!
//! Each call to [`Dispatcher::handle`] walks one event through
//! `validating → executing → notifying` and always attempts exactly one callback.
//! Validation and operation failures become a FAILED envelope, except for `Delete` requests,
//! which always report SUCCESS so stack teardown is never blocked. Only delivery failures
//! escape to the caller.

// self
use crate::{
	_prelude::*,
	context::InvocationContext,
	error::{DeliveryError, OperationError, ValidationError},
	event::{LifecycleEvent, RequestType},
	http::CallbackTransport,
	lifecycle::LifecycleManager,
	obs::{self, InvocationOutcome, InvocationSpan, RequestKind},
	provider::{IdentityProviderApi, ProviderArn},
	response::{ResponseData, ResponseEnvelope, ResponsePublisher, ResponseStatus},
	validate,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestCallbackTransport;

#[cfg(feature = "reqwest")]
/// Dispatcher specialized for the crate's default reqwest transport.
pub type ReqwestDispatcher = Dispatcher<ReqwestCallbackTransport>;

/// Failure converted into a notification instead of escaping the dispatcher.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum Failure {
	/// Resource properties were rejected before any side effect.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// The identity-provider capability failed mid-operation.
	#[error(transparent)]
	Operation(#[from] OperationError),
}
impl Failure {
	/// Messages of the full causal chain, outermost first.
	pub fn causes(&self) -> Vec<String> {
		match self {
			Failure::Validation(e) => vec![e.to_string()],
			Failure::Operation(e) => e.causes.clone(),
		}
	}
}

/// Summary of a completed invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
	/// Envelope that was delivered.
	pub envelope: ResponseEnvelope,
	/// Failure that produced the envelope, if any.
	pub failure: Option<Failure>,
}
impl Invocation {
	/// Status reported to the orchestrator.
	pub fn status(&self) -> ResponseStatus {
		self.envelope.status
	}

	/// Returns `true` when a failure was reported as SUCCESS.
	pub fn is_overridden(&self) -> bool {
		self.failure.is_some() && self.envelope.status == ResponseStatus::Success
	}
}

/// Routes lifecycle events to the identity-provider capability and reports the outcome.
///
/// Both collaborators are injected; the dispatcher keeps no state between invocations.
pub struct Dispatcher<T>
where
	T: ?Sized + CallbackTransport,
{
	/// Identity-provider management API used for every lifecycle operation.
	pub provider_api: Arc<dyn IdentityProviderApi>,
	/// Publisher that delivers the response envelope.
	pub publisher: ResponsePublisher<T>,
}
impl<T> Dispatcher<T>
where
	T: ?Sized + CallbackTransport,
{
	/// Creates a dispatcher from its collaborators.
	pub fn with_transport(
		provider_api: Arc<dyn IdentityProviderApi>,
		transport: Arc<T>,
		context: InvocationContext,
	) -> Self {
		Self { provider_api, publisher: ResponsePublisher::new(transport, context) }
	}

	/// Decodes a raw event and handles it.
	///
	/// A malformed event is reported as [`Error::Event`] without any callback because the
	/// response URL cannot be trusted.
	pub async fn handle_json(&self, bytes: &[u8]) -> Result<Invocation> {
		let event = LifecycleEvent::from_slice(bytes)?;

		Ok(self.handle(&event).await?)
	}

	/// Handles one lifecycle event end to end.
	pub async fn handle(&self, event: &LifecycleEvent) -> Result<Invocation, DeliveryError> {
		let kind = RequestKind::from(&event.request_type);
		let span = InvocationSpan::new(kind, "handle");

		obs::record_invocation_outcome(kind, InvocationOutcome::Attempt);

		span.instrument(async move {
			obs::trace_event_received(event);

			let (status, data, failure, outcome) = match self.execute(event).await {
				Ok(arn) => (
					ResponseStatus::Success,
					ResponseData::success(&arn),
					None,
					InvocationOutcome::Success,
				),
				Err(failure) => {
					obs::trace_failure_chain(&failure.causes());

					let data = ResponseData::failure(failure.to_string());

					if event.request_type.is_delete() {
						obs::trace_delete_override(&data.message);

						(ResponseStatus::Success, data, Some(failure), InvocationOutcome::Overridden)
					} else {
						(ResponseStatus::Failed, data, Some(failure), InvocationOutcome::Failure)
					}
				},
			};
			let envelope = self.publisher.notify(status, data, event).await?;

			obs::trace_envelope_delivered(&envelope);
			obs::record_invocation_outcome(kind, outcome);

			Ok::<_, DeliveryError>(Invocation { envelope, failure })
		})
		.await
	}

	async fn execute(&self, event: &LifecycleEvent) -> Result<ProviderArn, Failure> {
		let spec = validate::validate(&event.resource_properties)?;
		let manager = LifecycleManager::new(self.provider_api.as_ref());

		match &event.request_type {
			RequestType::Create => Ok(manager.create(&spec).await?),
			RequestType::Update => {
				let arn = event.provider_arn();

				// The replacement handle is not reported; the orchestrator keeps the old one.
				manager.update(&arn, &spec).await?;

				Ok(arn)
			},
			RequestType::Delete => {
				let arn = event.provider_arn();

				manager.delete(&arn).await?;

				Ok(arn)
			},
			RequestType::Unrecognized(_) => Ok(ProviderArn::default()),
		}
	}
}
#[cfg(feature = "reqwest")]
impl Dispatcher<ReqwestCallbackTransport> {
	/// Creates a dispatcher that delivers envelopes with a default reqwest client.
	pub fn new(provider_api: Arc<dyn IdentityProviderApi>, context: InvocationContext) -> Self {
		Self::with_transport(provider_api, Arc::new(ReqwestCallbackTransport::default()), context)
	}
}
impl<T> Clone for Dispatcher<T>
where
	T: ?Sized + CallbackTransport,
{
	fn clone(&self) -> Self {
		Self { provider_api: Arc::clone(&self.provider_api), publisher: self.publisher.clone() }
	}
}
impl<T> Debug for Dispatcher<T>
where
	T: ?Sized + CallbackTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Dispatcher").field("publisher", &self.publisher).finish()
	}
}
