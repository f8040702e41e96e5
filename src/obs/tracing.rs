// self
use crate::{
	_prelude::*,
	event::LifecycleEvent,
	obs::RequestKind,
	response::ResponseEnvelope,
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedInvocation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedInvocation<F> = F;

/// A span builder used by the dispatcher.
#[derive(Clone, Debug)]
pub struct InvocationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl InvocationSpan {
	/// Creates a new span tagged with the provided request kind + stage.
	pub fn new(kind: RequestKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"oidc_provider_resource.invocation",
				request_type = kind.as_str(),
				stage
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedInvocation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs the correlation identifiers of a freshly received event.
pub fn trace_event_received(event: &LifecycleEvent) {
	#[cfg(feature = "tracing")]
	{
		tracing::info!(
			request_type = event.request_type.as_str(),
			stack_id = %event.stack_id,
			request_id = %event.request_id,
			logical_resource_id = %event.logical_resource_id,
			physical_resource_id = event.physical_resource_id.as_deref().unwrap_or_default(),
			provider_url = event.resource_properties.provider_url.as_deref().unwrap_or_default(),
			"Lifecycle event received."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = event;
	}
}

/// Logs every message of a failure's causal chain, outermost first.
pub fn trace_failure_chain(causes: &[String]) {
	#[cfg(feature = "tracing")]
	{
		for (depth, cause) in causes.iter().enumerate() {
			tracing::warn!(depth, cause = %cause, "Lifecycle operation failed.");
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = causes;
	}
}

/// Logs that a failed delete is being reported as successful.
pub fn trace_delete_override(message: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(reason = %message, "Reporting SUCCESS for a failed delete.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = message;
	}
}

/// Logs the envelope that was delivered to the orchestrator.
pub fn trace_envelope_delivered(envelope: &ResponseEnvelope) {
	#[cfg(feature = "tracing")]
	{
		tracing::info!(
			status = envelope.status.as_str(),
			physical_resource_id = %envelope.physical_resource_id,
			arn = %envelope.data.arn,
			data_message = %envelope.data.message,
			"Response envelope delivered."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = envelope;
	}
}
