// self
use crate::obs::{InvocationOutcome, RequestKind};

/// Records an invocation outcome via the global metrics recorder (when enabled).
pub fn record_invocation_outcome(kind: RequestKind, outcome: InvocationOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oidc_provider_resource_invocation_total",
			"request_type" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}
