//! Optional observability helpers for handler invocations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oidc_provider_resource.invocation` with the
//!   `request_type` and `stage` fields, plus diagnostic events for received requests, failure
//!   chains, delete overrides, and delivered envelopes.
//! - Enable `metrics` to increment the `oidc_provider_resource_invocation_total` counter for every
//!   attempt/success/failure/override, labeled by `request_type` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, event::RequestType};

/// Request kinds observed by the handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestKind {
	/// `Create` requests.
	Create,
	/// `Update` requests.
	Update,
	/// `Delete` requests.
	Delete,
	/// Any other request type.
	Unrecognized,
}
impl RequestKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestKind::Create => "create",
			RequestKind::Update => "update",
			RequestKind::Delete => "delete",
			RequestKind::Unrecognized => "unrecognized",
		}
	}
}
impl From<&RequestType> for RequestKind {
	fn from(value: &RequestType) -> Self {
		match value {
			RequestType::Create => RequestKind::Create,
			RequestType::Update => RequestKind::Update,
			RequestType::Delete => RequestKind::Delete,
			RequestType::Unrecognized(_) => RequestKind::Unrecognized,
		}
	}
}
impl Display for RequestKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InvocationOutcome {
	/// Entry to the dispatcher.
	Attempt,
	/// SUCCESS reported for a successful operation.
	Success,
	/// FAILED reported to the orchestrator.
	Failure,
	/// SUCCESS reported for a failed delete.
	Overridden,
}
impl InvocationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			InvocationOutcome::Attempt => "attempt",
			InvocationOutcome::Success => "success",
			InvocationOutcome::Failure => "failure",
			InvocationOutcome::Overridden => "overridden",
		}
	}
}
impl Display for InvocationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
