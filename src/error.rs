//! Handler-level error types shared across validation, lifecycle operations, and delivery.
//!
//! Validation and operation failures never escape the dispatcher; they travel as
//! [`crate::dispatch::Failure`] and end up in the callback. [`Error`] only carries what prevents a
//! callback or a handler from being assembled.

// self
use crate::{_prelude::*, provider::ProviderArn};

/// Handler-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical handler error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Inbound lifecycle event could not be decoded.
	#[error(transparent)]
	Event(#[from] EventError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Response envelope could not be delivered.
	#[error(transparent)]
	Delivery(#[from] DeliveryError),
}

/// Raised when the raw lifecycle event is not a well-formed JSON document of the expected shape.
#[derive(Debug, ThisError)]
#[error("Lifecycle event is malformed at `{path}`.")]
pub struct EventError {
	/// Path of the offending field inside the event document.
	pub path: String,
	/// Underlying decoding failure.
	#[source]
	pub source: serde_json::Error,
}
impl From<serde_path_to_error::Error<serde_json::Error>> for EventError {
	fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = e.path().to_string();

		Self { path, source: e.into_inner() }
	}
}

/// Configuration failures raised while assembling the handler.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Required environment variable is not set or not valid unicode.
	#[error("Environment variable `{name}` is not set.")]
	MissingEnv {
		/// Variable name.
		name: &'static str,
	},
}

/// Resource property validation failures.
///
/// The display strings are reported verbatim to the orchestrator in `Data.Message`.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// `ProviderURL` is absent or empty.
	#[error("ProviderURL property is required.")]
	MissingProviderUrl,
	/// `ProviderURL` exceeds the maximum length.
	#[error("ProviderURL too long, Maximum 255 characters.")]
	ProviderUrlTooLong,
	/// `ProviderURL` does not start with the `https` scheme.
	#[error("ProviderURL must begin with \"https\".")]
	InsecureProviderUrl,
	/// `ThumbprintList` is absent or empty.
	#[error("Thumbprint list cannot be empty")]
	EmptyThumbprintList,
	/// A property is present but holds a JSON value of the wrong type.
	#[error("{name} property is malformed.")]
	MalformedProperty {
		/// Wire name of the offending property.
		name: &'static str,
	},
}

/// Lifecycle step that invoked the identity-provider capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationStep {
	/// `create-provider` call.
	CreateProvider,
	/// `delete-provider` call.
	DeleteProvider,
	/// `add-audience` call.
	AddAudience,
}
impl OperationStep {
	/// Returns a stable label suitable for log fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationStep::CreateProvider => "create_provider",
			OperationStep::DeleteProvider => "delete_provider",
			OperationStep::AddAudience => "add_audience",
		}
	}
}
impl Display for OperationStep {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Failure reported by the identity-provider capability while executing a lifecycle operation.
///
/// The error flattens the capability's causal chain into messages (outermost first) so the
/// dispatcher can log every cause after the original error has been consumed.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{message}")]
pub struct OperationError {
	/// Capability call that failed.
	pub step: OperationStep,
	/// Provider handle addressed by the failing call, if it had one.
	pub arn: Option<ProviderArn>,
	/// Message of the outermost error.
	pub message: String,
	/// Messages of every error in the causal chain, outermost first.
	pub causes: Vec<String>,
}
impl OperationError {
	/// Captures `err` and its full `source()` chain.
	pub fn capture(step: OperationStep, arn: Option<&ProviderArn>, err: &dyn StdError) -> Self {
		let mut causes = Vec::new();
		let mut current = Some(err);

		while let Some(e) = current {
			causes.push(e.to_string());

			current = e.source();
		}

		Self { step, arn: arn.cloned(), message: err.to_string(), causes }
	}
}

/// Failures delivering the response envelope. Terminal for the invocation.
#[derive(Debug, ThisError)]
pub enum DeliveryError {
	/// `ResponseURL` is not a valid absolute URL.
	#[error("ResponseURL `{url}` is invalid.")]
	InvalidResponseUrl {
		/// Raw URL supplied by the orchestrator.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Envelope serialization failed.
	#[error("Response envelope could not be serialized.")]
	Serialize(#[from] serde_json::Error),
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while delivering the response envelope.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Callback endpoint answered with a non-success status.
	#[error("Callback endpoint rejected the response envelope with HTTP {status}.")]
	Rejected {
		/// HTTP status code returned by the callback endpoint.
		status: u16,
	},
}
impl DeliveryError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for DeliveryError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
