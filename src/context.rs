//! Invocation context supplied by the function host.

// self
use crate::{_prelude::*, error::ConfigError};

/// Execution-scoped metadata for one invocation.
///
/// The log stream name doubles as the `PhysicalResourceId` reported to the orchestrator; it is
/// not the provider handle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationContext {
	/// Log stream of the current execution environment.
	pub log_stream_name: String,
}
impl InvocationContext {
	/// Environment variable carrying the log stream name.
	pub const LOG_STREAM_ENV: &'static str = "AWS_LAMBDA_LOG_STREAM_NAME";

	/// Creates a context with an explicit log stream name.
	pub fn new(log_stream_name: impl Into<String>) -> Self {
		Self { log_stream_name: log_stream_name.into() }
	}

	/// Loads the context from the host environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	fn from_lookup(
		lookup: impl FnOnce(&'static str) -> Option<String>,
	) -> Result<Self, ConfigError> {
		lookup(Self::LOG_STREAM_ENV)
			.filter(|value| !value.is_empty())
			.map(Self::new)
			.ok_or(ConfigError::MissingEnv { name: Self::LOG_STREAM_ENV })
	}

	/// Identifier reported as `PhysicalResourceId`.
	pub fn physical_resource_id(&self) -> &str {
		&self.log_stream_name
	}
}
