//! Create, update, and delete operations against the identity-provider capability.
//!
//! Every capability call is awaited before the next one starts and nothing is retried. Two
//! operations are not transactional:
//!
//! - [`LifecycleManager::create`] registers audiences one by one after the provider exists, so a
//!   failing `add_audience` leaves the provider in place with the audiences added so far.
//! - [`LifecycleManager::update`] deletes before it creates, so a failing create leaves neither the
//!   old nor a new provider behind.

// self
use crate::{
	_prelude::*,
	error::{OperationError, OperationStep},
	provider::{IdentityProviderApi, ProviderArn},
	validate::ProviderSpec,
};

/// Executes lifecycle operations through a borrowed [`IdentityProviderApi`].
#[derive(Clone, Copy)]
pub struct LifecycleManager<'a> {
	api: &'a dyn IdentityProviderApi,
}
impl<'a> LifecycleManager<'a> {
	/// Wraps the capability used for every call.
	pub fn new(api: &'a dyn IdentityProviderApi) -> Self {
		Self { api }
	}

	/// Creates a provider for `spec` and registers its audiences in order.
	pub async fn create(&self, spec: &ProviderSpec) -> Result<ProviderArn, OperationError> {
		let arn = self
			.api
			.create(&spec.url, &spec.thumbprints)
			.await
			.map_err(|e| OperationError::capture(OperationStep::CreateProvider, None, &e))?;

		for audience in &spec.audiences {
			self.add_audience(&arn, audience).await?;
		}

		Ok(arn)
	}

	/// Deletes the provider addressed by `arn`.
	pub async fn delete(&self, arn: &ProviderArn) -> Result<(), OperationError> {
		self.api
			.delete(arn)
			.await
			.map_err(|e| OperationError::capture(OperationStep::DeleteProvider, Some(arn), &e))
	}

	/// Replaces the provider addressed by `arn` with a new one built from `spec`.
	///
	/// Returns the handle of the replacement provider.
	pub async fn update(
		&self,
		arn: &ProviderArn,
		spec: &ProviderSpec,
	) -> Result<ProviderArn, OperationError> {
		self.delete(arn).await?;

		self.create(spec).await
	}

	async fn add_audience(&self, arn: &ProviderArn, audience: &str) -> Result<(), OperationError> {
		self.api
			.add_audience(arn, audience)
			.await
			.map_err(|e| OperationError::capture(OperationStep::AddAudience, Some(arn), &e))
	}
}
impl Debug for LifecycleManager<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("LifecycleManager(..)")
	}
}
