//! Thread-safe in-memory [`IdentityProviderApi`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	provider::{IdentityProviderApi, ProviderApiError, ProviderArn, ProviderFuture},
};

type ProviderMap = Arc<RwLock<BTreeMap<ProviderArn, ProviderRecord>>>;

/// Snapshot of a provider held by [`MemoryProviderApi`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRecord {
	/// Issuer URL as supplied to `create`.
	pub url: String,
	/// Trusted certificate thumbprints.
	pub thumbprints: Vec<String>,
	/// Registered client IDs in registration order.
	pub audiences: Vec<String>,
}

/// In-process provider registry mimicking the management API's handles and failure modes.
///
/// - Handles follow `arn:aws:iam::<account>:oidc-provider/<url without scheme>`.
/// - Creating a second provider for the same URL fails with `EntityAlreadyExists`.
/// - Deleting or adding an audience to an unknown handle fails with `NoSuchEntity`.
/// - Adding an audience that is already registered is a no-op.
#[derive(Clone, Debug)]
pub struct MemoryProviderApi {
	account_id: String,
	providers: ProviderMap,
}
impl MemoryProviderApi {
	const DEFAULT_ACCOUNT_ID: &'static str = "123456789012";

	/// Creates an empty registry whose handles embed `account_id`.
	pub fn with_account_id(account_id: impl Into<String>) -> Self {
		Self { account_id: account_id.into(), providers: Default::default() }
	}

	/// Returns the handle the registry assigns to `url`.
	pub fn arn_for(&self, url: &str) -> ProviderArn {
		let host_path = url
			.get(..8)
			.filter(|scheme| scheme.eq_ignore_ascii_case("https://"))
			.map_or(url, |_| &url[8..]);

		ProviderArn::new(format!("arn:aws:iam::{}:oidc-provider/{host_path}", self.account_id))
	}

	/// Returns a snapshot of the provider addressed by `arn`, if present.
	pub fn provider(&self, arn: &ProviderArn) -> Option<ProviderRecord> {
		self.providers.read().get(arn).cloned()
	}

	/// Returns every registered handle in lexical order.
	pub fn arns(&self) -> Vec<ProviderArn> {
		self.providers.read().keys().cloned().collect()
	}

	fn create_now(
		&self,
		url: &str,
		thumbprints: &[String],
	) -> Result<ProviderArn, ProviderApiError> {
		let arn = self.arn_for(url);
		let mut guard = self.providers.write();

		if guard.contains_key(&arn) {
			return Err(ProviderApiError::EntityAlreadyExists { url: url.to_owned() });
		}

		guard.insert(
			arn.clone(),
			ProviderRecord {
				url: url.to_owned(),
				thumbprints: thumbprints.to_vec(),
				audiences: Vec::new(),
			},
		);

		Ok(arn)
	}

	fn delete_now(&self, arn: &ProviderArn) -> Result<(), ProviderApiError> {
		match self.providers.write().remove(arn) {
			Some(_) => Ok(()),
			None => Err(ProviderApiError::NoSuchEntity { arn: arn.clone() }),
		}
	}

	fn add_audience_now(&self, arn: &ProviderArn, audience: &str) -> Result<(), ProviderApiError> {
		let mut guard = self.providers.write();
		let record =
			guard.get_mut(arn).ok_or_else(|| ProviderApiError::NoSuchEntity { arn: arn.clone() })?;

		if !record.audiences.iter().any(|existing| existing == audience) {
			record.audiences.push(audience.to_owned());
		}

		Ok(())
	}
}
impl Default for MemoryProviderApi {
	fn default() -> Self {
		Self::with_account_id(Self::DEFAULT_ACCOUNT_ID)
	}
}
impl IdentityProviderApi for MemoryProviderApi {
	fn create<'a>(
		&'a self,
		url: &'a str,
		thumbprints: &'a [String],
	) -> ProviderFuture<'a, ProviderArn> {
		Box::pin(async move { self.create_now(url, thumbprints) })
	}

	fn delete<'a>(&'a self, arn: &'a ProviderArn) -> ProviderFuture<'a, ()> {
		Box::pin(async move { self.delete_now(arn) })
	}

	fn add_audience<'a>(
		&'a self,
		arn: &'a ProviderArn,
		audience: &'a str,
	) -> ProviderFuture<'a, ()> {
		Box::pin(async move { self.add_audience_now(arn, audience) })
	}
}
