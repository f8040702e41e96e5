//! Resource property validation.
//!
//! Runs before any side-effecting call and short-circuits on the first failing rule, in this
//! order: provider URL presence, length, scheme, then thumbprint list presence. A property that
//! arrived with the wrong JSON type fails at the position of its first rule.

// self
use crate::{_prelude::*, error::ValidationError, event::ResourceProperties};

/// Maximum number of characters accepted in `ProviderURL`.
pub const PROVIDER_URL_MAX_LEN: usize = 255;

const REQUIRED_SCHEME: &str = "https";

/// Provider configuration that passed validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProviderSpec {
	/// Issuer URL, guaranteed non-empty, at most 255 characters, and `https`-prefixed.
	pub url: String,
	/// Server certificate thumbprints, guaranteed non-empty.
	pub thumbprints: Vec<String>,
	/// Client IDs in template order; may be empty.
	pub audiences: Vec<String>,
}
impl TryFrom<&ResourceProperties> for ProviderSpec {
	type Error = ValidationError;

	fn try_from(properties: &ResourceProperties) -> Result<Self, Self::Error> {
		validate(properties)
	}
}

/// Validates raw resource properties into a [`ProviderSpec`].
pub fn validate(properties: &ResourceProperties) -> Result<ProviderSpec, ValidationError> {
	well_formed(properties, ResourceProperties::ROOT_KEY)?;
	well_formed(properties, ResourceProperties::PROVIDER_URL_KEY)?;

	let url = properties.provider_url.as_deref().unwrap_or_default();

	if url.is_empty() {
		return Err(ValidationError::MissingProviderUrl);
	}
	if url.chars().count() > PROVIDER_URL_MAX_LEN {
		return Err(ValidationError::ProviderUrlTooLong);
	}
	if !has_required_scheme(url) {
		return Err(ValidationError::InsecureProviderUrl);
	}

	well_formed(properties, ResourceProperties::THUMBPRINT_LIST_KEY)?;

	let thumbprints = properties.thumbprint_list.clone().unwrap_or_default();

	if thumbprints.is_empty() {
		return Err(ValidationError::EmptyThumbprintList);
	}

	well_formed(properties, ResourceProperties::AUDIENCES_KEY)?;

	let audiences = properties.audiences.clone().unwrap_or_default();

	Ok(ProviderSpec { url: url.to_owned(), thumbprints, audiences })
}

fn well_formed(properties: &ResourceProperties, key: &'static str) -> Result<(), ValidationError> {
	if properties.is_malformed(key) {
		return Err(ValidationError::MalformedProperty { name: key });
	}

	Ok(())
}

fn has_required_scheme(url: &str) -> bool {
	url.get(..REQUIRED_SCHEME.len())
		.is_some_and(|prefix| prefix.eq_ignore_ascii_case(REQUIRED_SCHEME))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn properties(url: Option<&str>, thumbprints: Option<&[&str]>) -> ResourceProperties {
		ResourceProperties {
			provider_url: url.map(Into::into),
			audiences: None,
			thumbprint_list: thumbprints
				.map(|list| list.iter().map(|thumbprint| (*thumbprint).to_owned()).collect()),
			..Default::default()
		}
	}

	#[test]
	fn missing_or_empty_url_is_rejected() {
		for url in [None, Some("")] {
			assert_eq!(
				validate(&properties(url, Some(&["AA11"]))),
				Err(ValidationError::MissingProviderUrl)
			);
		}
	}

	#[test]
	fn length_is_checked_before_scheme() {
		let long_http = format!("http://{}", "a".repeat(PROVIDER_URL_MAX_LEN));
		let long_https = format!("https://{}", "a".repeat(PROVIDER_URL_MAX_LEN));

		for url in [long_http, long_https] {
			assert_eq!(
				validate(&properties(Some(&url), Some(&["AA11"]))),
				Err(ValidationError::ProviderUrlTooLong)
			);
		}

		let boundary = format!("https://{}", "a".repeat(PROVIDER_URL_MAX_LEN - 8));

		assert!(validate(&properties(Some(&boundary), Some(&["AA11"]))).is_ok());
	}

	#[test]
	fn length_counts_characters_not_bytes() {
		let url = format!("https://{}", "é".repeat(PROVIDER_URL_MAX_LEN - 8));

		assert!(url.len() > PROVIDER_URL_MAX_LEN);
		assert!(validate(&properties(Some(&url), Some(&["AA11"]))).is_ok());
	}

	#[test]
	fn scheme_must_be_https_in_any_case() {
		for url in ["http://accounts.example.com", "ftp://x", "htt", "accounts.example.com"] {
			assert_eq!(
				validate(&properties(Some(url), Some(&["AA11"]))),
				Err(ValidationError::InsecureProviderUrl),
				"{url} should be rejected"
			);
		}
		for url in ["https://accounts.example.com", "HTTPS://accounts.example.com", "HtTpS"] {
			assert!(
				validate(&properties(Some(url), Some(&["AA11"]))).is_ok(),
				"{url} should pass"
			);
		}
	}

	#[test]
	fn thumbprint_list_must_be_present_and_non_empty() {
		for thumbprints in [None, Some(&[][..])] {
			assert_eq!(
				validate(&properties(Some("https://accounts.example.com"), thumbprints)),
				Err(ValidationError::EmptyThumbprintList)
			);
		}
	}

	#[test]
	fn url_failures_take_precedence_over_thumbprints() {
		assert_eq!(validate(&properties(None, None)), Err(ValidationError::MissingProviderUrl));
		assert_eq!(
			validate(&properties(Some("http://x"), None)),
			Err(ValidationError::InsecureProviderUrl)
		);
	}

	#[test]
	fn audiences_default_to_empty_and_keep_order() {
		let mut props = properties(Some("https://accounts.example.com"), Some(&["AA11", "BB22"]));
		let spec = ProviderSpec::try_from(&props).expect("Properties should validate.");

		assert!(spec.audiences.is_empty());
		assert_eq!(spec.thumbprints, vec!["AA11".to_owned(), "BB22".to_owned()]);

		props.audiences = Some(vec!["c".into(), "a".into(), "b".into()]);

		let spec = validate(&props).expect("Properties should validate.");

		assert_eq!(spec.audiences, vec!["c".to_owned(), "a".to_owned(), "b".to_owned()]);
	}

	#[test]
	fn malformed_properties_fail_in_rule_order() {
		let mut props = properties(None, None);

		props.malformed =
			vec![ResourceProperties::THUMBPRINT_LIST_KEY, ResourceProperties::PROVIDER_URL_KEY];

		assert_eq!(
			validate(&props),
			Err(ValidationError::MalformedProperty { name: "ProviderURL" })
		);

		let mut props = properties(Some("https://accounts.example.com"), None);

		props.malformed = vec![ResourceProperties::THUMBPRINT_LIST_KEY];

		assert_eq!(
			validate(&props),
			Err(ValidationError::MalformedProperty { name: "ThumbprintList" })
		);

		let mut props = properties(Some("http://accounts.example.com"), None);

		props.malformed = vec![ResourceProperties::AUDIENCES_KEY];

		assert_eq!(validate(&props), Err(ValidationError::InsecureProviderUrl));
	}

	#[test]
	fn malformed_audiences_are_rejected_after_thumbprints() {
		let mut props = properties(Some("https://accounts.example.com"), Some(&["AA11"]));

		props.malformed = vec![ResourceProperties::AUDIENCES_KEY];

		assert_eq!(
			validate(&props),
			Err(ValidationError::MalformedProperty { name: "Audiences" })
		);
	}

	#[test]
	fn non_object_properties_are_rejected_first() {
		let mut props = properties(Some("https://accounts.example.com"), Some(&["AA11"]));

		props.malformed = vec![ResourceProperties::ROOT_KEY];

		assert_eq!(
			validate(&props),
			Err(ValidationError::MalformedProperty { name: "ResourceProperties" })
		);
	}
}
