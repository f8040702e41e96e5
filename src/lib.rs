//! Custom resource handler that lets a stack manager create, replace, and delete OpenID Connect
//! identity providers, reporting every outcome to the stack's pre-signed callback URL.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod context;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod http;
pub mod lifecycle;
pub mod obs;
pub mod provider;
pub mod response;
pub mod validate;

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
