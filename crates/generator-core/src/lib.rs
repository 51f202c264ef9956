//! Core engine for the DEVeats contract generator.
//!
//! Ties the pieces of a generator session together:
//! - [`gate`]: token-gated access checks over a read-only RPC connection
//! - [`form`]: the four-step configuration form and its validation
//! - [`template`]: Solidity source rendering
//! - [`deploy`]: factory deployment and read-only factory queries
//! - [`engine`]: the [`Generator`] that sequences connect, gate and deploy

pub mod deploy;
pub mod engine;
pub mod error;
pub mod form;
pub mod gate;
pub mod session;
pub mod template;

pub use deploy::{
	DeploymentResult, DeploymentStatus, DeploymentSubmitter, FactoryReader, StatusCallback,
	DEPLOYMENT_FEE_ETH,
};
pub use engine::{welcome_message, Generator};
pub use error::{purchase_link, Action, GeneratorError, Result};
pub use form::{Form, FormState, ReviewSummary, Step};
pub use gate::{AccessGate, BalanceReader, RpcBalanceReader};
pub use session::Session;
pub use template::render_contract;

#[cfg(any(test, feature = "testing"))]
pub use gate::MockBalanceReader;
