//! Krump job result layer
//!
//! The compile-and-simulate service lives outside this workspace. This crate
//! defines the shapes it hands back and the trait a result source implements:
//!
//! - [`JobResult`]: per-bitstring counts and probabilities plus optional context
//! - [`JobMetadata`]: descriptive fields, resolved with fixed fallbacks
//! - [`MeasurementOutcome`]: one observed bit pattern
//! - [`Backend`]: submit / status / result lifecycle for a result source
//!
//! # Example
//!
//! ```ignore
//! use krump_hal::{Backend, JobMetadata};
//! use krump_adapter_mock::MockBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = MockBackend::new();
//!     let job_id = backend.submit("bell", 1024).await?;
//!     let result = backend.wait(&job_id).await?;
//!
//!     for outcome in result.outcomes() {
//!         println!("{}: {}", outcome.bitstring, outcome.count);
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod error;
pub mod job;
pub mod metadata;
pub mod result;

pub use backend::Backend;
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use metadata::{CreatedAt, JobMetadata, ResolvedMetadata};
pub use result::{JobResult, MeasurementOutcome, clamp_probability};
