//! Krump Mock Result Source
//!
//! An in-process [`krump_hal::Backend`] that answers every submission with
//! an ideal Bell-state distribution. It stands in for the real
//! compile-and-simulate service in demos, tests and the `krump mock`
//! command.
//!
//! | Shots | `"00"` | `"11"` |
//! |-------|--------|--------|
//! | 1024 | 512 | 512 |
//! | 7 | 4 | 3 |
//!
//! # Example
//!
//! ```
//! use krump_adapter_mock::MockBackend;
//! use krump_hal::Backend;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), krump_hal::HalError> {
//! let backend = MockBackend::new();
//! let job_id = backend.submit("bell", 1024).await?;
//! let result = backend.wait(&job_id).await?;
//!
//! assert_eq!(result.measurements["00"], 512);
//! assert_eq!(result.measurements["11"], 512);
//! # Ok(())
//! # }
//! ```

mod mock;

pub use mock::{MOCK_BACKEND_NAME, MockBackend};
