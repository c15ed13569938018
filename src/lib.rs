//! Core of the PDF Signer app: an Upload → Sign → Complete workflow that
//! burns a "Signed PDF" stamp onto the first page of a document.
//!
//! Hosts drive it with JSON commands through [`dispatch_json`] (or the JNI
//! export) and render the JSON UI tree it returns.

rust_i18n::i18n!("locales", fallback = "en");

pub mod config;
pub mod controller;
pub mod error;
pub mod features;
#[cfg(any(test, feature = "fixtures"))]
#[doc(hidden)]
pub mod fixtures;
mod i18n;
pub mod logging;
pub mod preview;
mod router;
mod state;
pub mod ui;
pub mod workflow;

pub use config::SignerConfig;
pub use controller::{StampJob, StampOutcome, WorkflowController};
pub use error::{SignerError, TransformError};
pub use features::stamp::{apply_stamp, StampSpec};
pub use router::dispatch_json;
pub use workflow::Stage;
