//! Structured logging facility
//!
//! - Single initialization point via `init(profile)`
//! - Lifecycle macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for asserting on emitted events
//!
//! ```rust
//! use isograph_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! Only the `Session` boundary emits lifecycle events. Registry, mapper and
//! store code logs at `debug` level without `event` fields.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
