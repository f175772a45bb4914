//! Core types shared by the isograph error and logging facilities
//!
//! - **Correlation types**: `RequestId`, `TraceId`, `SpanId`, `RequestContext`
//! - **Sensitive data**: `Sensitive<T>` marker for redaction of column values
//! - **Schema constants**: canonical log field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::{RequestContext, RequestId, SpanId, TraceId};
pub use sensitive::Sensitive;
