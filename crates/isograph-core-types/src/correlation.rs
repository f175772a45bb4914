//! Correlation identifiers for cross-store operations
//!
//! A single `Session` call may touch the relational store and the graph
//! store several times; these ids tie the resulting log events together.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! correlation_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh, time-ordered id (UUIDv7)
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Wrap an id received from elsewhere (e.g. an inbound header)
            pub fn from_string(s: String) -> Self {
                Self(s)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

correlation_id!(
    /// Identifies one caller-level operation (one accessor or attribute call)
    RequestId
);
correlation_id!(
    /// Identifies a trace spanning several requests
    TraceId
);
correlation_id!(
    /// Identifies one store round-trip inside a request
    SpanId
);

/// Context threaded through a `Session` so every event it emits can be correlated
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub trace_id: Option<TraceId>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_id(request_id: RequestId) -> Self {
        Self {
            request_id,
            trace_id: None,
        }
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(RequestId::new(), RequestId::new());
        assert_ne!(TraceId::new(), TraceId::new());
        assert_ne!(SpanId::new(), SpanId::new());
    }

    #[test]
    fn test_display_matches_as_str() {
        let id = SpanId::from_string("span-1".to_string());
        assert_eq!(id.to_string(), "span-1");
        assert_eq!(id.as_str(), "span-1");
    }

    #[test]
    fn test_context_carries_trace() {
        let trace = TraceId::new();
        let ctx = RequestContext::new().with_trace_id(trace.clone());
        assert_eq!(ctx.trace_id, Some(trace));
        assert!(!ctx.request_id.as_str().is_empty());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = RequestId::from_string("req-7".to_string());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"req-7\"");
        let back: RequestId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
