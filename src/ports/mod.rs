//! Ports - Interfaces between the core and its backends.
//!
//! Following hexagonal architecture, ports define the contracts the
//! application layer depends on. Adapters implement them.
//!
//! - `SubmissionSink` - the narrow create contract both storage backends
//!   implement; the gateway picks exactly one per call
//! - `RoutingFlag` - injected accessor for the per-call backend toggle

mod routing;
mod submission_sink;

pub use routing::{EnvRoutingFlag, RoutingFlag, StaticRoutingFlag};
pub use submission_sink::SubmissionSink;
