// Cross-cutting handler middleware

pub mod correlation;
pub mod logging;

pub use logging::{ErrorPolicy, Invocation, RequestLogging};
