// src/middleware/logging.rs
use std::fmt::{Debug, Display};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use futures::FutureExt;
use serde::Deserialize;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use super::correlation::{self, REQUEST_ID};
use crate::error::{ErrorKind, InvocationError};

/// What the interceptor does with a failed handler call after logging it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Log the failure and hand the caller an empty result.
    #[default]
    Suppress,
    /// Log the failure and return the error (or resume the panic).
    Propagate,
}

/// A tagged handler call: where it is declared, its name and its rendered arguments.
#[derive(Debug, Clone)]
pub struct Invocation {
    declaring_type: String,
    method: String,
    args: Vec<String>,
}

impl Invocation {
    pub fn new(declaring_type: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            method: method.into(),
            args: Vec::new(),
        }
    }

    /// Append a positional argument, rendered with `Debug`.
    pub fn arg(mut self, value: &(impl Debug + ?Sized)) -> Self {
        self.args.push(format!("{:?}", value));
        self
    }

    /// Append a positional argument, rendered with `Display`.
    pub fn display_arg(mut self, value: &(impl Display + ?Sized)) -> Self {
        self.args.push(value.to_string());
        self
    }

    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Request logging interceptor with correlation ID.
///
/// Wraps a handler future, logs its arguments, outcome and elapsed time, and tags
/// every line with a freshly generated request id. The id is also available to
/// the handler through [`correlation::request_id`] while it runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLogging {
    policy: ErrorPolicy,
}

impl RequestLogging {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Run `call` under interception.
    ///
    /// Returns `Ok(Some(value))` when the handler succeeds. A failed handler
    /// yields `Ok(None)` under [`ErrorPolicy::Suppress`] and `Err(error)` under
    /// [`ErrorPolicy::Propagate`].
    pub async fn intercept<F, T, E>(&self, invocation: Invocation, call: F) -> Result<Option<T>, E>
    where
        F: Future<Output = Result<T, E>>,
        T: Debug,
        E: ErrorKind,
    {
        let request_id = Uuid::new_v4().to_string();
        let span = info_span!("request", request_id = %request_id);

        correlation::scope(self.run(request_id, invocation, call))
            .instrument(span)
            .await
    }

    async fn run<F, T, E>(&self, request_id: String, invocation: Invocation, call: F) -> Result<Option<T>, E>
    where
        F: Future<Output = Result<T, E>>,
        T: Debug,
        E: ErrorKind,
    {
        correlation::put(REQUEST_ID, request_id.as_str());
        log_before(&request_id, &invocation);

        let watch = Instant::now();
        let outcome = AssertUnwindSafe(call).catch_unwind().await;
        let elapsed = watch.elapsed().as_millis();

        let result = match outcome {
            Ok(Ok(value)) => {
                log_result(&request_id, &value, elapsed);
                Ok(Some(value))
            }
            Ok(Err(err)) => {
                log_error(&request_id, &invocation, &InvocationError::from_error(&err), elapsed);
                match self.policy {
                    ErrorPolicy::Suppress => Ok(None),
                    ErrorPolicy::Propagate => Err(err),
                }
            }
            Err(panic) => {
                log_error(&request_id, &invocation, &InvocationError::from_panic(panic.as_ref()), elapsed);
                if self.policy == ErrorPolicy::Propagate {
                    correlation::clear();
                    std::panic::resume_unwind(panic);
                }
                Ok(None)
            }
        };

        correlation::clear();
        result
    }
}

fn log_before(request_id: &str, invocation: &Invocation) {
    info!("Requested Id {} Start", request_id);
    info!(
        "Invoked Method: {}::{}",
        invocation.declaring_type(),
        invocation.method()
    );

    for (i, arg) in invocation.args().iter().enumerate() {
        info!("Requested Id: {} / Arguments[{}]: {}", request_id, i, arg);
    }
}

fn log_result<T: Debug>(request_id: &str, result: &T, total_time_millis: u128) {
    info!("Requested Id {} End (Time: {}ms)", request_id, total_time_millis);
    info!("Response: {:?}", result);
}

fn log_error(request_id: &str, invocation: &Invocation, err: &InvocationError, total_time_millis: u128) {
    error!("Requested Id {} Error (Time: {}ms)", request_id, total_time_millis);
    error!(
        "Invoked Method: {}::{} / Occurred Error: {}.{}",
        invocation.declaring_type(),
        invocation.method(),
        err.kind,
        err.message
    );
}
