//! GraphQL error policy.
//!
//! Callers always see one generic message. The real code and message are
//! logged together with the trace id, which is also placed in the error's
//! `extensions` so support can find the log line.

use juniper::{FieldError, IntoFieldError, Object, ScalarValue, Value};
use serde_json::Value as JsonValue;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode};

/// Message returned for every failure.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

fn log_domain_error(err: &Error) {
    let trace_id = err.trace_id().unwrap_or_default();
    match err.code() {
        ErrorCode::InternalError => {
            error!(code = err.code().as_str(), message = err.message(), trace_id, "resolver failed");
        }
        _ => warn!(code = err.code().as_str(), message = err.message(), trace_id, "resolver failed"),
    }
}

impl<S: ScalarValue> IntoFieldError<S> for Error {
    fn into_field_error(self) -> FieldError<S> {
        log_domain_error(&self);
        let extensions = self.trace_id().map_or_else(Value::null, |trace_id| {
            let mut fields = Object::with_capacity(1);
            fields.add_field("traceId", Value::scalar(trace_id.to_owned()));
            Value::Object(fields)
        });
        FieldError::new(GENERIC_ERROR_MESSAGE, extensions)
    }
}

/// Replace the message of every entry in a serialised response's `errors`
/// array.
///
/// Field errors already carry the generic message. This catches parse and
/// validation errors, which juniper reports before any resolver runs.
pub fn mask_error_messages(response: &mut JsonValue) {
    let Some(errors) = response.get_mut("errors").and_then(JsonValue::as_array_mut) else {
        return;
    };
    for entry in errors {
        let Some(message) = entry.get_mut("message") else {
            continue;
        };
        if message.as_str() != Some(GENERIC_ERROR_MESSAGE) {
            warn!(message = %message, "graphql request rejected");
            *message = JsonValue::String(GENERIC_ERROR_MESSAGE.to_owned());
        }
    }
}
