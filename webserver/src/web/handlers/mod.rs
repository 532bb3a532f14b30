pub mod api;
pub mod collections;

use engine::Outcome;

use crate::error::WebServerError;

/// A commit answered with an outcome the handler did not ask for
pub(crate) fn unexpected(outcome: Outcome) -> WebServerError {
    WebServerError::InternalError(format!("unexpected outcome: {outcome:?}"))
}
