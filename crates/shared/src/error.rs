use thiserror::Error;

/// Reasons a submitted form cannot be turned into a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("form field `{0}` is missing")]
    MissingField(&'static str),
    #[error("form field `id` is not an integer: {0:?}")]
    InvalidId(String),
    #[error("no handler is bound to form `{0}`")]
    UnknownForm(String),
}
