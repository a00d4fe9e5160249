//! Error types for rule composition.

use thiserror::Error;

use crate::role::Role;

/// Errors raised while substituting `${Name}` placeholders into rule skeletons.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The skeleton references a field the configuration does not have.
    #[error("rule skeleton references unknown field `{0}`")]
    UnknownPlaceholder(String),

    /// A `${` was opened but never closed.
    #[error("unterminated placeholder in rule skeleton: {0:?}")]
    UnterminatedPlaceholder(String),
}

/// Composer-level failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposerError {
    /// Rule text for a role could not be rendered. This is a programming
    /// error in a skeleton; retrying with the same input fails the same way.
    #[error("failed to render {role} rules: {source}")]
    RenderFailure {
        role: Role,
        #[source]
        source: TemplateError,
    },

    /// A role name supplied by a caller does not match any known role.
    #[error("unknown role `{0}`")]
    UnknownRole(String),
}

impl ComposerError {
    pub(crate) fn render(role: Role) -> impl FnOnce(TemplateError) -> Self {
        move |source| Self::RenderFailure { role, source }
    }
}

pub type ComposerResult<T> = Result<T, ComposerError>;
