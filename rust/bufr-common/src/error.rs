use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn unknown_field(field: impl Into<String>, context: impl Into<String>) -> Error {
        Error(
            ErrorKind::UnknownField {
                field: field.into(),
                context: context.into(),
            }
            .into(),
        )
    }

    pub fn invalid_group_by(
        field: impl Into<String>,
        group_by: impl Into<String>,
        reason: impl Into<String>,
    ) -> Error {
        Error(
            ErrorKind::InvalidGroupBy {
                field: field.into(),
                group_by: group_by.into(),
                reason: reason.into(),
            }
            .into(),
        )
    }

    pub fn unsupported_type_override(
        field: impl Into<String>,
        override_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Error {
        Error(
            ErrorKind::UnsupportedTypeOverride {
                field: field.into(),
                override_type: override_type.into(),
                reason: reason.into(),
            }
            .into(),
        )
    }

    pub fn shape_inconsistency(field: impl Into<String>, reason: impl Into<String>) -> Error {
        Error(
            ErrorKind::ShapeInconsistency {
                field: field.into(),
                reason: reason.into(),
            }
            .into(),
        )
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_operation(name: impl Into<String>) -> Error {
        Error(ErrorKind::InvalidOperation { name: name.into() }.into())
    }

    pub fn config<E>(context: impl Into<String>, source: E) -> Error
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error(
            ErrorKind::Config {
                context: context.into(),
                source: Box::new(source),
            }
            .into(),
        )
    }

    /// Returns the field name the error refers to, if the error is field-scoped.
    pub fn field(&self) -> Option<&str> {
        match self.kind() {
            ErrorKind::UnknownField { field, .. }
            | ErrorKind::InvalidGroupBy { field, .. }
            | ErrorKind::UnsupportedTypeOverride { field, .. }
            | ErrorKind::ShapeInconsistency { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("unknown field '{field}' ({context})")]
    UnknownField { field: String, context: String },

    #[error("invalid group_by '{group_by}' for field '{field}': {reason}")]
    InvalidGroupBy {
        field: String,
        group_by: String,
        reason: String,
    },

    #[error("unsupported type override '{override_type}' for field '{field}': {reason}")]
    UnsupportedTypeOverride {
        field: String,
        override_type: String,
        reason: String,
    },

    #[error("inconsistent shape for field '{field}': {reason}")]
    ShapeInconsistency { field: String, reason: String },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid operation {name}")]
    InvalidOperation { name: String },

    #[error("configuration error: {context}")]
    Config {
        context: String,
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::config("json", e)
    }
}

impl From<std::convert::Infallible> for Error {
    fn from(_: std::convert::Infallible) -> Self {
        Error::invalid_operation("conversion")
    }
}
