/// An error that can occur in Warden.
///
/// Errors form a cause chain: wrapping an error with [`Error::context`]
/// pushes a new frame on top while preserving the root cause. The `is_*`
/// predicates classify an error by its root, so context frames never change
/// what kind of failure a caller observes.
pub struct Error {
    kind: ErrorKind,
    cause: Option<Box<Error>>,
}

#[derive(Debug)]
enum ErrorKind {
    /// Ad hoc context frame.
    Message(Box<str>),

    /// The record type's column descriptors cannot back a table.
    InvalidSchema(Box<str>),

    /// A lookup (by key or by query) matched no rows.
    RecordNotFound,

    /// A caller-supplied column name is not in the descriptor table.
    UnknownColumn {
        table: &'static str,
        column: Box<str>,
    },

    /// Failure reported by the underlying engine.
    Driver(rusqlite::Error),

    /// An opaque-encoded value failed to serialize or deserialize.
    Codec(CodecError),
}

#[derive(Debug)]
enum CodecError {
    Json(serde_json::Error),
    Message(Box<str>),
}

impl Error {
    /// Creates an ad hoc error from a message.
    pub fn msg(msg: impl core::fmt::Display) -> Self {
        Self::new(ErrorKind::Message(msg.to_string().into()))
    }

    /// Creates a configuration error: the descriptor table is malformed.
    pub fn invalid_schema(detail: impl core::fmt::Display) -> Self {
        Self::new(ErrorKind::InvalidSchema(detail.to_string().into()))
    }

    /// Creates the well-known "no matching row" error.
    pub fn record_not_found() -> Self {
        Self::new(ErrorKind::RecordNotFound)
    }

    /// Creates an error for a column name missing from the descriptor table.
    pub fn unknown_column(table: &'static str, column: impl Into<Box<str>>) -> Self {
        Self::new(ErrorKind::UnknownColumn {
            table,
            column: column.into(),
        })
    }

    /// Creates an error from an engine failure.
    pub fn driver(err: rusqlite::Error) -> Self {
        Self::new(ErrorKind::Driver(err))
    }

    /// Creates a codec error from a JSON failure.
    pub fn codec(err: serde_json::Error) -> Self {
        Self::new(ErrorKind::Codec(CodecError::Json(err)))
    }

    /// Creates a codec error for a value whose shape does not match its
    /// column's storage class.
    pub fn cannot_convert(expected: &'static str, actual: &'static str) -> Self {
        Self::new(ErrorKind::Codec(CodecError::Message(
            format!("cannot convert {actual} value to {expected}").into(),
        )))
    }

    /// Wraps this error in a new context frame.
    ///
    /// Context is displayed outermost first, ending with the root cause.
    pub fn context(self, msg: impl core::fmt::Display) -> Self {
        Error {
            kind: ErrorKind::Message(msg.to_string().into()),
            cause: Some(Box::new(self)),
        }
    }

    /// Returns `true` if the root cause is a malformed descriptor table.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self.root().kind, ErrorKind::InvalidSchema(_))
    }

    /// Returns `true` if the root cause is "no matching row".
    pub fn is_record_not_found(&self) -> bool {
        matches!(self.root().kind, ErrorKind::RecordNotFound)
    }

    /// Returns `true` if the root cause is an unknown column name.
    pub fn is_unknown_column(&self) -> bool {
        matches!(self.root().kind, ErrorKind::UnknownColumn { .. })
    }

    /// Returns `true` if the root cause is an engine failure.
    pub fn is_driver(&self) -> bool {
        matches!(self.root().kind, ErrorKind::Driver(_))
    }

    /// Returns `true` if the root cause is an encode/decode failure.
    pub fn is_codec(&self) -> bool {
        matches!(self.root().kind, ErrorKind::Codec(_))
    }

    fn new(kind: ErrorKind) -> Self {
        Error { kind, cause: None }
    }

    fn root(&self) -> &Error {
        self.chain().last().unwrap()
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.cause.as_deref()?;
            Some(err)
        }))
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            ErrorKind::Message(msg) => f.write_str(msg),
            ErrorKind::InvalidSchema(detail) => write!(f, "invalid schema: {detail}"),
            ErrorKind::RecordNotFound => f.write_str("record not found"),
            ErrorKind::UnknownColumn { table, column } => {
                write!(f, "table `{table}` has no column `{column}`")
            }
            ErrorKind::Driver(err) => core::fmt::Display::fmt(err, f),
            ErrorKind::Codec(CodecError::Json(err)) => core::fmt::Display::fmt(err, f),
            ErrorKind::Codec(CodecError::Message(msg)) => f.write_str(msg),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(&err.kind, f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.kind)
                .field("cause", &self.cause)
                .finish()
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Some(cause) = self.cause.as_deref() {
            return Some(cause);
        }
        match &self.kind {
            ErrorKind::Driver(err) => Some(err),
            ErrorKind::Codec(CodecError::Json(err)) => Some(err),
            _ => None,
        }
    }
}
