use std::sync::Arc;

/// The reason a conversion failed.
///
/// The `Display` output of every variant is a plain message meant to be
/// shown to the user as is, or wrapped by the caller. Use
/// [`Error::message`] to get it as a `String`.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A flag was given a value, or was repeated.
    #[error("too many arguments for flag option")]
    FlagArguments,

    /// A single-argument option got zero or several values, or was repeated.
    #[error("you should provide exactly one argument for this option")]
    ExactlyOne,

    /// An option with an optional value got more than one value.
    #[error("Too many arguments")]
    TooManyArguments,

    /// A counted flag was given a value.
    #[error("this option doesn't need arguments")]
    UnexpectedArguments,

    /// A value could not be parsed as the named type.
    #[error("bad {type_name} value")]
    BadValue {
        /// A human name for the expected type, e.g. `Int`.
        type_name: &'static str,
    },

    /// A parse function rejected a value and no handler claimed the error.
    ///
    /// This displays as the underlying error.
    #[error("{error}")]
    ParsingFailed {
        /// The string that failed to parse.
        value: String,
        /// The error returned while parsing.
        #[source]
        error: Arc<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// A property had no unescaped `=` to separate key and value.
    #[error("missing '=' in property '{0}'")]
    MalformedProperty(String),

    /// An inner converter returned nothing for a value that was present.
    #[error("internal error: value converter returned nothing")]
    MissingValue,

    /// An infinite duration was given where a finite one is required.
    #[error("'{0}' is not a finite duration")]
    InfiniteDuration(String),

    /// A parse function panicked.
    #[error("parse function panicked: {0}")]
    Panicked(String),

    /// For custom error messages in handlers and application code.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// The message for this error, as shown to the user.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub(crate) fn parsing_failed<E>(value: &str, error: E) -> Error
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Error::ParsingFailed {
            value: value.to_owned(),
            error: Arc::from(error.into()),
        }
    }
}

// Sources can't be compared, so two errors are equal if they're the same
// kind of error with the same message.
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
            && self.to_string() == other.to_string()
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Custom(msg)
    }
}

impl From<&'_ str> for Error {
    fn from(msg: &'_ str) -> Self {
        Error::Custom(msg.to_owned())
    }
}
