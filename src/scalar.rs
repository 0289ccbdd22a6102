//! Single-value converters and the built-in converter registry.

use std::convert::Infallible;
use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use std::sync::Arc;

use crate::{guarded, ArgType, Converter, Error, Flag, Occurrence, Parsed};

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
type Predicate<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;
type Formatter<E> = Arc<dyn Fn(&str, &E) -> Error + Send + Sync>;

/// Turns the errors of a parse function into messages.
///
/// Handlers are tried in the order they were added. The first one whose
/// predicate matches the error produces the message. If none match, the
/// error itself becomes the message ([`Error::ParsingFailed`]).
pub struct Handlers<E> {
    handlers: Vec<(Predicate<E>, Formatter<E>)>,
}

impl<E> Handlers<E> {
    /// No handlers: every error is reported as is.
    pub fn new() -> Handlers<E> {
        Handlers {
            handlers: Vec::new(),
        }
    }

    /// Report every error as a bad value of the named type, e.g. `Int`.
    pub fn bad_value(type_name: &'static str) -> Handlers<E> {
        Handlers::new().on_error(|_| true, move |_, _| Error::BadValue { type_name })
    }

    /// Add a handler that replaces matching errors with a message.
    ///
    /// The formatter gets the rejected value and the error.
    pub fn on<P, F>(self, predicate: P, formatter: F) -> Handlers<E>
    where
        P: Fn(&E) -> bool + Send + Sync + 'static,
        F: Fn(&str, &E) -> String + Send + Sync + 'static,
    {
        self.on_error(predicate, move |value, err| {
            Error::Custom(formatter(value, err))
        })
    }

    /// Add a handler that replaces matching errors with an [`Error`].
    pub fn on_error<P, F>(mut self, predicate: P, formatter: F) -> Handlers<E>
    where
        P: Fn(&E) -> bool + Send + Sync + 'static,
        F: Fn(&str, &E) -> Error + Send + Sync + 'static,
    {
        self.handlers.push((Arc::new(predicate), Arc::new(formatter)));
        self
    }

    fn handle(&self, value: &str, err: E) -> Error
    where
        E: Into<BoxError>,
    {
        for (predicate, formatter) in &self.handlers {
            if predicate(&err) {
                return formatter(value, &err);
            }
        }
        Error::parsing_failed(value, err)
    }
}

impl<E> Default for Handlers<E> {
    fn default() -> Self {
        Handlers::new()
    }
}

impl<E> Clone for Handlers<E> {
    fn clone(&self) -> Self {
        Handlers {
            handlers: self.handlers.clone(),
        }
    }
}

impl<E> std::fmt::Debug for Handlers<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handlers")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// A parse function together with its handlers.
///
/// Shared by the single-value and list converters.
pub(crate) struct ValueParser<T, E> {
    func: Arc<dyn Fn(&str) -> Result<T, E> + Send + Sync>,
    handlers: Handlers<E>,
}

impl<T, E: Into<BoxError>> ValueParser<T, E> {
    pub(crate) fn new<F>(func: F, handlers: Handlers<E>) -> ValueParser<T, E>
    where
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        ValueParser {
            func: Arc::new(func),
            handlers,
        }
    }

    pub(crate) fn parse(&self, value: &str) -> Result<T, Error> {
        match guarded(|| (self.func)(value))? {
            Ok(parsed) => Ok(parsed),
            Err(err) => {
                let err = self.handlers.handle(value, err);
                tracing::debug!(value, error = %err, "value rejected");
                Err(err)
            }
        }
    }
}

impl<T, E> Clone for ValueParser<T, E> {
    fn clone(&self) -> Self {
        ValueParser {
            func: Arc::clone(&self.func),
            handlers: self.handlers.clone(),
        }
    }
}

/// A converter for options that take exactly one value.
///
/// Created by [`single`], [`single_with`] or [`converter`].
pub struct Single<T, E> {
    parser: ValueParser<T, E>,
}

impl<T, E: Into<BoxError>> Converter for Single<T, E> {
    type Value = T;

    fn convert(&self, occurrences: &[Occurrence]) -> Parsed<T> {
        tracing::trace!(occurrences = occurrences.len(), arg_type = ?self.arg_type(), "converting single value");
        match occurrences {
            [] => Parsed::Absent,
            [Occurrence { tokens, .. }] if tokens.len() == 1 => {
                self.parser.parse(&tokens[0]).map(Some).into()
            }
            _ => {
                tracing::debug!(occurrences = occurrences.len(), "expected a single value");
                Parsed::Error(Error::ExactlyOne)
            }
        }
    }

    fn arg_type(&self) -> ArgType {
        ArgType::Single
    }
}

impl<T, E> Clone for Single<T, E> {
    fn clone(&self) -> Self {
        Single {
            parser: self.parser.clone(),
        }
    }
}

impl<T, E> std::fmt::Debug for Single<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Single")
            .field("handlers", &self.parser.handlers)
            .finish()
    }
}

/// A single-value converter using `func` to parse the value.
///
/// Errors are reported as is.
pub fn single<T, E, F>(func: F) -> Single<T, E>
where
    F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    E: Into<BoxError>,
{
    single_with(func, Handlers::new())
}

/// A single-value converter using `func` to parse the value and `handlers`
/// to turn its errors into messages.
pub fn single_with<T, E, F>(func: F, handlers: Handlers<E>) -> Single<T, E>
where
    F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    E: Into<BoxError>,
{
    Single {
        parser: ValueParser::new(func, handlers),
    }
}

/// A converter for file system paths.
pub fn path() -> Single<PathBuf, Infallible> {
    single(|value| Ok(PathBuf::from(value)))
}

/// A type with a standard converter.
///
/// This is an explicit registry: call [`converter::<T>()`][converter]
/// where an option is declared to get the converter for `T`.
pub trait Builtin: Sized {
    /// The type of the standard converter.
    type Converter: Converter<Value = Self>;

    /// The standard converter for this type.
    fn converter() -> Self::Converter;
}

/// The standard converter for `T`.
pub fn converter<T: Builtin>() -> T::Converter {
    T::converter()
}

impl Builtin for bool {
    type Converter = Flag;

    fn converter() -> Flag {
        crate::flag()
    }
}

impl Builtin for String {
    type Converter = Single<String, Infallible>;

    fn converter() -> Self::Converter {
        single(|value| Ok(value.to_owned()))
    }
}

impl Builtin for PathBuf {
    type Converter = Single<PathBuf, Infallible>;

    fn converter() -> Self::Converter {
        path()
    }
}

impl Builtin for char {
    type Converter = Single<char, std::char::ParseCharError>;

    fn converter() -> Self::Converter {
        single_with(str::parse::<char>, Handlers::bad_value("Char"))
    }
}

macro_rules! builtin_from_str {
    ($($ty:ty => $name:literal: $err:ty),* $(,)?) => {
        $(
            impl Builtin for $ty {
                type Converter = Single<$ty, $err>;

                fn converter() -> Self::Converter {
                    single_with(str::parse::<$ty>, Handlers::bad_value($name))
                }
            }
        )*
    };
}

builtin_from_str! {
    i8 => "Byte": ParseIntError,
    i16 => "Short": ParseIntError,
    i32 => "Int": ParseIntError,
    i64 => "Long": ParseIntError,
    i128 => "Huge": ParseIntError,
    u8 => "UByte": ParseIntError,
    u16 => "UShort": ParseIntError,
    u32 => "UInt": ParseIntError,
    u64 => "ULong": ParseIntError,
    usize => "Size": ParseIntError,
    f32 => "Float": ParseFloatError,
    f64 => "Double": ParseFloatError,
}

#[cfg(feature = "bignum")]
builtin_from_str! {
    num_bigint::BigInt => "BigInt": num_bigint::ParseBigIntError,
    bigdecimal::BigDecimal => "BigDecimal": bigdecimal::ParseBigDecimalError,
}
