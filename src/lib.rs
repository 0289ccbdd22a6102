//! Typed value conversion for command line options.
//!
//! A tokenizer groups the raw strings of each option into an occurrence
//! list: one [`Occurrence`] per time the option appeared, holding the
//! tokens captured for it. A [`Converter`] turns that list into a
//! [`Parsed`] value, which is either absent (the option was never given),
//! present, or an [`Error`] explaining what was wrong.
//!
//! Converters never panic and never fail in any other way than through
//! [`Parsed::Error`]. They hold no state, so one converter can be shared
//! between any number of options and parses.
//!
//! ## Example
//! ```
//! use optval::prelude::*;
//!
//! let level = optval::converter::<i32>();
//! let given = [Occurrence::new("level", ["3"])];
//! assert_eq!(level.convert(&given), Present(3));
//! assert_eq!(level.convert(&[]), Absent);
//!
//! let defines = optval::props(optval::converter::<String>());
//! let given = [Occurrence::new("D", ["user=root,home=/root"])];
//! let map = defines.convert(&given).present().unwrap();
//! assert_eq!(map["user"], "root");
//! assert_eq!(map["home"], "/root");
//!
//! let verbose = optval::tally();
//! let given = [Occurrence::flag("v"), Occurrence::flag("v")];
//! assert_eq!(verbose.convert(&given), Present(2));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::panic::{self, AssertUnwindSafe};

mod default;
#[cfg(feature = "duration")]
pub mod duration;
mod error;
mod flag;
mod list;
mod props;
mod scalar;

pub use crate::default::{opt_default, OptDefault};
pub use crate::error::Error;
pub use crate::flag::{flag, tally, Flag, Tally};
pub use crate::list::{list, list_with, strings, List};
pub use crate::props::{props, Props};
pub use crate::scalar::{converter, path, single, single_with, Builtin, Handlers, Single};

/// One appearance of an option on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Occurrence {
    /// The name the option was given under, e.g. `v` or `verbose`.
    pub name: String,
    /// The raw values captured for this appearance. Empty for flags.
    pub tokens: Vec<String>,
}

impl Occurrence {
    /// An appearance of `name` with the given values.
    pub fn new<I>(name: impl Into<String>, tokens: I) -> Occurrence
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Occurrence {
            name: name.into(),
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// An appearance of `name` without any values.
    pub fn flag(name: impl Into<String>) -> Occurrence {
        Occurrence {
            name: name.into(),
            tokens: Vec::new(),
        }
    }
}

/// How many values a converter wants per occurrence.
///
/// A tokenizer reads this to decide how many tokens to collect for an
/// option before it starts looking for the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgType {
    /// No values.
    Flag,
    /// Exactly one value, in a single occurrence.
    Single,
    /// Any number of values across any number of occurrences.
    List,
}

impl ArgType {
    /// Whether the tokenizer should collect values for this option at all.
    pub fn takes_values(self) -> bool {
        !matches!(self, ArgType::Flag)
    }
}

/// The outcome of a conversion.
///
/// `Absent` means the option was not given. Converters that collect values
/// ([`List`], [`Props`]) also return it when no values were collected.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed<T> {
    /// The option was not given.
    Absent,
    /// The option was given and converted.
    Present(T),
    /// The option was given but could not be converted.
    Error(Error),
}

impl<T> Parsed<T> {
    /// Returns `true` if the option was not given.
    pub fn is_absent(&self) -> bool {
        matches!(self, Parsed::Absent)
    }

    /// Returns `true` if the option was given and converted.
    pub fn is_present(&self) -> bool {
        matches!(self, Parsed::Present(_))
    }

    /// Returns `true` if the conversion failed.
    pub fn is_error(&self) -> bool {
        matches!(self, Parsed::Error(_))
    }

    /// The converted value, if there is one.
    pub fn present(self) -> Option<T> {
        match self {
            Parsed::Present(value) => Some(value),
            _ => None,
        }
    }

    /// The error, if the conversion failed.
    pub fn error(self) -> Option<Error> {
        match self {
            Parsed::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Transform a present value.
    pub fn map<U, F: FnOnce(T) -> U>(self, func: F) -> Parsed<U> {
        match self {
            Parsed::Absent => Parsed::Absent,
            Parsed::Present(value) => Parsed::Present(func(value)),
            Parsed::Error(err) => Parsed::Error(err),
        }
    }

    /// Transform a present value with a function that may fail.
    pub fn and_then<U, F: FnOnce(T) -> Result<U, Error>>(self, func: F) -> Parsed<U> {
        match self {
            Parsed::Absent => Parsed::Absent,
            Parsed::Present(value) => match func(value) {
                Ok(value) => Parsed::Present(value),
                Err(err) => Parsed::Error(err),
            },
            Parsed::Error(err) => Parsed::Error(err),
        }
    }

    /// Convert into a `Result`, so that `?` can be used on it.
    pub fn into_result(self) -> Result<Option<T>, Error> {
        self.into()
    }
}

impl<T> From<Result<Option<T>, Error>> for Parsed<T> {
    fn from(result: Result<Option<T>, Error>) -> Self {
        match result {
            Ok(Some(value)) => Parsed::Present(value),
            Ok(None) => Parsed::Absent,
            Err(err) => Parsed::Error(err),
        }
    }
}

impl<T> From<Parsed<T>> for Result<Option<T>, Error> {
    fn from(parsed: Parsed<T>) -> Self {
        match parsed {
            Parsed::Absent => Ok(None),
            Parsed::Present(value) => Ok(Some(value)),
            Parsed::Error(err) => Err(err),
        }
    }
}

/// Turns the occurrence list of one option into a typed value.
pub trait Converter {
    /// The type of the converted value.
    type Value;

    /// Convert the occurrences of an option, in command line order.
    fn convert(&self, occurrences: &[Occurrence]) -> Parsed<Self::Value>;

    /// How many values the tokenizer should collect per occurrence.
    fn arg_type(&self) -> ArgType;

    /// Transform the converted value. The argument type stays the same.
    ///
    /// A panic in `func` is turned into an error.
    fn map<U, F>(self, func: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Value) -> U,
    {
        Map { inner: self, func }
    }

    /// Transform the converted value with a function that may reject it.
    ///
    /// The function can't make a given option absent: it either returns a
    /// value or an error. A panic in `func` is turned into an error.
    fn and_then<U, F>(self, func: F) -> AndThen<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Value) -> Result<U, Error>,
    {
        AndThen { inner: self, func }
    }
}

impl<C: Converter + ?Sized> Converter for &C {
    type Value = C::Value;

    fn convert(&self, occurrences: &[Occurrence]) -> Parsed<Self::Value> {
        (**self).convert(occurrences)
    }

    fn arg_type(&self) -> ArgType {
        (**self).arg_type()
    }
}

impl<C: Converter + ?Sized> Converter for Box<C> {
    type Value = C::Value;

    fn convert(&self, occurrences: &[Occurrence]) -> Parsed<Self::Value> {
        (**self).convert(occurrences)
    }

    fn arg_type(&self) -> ArgType {
        (**self).arg_type()
    }
}

/// A converter that transforms the output of another. See [`Converter::map`].
#[derive(Debug, Clone)]
pub struct Map<C, F> {
    inner: C,
    func: F,
}

impl<C, F, U> Converter for Map<C, F>
where
    C: Converter,
    F: Fn(C::Value) -> U,
{
    type Value = U;

    fn convert(&self, occurrences: &[Occurrence]) -> Parsed<U> {
        tracing::trace!(occurrences = occurrences.len(), arg_type = ?self.arg_type(), "mapping value");
        self.inner
            .convert(occurrences)
            .and_then(|value| guarded(|| (self.func)(value)))
    }

    fn arg_type(&self) -> ArgType {
        self.inner.arg_type()
    }
}

/// A converter that validates the output of another. See [`Converter::and_then`].
#[derive(Debug, Clone)]
pub struct AndThen<C, F> {
    inner: C,
    func: F,
}

impl<C, F, U> Converter for AndThen<C, F>
where
    C: Converter,
    F: Fn(C::Value) -> Result<U, Error>,
{
    type Value = U;

    fn convert(&self, occurrences: &[Occurrence]) -> Parsed<U> {
        tracing::trace!(occurrences = occurrences.len(), arg_type = ?self.arg_type(), "validating value");
        self.inner
            .convert(occurrences)
            .and_then(|value| guarded(|| (self.func)(value)).and_then(|result| result))
    }

    fn arg_type(&self) -> ArgType {
        self.inner.arg_type()
    }
}

/// Run a user-supplied function, turning a panic into an error.
fn guarded<T>(func: impl FnOnce() -> T) -> Result<T, Error> {
    panic::catch_unwind(AssertUnwindSafe(func)).map_err(|payload| {
        let message = if let Some(msg) = payload.downcast_ref::<&str>() {
            (*msg).to_owned()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "unknown panic payload".to_owned()
        };
        tracing::warn!(%message, "parse function panicked");
        Error::Panicked(message)
    })
}

/// A small prelude for converting options.
///
/// It allows you to write `Absent`/`Present` without a [`Parsed`] prefix
/// and brings the [`Converter`] trait and [`Occurrence`] into scope.
pub mod prelude {
    pub use super::Parsed::{Absent, Present};
    pub use super::{ArgType, Converter, Occurrence, Parsed};
}
