//! Time duration converters.
//!
//! Durations use the [`humantime`] grammar (`10s`, `5m`, `2h 37min`), plus
//! the keywords `Inf`, `PlusInf` and `+Inf` for an unbounded duration and
//! `MinusInf` and `-Inf` for its negative counterpart. Keywords are not
//! case sensitive.

use std::fmt::{self, Display};
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::{single, single_with, Builtin, Error, Handlers, Single};

/// A time duration that may be unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Duration {
    /// Shorter than every finite duration.
    NegativeInfinite,
    /// A finite duration.
    Finite(StdDuration),
    /// Longer than every finite duration.
    Infinite,
}

impl Duration {
    /// Returns `true` unless the duration is unbounded.
    pub fn is_finite(&self) -> bool {
        matches!(self, Duration::Finite(_))
    }

    /// The duration, if it's finite.
    pub fn finite(self) -> Option<StdDuration> {
        match self {
            Duration::Finite(duration) => Some(duration),
            _ => None,
        }
    }
}

impl From<StdDuration> for Duration {
    fn from(duration: StdDuration) -> Self {
        Duration::Finite(duration)
    }
}

impl FromStr for Duration {
    type Err = humantime::DurationError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        match text.to_ascii_lowercase().as_str() {
            "inf" | "plusinf" | "+inf" => Ok(Duration::Infinite),
            "minusinf" | "-inf" => Ok(Duration::NegativeInfinite),
            _ => humantime::parse_duration(text).map(Duration::Finite),
        }
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Duration::NegativeInfinite => write!(f, "MinusInf"),
            Duration::Finite(duration) => write!(f, "{}", humantime::format_duration(*duration)),
            Duration::Infinite => write!(f, "Inf"),
        }
    }
}

/// A converter for durations, accepting the unbounded ones.
pub fn duration() -> Single<Duration, humantime::DurationError> {
    single(str::parse::<Duration>)
}

/// A converter for durations that rejects the unbounded ones.
pub fn finite_duration() -> Single<StdDuration, Error> {
    single_with(
        parse_finite,
        Handlers::new().on_error(|_| true, |_, err: &Error| err.clone()),
    )
}

fn parse_finite(text: &str) -> Result<StdDuration, Error> {
    match text.parse::<Duration>() {
        Ok(Duration::Finite(duration)) => Ok(duration),
        Ok(_) => Err(Error::InfiniteDuration(text.trim().to_owned())),
        Err(err) => Err(Error::parsing_failed(text, err)),
    }
}

impl Builtin for Duration {
    type Converter = Single<Duration, humantime::DurationError>;

    fn converter() -> Self::Converter {
        duration()
    }
}

impl Builtin for StdDuration {
    type Converter = Single<StdDuration, Error>;

    fn converter() -> Self::Converter {
        finite_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use pretty_assertions::assert_eq;

    fn one(token: &str) -> [Occurrence; 1] {
        [Occurrence::new("timeout", [token])]
    }

    #[test]
    fn test_from_str() -> Result<(), humantime::DurationError> {
        assert_eq!("10s".parse::<Duration>()?, Duration::Finite(StdDuration::from_secs(10)));
        assert_eq!(
            "10 seconds".parse::<Duration>()?,
            Duration::Finite(StdDuration::from_secs(10))
        );
        assert_eq!(
            "2h 37min".parse::<Duration>()?,
            Duration::Finite(StdDuration::from_secs(2 * 3600 + 37 * 60))
        );
        assert_eq!("Inf".parse::<Duration>()?, Duration::Infinite);
        assert_eq!(" +inf ".parse::<Duration>()?, Duration::Infinite);
        assert_eq!("PlusInf".parse::<Duration>()?, Duration::Infinite);
        assert_eq!("MinusInf".parse::<Duration>()?, Duration::NegativeInfinite);
        assert_eq!("-Inf".parse::<Duration>()?, Duration::NegativeInfinite);
        assert!("ten seconds".parse::<Duration>().is_err());
        Ok(())
    }

    #[test]
    fn test_order() {
        let minute = Duration::from(StdDuration::from_secs(60));
        assert!(Duration::NegativeInfinite < minute);
        assert!(minute < Duration::Infinite);
        assert!(minute.is_finite());
        assert!(!Duration::Infinite.is_finite());
        assert_eq!(minute.finite(), Some(StdDuration::from_secs(60)));
        assert_eq!(Duration::Infinite.finite(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Duration::from(StdDuration::from_secs(90)).to_string(), "1m 30s");
        assert_eq!(Duration::Infinite.to_string(), "Inf");
        assert_eq!(Duration::NegativeInfinite.to_string(), "MinusInf");
    }

    #[test]
    fn test_duration() {
        let conv = crate::converter::<Duration>();
        assert_eq!(conv.arg_type(), ArgType::Single);
        assert_eq!(conv.convert(&[]), Absent);
        assert_eq!(
            conv.convert(&one("5m")),
            Present(Duration::Finite(StdDuration::from_secs(300)))
        );
        assert_eq!(conv.convert(&one("Inf")), Present(Duration::Infinite));
        match conv.convert(&one("5 parsecs")) {
            Parsed::Error(Error::ParsingFailed { value, .. }) => assert_eq!(value, "5 parsecs"),
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_finite_duration() {
        let conv = crate::converter::<StdDuration>();
        assert_eq!(conv.convert(&one("10s")), Present(StdDuration::from_secs(10)));
        assert_eq!(
            conv.convert(&one("10 seconds")),
            Present(StdDuration::from_secs(10))
        );
        assert_eq!(
            conv.convert(&one("Inf")),
            Parsed::Error(Error::InfiniteDuration("Inf".into()))
        );
        assert_eq!(
            conv.convert(&one("-inf")).error().map(|e| e.message()),
            Some("'-inf' is not a finite duration".to_owned())
        );
        match conv.convert(&one("soon")) {
            Parsed::Error(Error::ParsingFailed { value, .. }) => assert_eq!(value, "soon"),
            other => panic!("{:?}", other),
        }
    }
}
