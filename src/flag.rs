//! Converters for options that take no values.

use crate::{ArgType, Converter, Error, Occurrence, Parsed};

/// A converter for a flag that is either given once or not at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flag;

/// A flag converter. Also available as [`converter::<bool>()`][crate::converter].
pub fn flag() -> Flag {
    Flag
}

impl Converter for Flag {
    type Value = bool;

    fn convert(&self, occurrences: &[Occurrence]) -> Parsed<bool> {
        tracing::trace!(occurrences = occurrences.len(), arg_type = ?self.arg_type(), "converting flag");
        match occurrences {
            [] => Parsed::Absent,
            [Occurrence { tokens, .. }] if tokens.is_empty() => Parsed::Present(true),
            _ => {
                tracing::debug!(occurrences = occurrences.len(), "flag repeated or given a value");
                Parsed::Error(Error::FlagArguments)
            }
        }
    }

    fn arg_type(&self) -> ArgType {
        ArgType::Flag
    }
}

/// A converter that counts how often a flag was given, as in `-vvv`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tally;

/// A counting flag converter.
pub fn tally() -> Tally {
    Tally
}

impl Converter for Tally {
    type Value = usize;

    fn convert(&self, occurrences: &[Occurrence]) -> Parsed<usize> {
        tracing::trace!(occurrences = occurrences.len(), arg_type = ?self.arg_type(), "counting flag");
        if occurrences.iter().any(|occ| !occ.tokens.is_empty()) {
            tracing::debug!("counted flag given a value");
            Parsed::Error(Error::UnexpectedArguments)
        } else if occurrences.is_empty() {
            Parsed::Absent
        } else {
            Parsed::Present(occurrences.len())
        }
    }

    fn arg_type(&self) -> ArgType {
        ArgType::Flag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flag() {
        let conv = flag();
        assert_eq!(conv.arg_type(), ArgType::Flag);
        assert_eq!(conv.convert(&[]), Absent);
        assert_eq!(conv.convert(&[Occurrence::flag("f")]), Present(true));
        assert_eq!(
            conv.convert(&[Occurrence::new("f", ["x"])]),
            Parsed::Error(Error::FlagArguments)
        );
        assert_eq!(
            conv.convert(&[Occurrence::flag("f"), Occurrence::flag("f")]),
            Parsed::Error(Error::FlagArguments)
        );
    }

    #[test]
    fn test_bool_is_flag() {
        let conv = crate::converter::<bool>();
        assert_eq!(conv.convert(&[Occurrence::flag("verbose")]), Present(true));
        assert_eq!(
            conv.convert(&[Occurrence::new("verbose", ["true"])])
                .error()
                .map(|e| e.message()),
            Some("too many arguments for flag option".to_owned())
        );
    }

    #[test]
    fn test_tally() {
        let conv = tally();
        assert_eq!(conv.arg_type(), ArgType::Flag);
        assert_eq!(conv.convert(&[]), Absent);
        assert_eq!(conv.convert(&[Occurrence::flag("v")]), Present(1));
        assert_eq!(
            conv.convert(&[
                Occurrence::flag("v"),
                Occurrence::flag("verbose"),
                Occurrence::flag("v"),
            ]),
            Present(3)
        );
    }

    #[test]
    fn test_tally_with_value() {
        let conv = tally();
        assert_eq!(
            conv.convert(&[Occurrence::new("v", ["2"])]),
            Parsed::Error(Error::UnexpectedArguments)
        );
        assert_eq!(
            conv.convert(&[Occurrence::flag("v"), Occurrence::new("v", ["x"])])
                .error()
                .map(|e| e.message()),
            Some("this option doesn't need arguments".to_owned())
        );
    }
}
