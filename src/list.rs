//! Converters for options that collect any number of values.

use std::convert::Infallible;

use crate::scalar::{BoxError, Handlers, ValueParser};
use crate::{ArgType, Converter, Occurrence, Parsed};

/// A converter that parses every value of every occurrence.
///
/// Values are parsed in command line order. The first value that fails
/// to parse fails the whole conversion.
pub struct List<T, E> {
    parser: ValueParser<T, E>,
}

/// A list converter using `func` to parse each value.
pub fn list<T, E, F>(func: F) -> List<T, E>
where
    F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    E: Into<BoxError>,
{
    list_with(func, Handlers::new())
}

/// A list converter using `func` to parse each value and `handlers` to
/// turn its errors into messages.
pub fn list_with<T, E, F>(func: F, handlers: Handlers<E>) -> List<T, E>
where
    F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    E: Into<BoxError>,
{
    List {
        parser: ValueParser::new(func, handlers),
    }
}

/// A converter that collects every value as is.
pub fn strings() -> List<String, Infallible> {
    list(|value| Ok(value.to_owned()))
}

impl<T, E: Into<BoxError>> Converter for List<T, E> {
    type Value = Vec<T>;

    fn convert(&self, occurrences: &[Occurrence]) -> Parsed<Vec<T>> {
        tracing::trace!(occurrences = occurrences.len(), arg_type = ?self.arg_type(), "converting list");
        let values = occurrences
            .iter()
            .flat_map(|occ| occ.tokens.iter())
            .map(|token| self.parser.parse(token))
            .collect::<Result<Vec<T>, _>>();
        match values {
            Ok(values) if values.is_empty() => Parsed::Absent,
            Ok(values) => Parsed::Present(values),
            Err(err) => Parsed::Error(err),
        }
    }

    fn arg_type(&self) -> ArgType {
        ArgType::List
    }
}

impl<T, E> Clone for List<T, E> {
    fn clone(&self) -> Self {
        List {
            parser: self.parser.clone(),
        }
    }
}

impl<T, E> std::fmt::Debug for List<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("List").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use crate::Error;
    use pretty_assertions::assert_eq;
    use std::num::ParseIntError;

    fn ints() -> List<i32, ParseIntError> {
        list(str::parse::<i32>)
    }

    #[test]
    fn test_across_occurrences() {
        let conv = ints();
        assert_eq!(conv.arg_type(), ArgType::List);
        assert_eq!(
            conv.convert(&[Occurrence::new("x", ["1", "2"]), Occurrence::new("x", ["3"])]),
            Present(vec![1, 2, 3])
        );
    }

    #[test]
    fn test_empty() {
        let conv = ints();
        assert_eq!(conv.convert(&[]), Absent);
        assert_eq!(conv.convert(&[Occurrence::flag("x")]), Absent);
    }

    #[test]
    fn test_no_partial_result() {
        let conv = ints();
        match conv.convert(&[Occurrence::new("x", ["1", "two", "3"])]) {
            Parsed::Error(Error::ParsingFailed { value, error }) => {
                assert_eq!(value, "two");
                assert_eq!(error.to_string(), "invalid digit found in string");
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_first_failure_wins() {
        let conv = list_with(str::parse::<u8>, Handlers::bad_value("UByte"))
            .map(|values| values.len());
        assert_eq!(
            conv.convert(&[Occurrence::new("x", ["1", "x"]), Occurrence::new("x", ["y"])]),
            Parsed::Error(Error::BadValue { type_name: "UByte" })
        );
        assert_eq!(conv.convert(&[Occurrence::new("x", ["1", "2"])]), Present(2));
    }

    #[test]
    fn test_strings() {
        let conv = strings();
        assert_eq!(
            conv.convert(&[Occurrence::new("f", ["a.txt"]), Occurrence::new("f", ["b c"])]),
            Present(vec!["a.txt".to_owned(), "b c".to_owned()])
        );
        let given = [Occurrence::new("f", ["x"])];
        assert_eq!(conv.convert(&given), conv.convert(&given));
    }
}
