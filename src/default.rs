use crate::{ArgType, Converter, Error, Occurrence, Parsed};

/// A converter for options whose value may be left out, as in `--color`
/// versus `--color=never`.
///
/// If the option is given without a value the default is used. A single
/// value is handed to the inner converter.
#[derive(Debug, Clone)]
pub struct OptDefault<C, T> {
    default: T,
    inner: C,
}

/// A converter that falls back to `default` when the option has no value.
pub fn opt_default<C, T>(default: T, inner: C) -> OptDefault<C, T>
where
    C: Converter<Value = T>,
{
    OptDefault { default, inner }
}

impl<C, T> Converter for OptDefault<C, T>
where
    C: Converter<Value = T>,
    T: Clone,
{
    type Value = T;

    fn convert(&self, occurrences: &[Occurrence]) -> Parsed<T> {
        tracing::trace!(occurrences = occurrences.len(), arg_type = ?self.arg_type(), "converting optional value");
        match occurrences {
            [] => Parsed::Absent,
            [Occurrence { tokens, .. }] if tokens.is_empty() => Parsed::Present(self.default.clone()),
            [Occurrence { tokens, .. }] if tokens.len() == 1 => self.inner.convert(occurrences),
            _ => {
                tracing::debug!(occurrences = occurrences.len(), "too many values for optional value");
                Parsed::Error(Error::TooManyArguments)
            }
        }
    }

    // LIST, so the tokenizer lets through both zero and one value.
    fn arg_type(&self) -> ArgType {
        ArgType::List
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use crate::converter;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_opt_default() {
        let conv = opt_default(5, converter::<i32>());
        assert_eq!(conv.arg_type(), ArgType::List);
        assert_eq!(conv.convert(&[]), Absent);
        assert_eq!(conv.convert(&[Occurrence::flag("n")]), Present(5));
        assert_eq!(conv.convert(&[Occurrence::new("n", ["9"])]), Present(9));
        assert_eq!(
            conv.convert(&[Occurrence::new("n", ["bad"])]),
            Parsed::Error(Error::BadValue { type_name: "Int" })
        );
    }

    #[test]
    fn test_too_many() {
        let conv = opt_default(5, converter::<i32>());
        assert_eq!(
            conv.convert(&[Occurrence::new("n", ["1", "2"])]),
            Parsed::Error(Error::TooManyArguments)
        );
        assert_eq!(
            conv.convert(&[Occurrence::flag("n"), Occurrence::flag("n")])
                .error()
                .map(|e| e.message()),
            Some("Too many arguments".to_owned())
        );
        assert_eq!(
            conv.convert(&[Occurrence::new("n", ["1"]), Occurrence::new("n", ["2"])]),
            Parsed::Error(Error::TooManyArguments)
        );
    }

    #[test]
    fn test_text_default() {
        let conv = opt_default("always".to_owned(), converter::<String>());
        assert_eq!(
            conv.convert(&[Occurrence::flag("color")]),
            Present("always".to_owned())
        );
        assert_eq!(
            conv.convert(&[Occurrence::new("color", ["never"])]),
            Present("never".to_owned())
        );
    }
}
