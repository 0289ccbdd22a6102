//! Converter for `key=value` property options, as in `-D user=root,debug=1`.
//!
//! Every value of every occurrence may hold several properties separated
//! by commas. A comma or equals sign that is part of a key or value is
//! escaped with a backslash: `-D 'list=a\,b'` sets `list` to `a,b`.

use std::collections::BTreeMap;

use crate::{ArgType, Converter, Error, Occurrence, Parsed};

/// A converter for `key=value` properties.
///
/// The values are converted by an inner converter, which gets each one as
/// a single occurrence with a single token. A key that appears twice
/// keeps its last value.
#[derive(Debug, Clone)]
pub struct Props<C> {
    inner: C,
}

/// A property converter that converts values with `inner`.
pub fn props<C: Converter>(inner: C) -> Props<C> {
    Props { inner }
}

impl<C: Converter> Props<C> {
    fn convert_value(&self, value: &str) -> Result<C::Value, Error> {
        match self.inner.convert(&[Occurrence::new("", [value])]) {
            Parsed::Present(value) => Ok(value),
            Parsed::Error(err) => Err(err),
            Parsed::Absent => Err(Error::MissingValue),
        }
    }

    fn collect(&self, occurrences: &[Occurrence]) -> Result<BTreeMap<String, C::Value>, Error> {
        let mut map = BTreeMap::new();
        for token in occurrences.iter().flat_map(|occ| occ.tokens.iter()) {
            let token = token.trim();
            if token == "," {
                continue;
            }
            for fragment in split_unescaped(token, ',') {
                let fragment = fragment.replace("\\,", ",");
                if fragment.is_empty() {
                    continue;
                }
                let (key, value) = match split_once_unescaped(&fragment, '=') {
                    Some(pair) => pair,
                    None => {
                        tracing::debug!(%fragment, "property without '='");
                        return Err(Error::MalformedProperty(fragment));
                    }
                };
                let key = key.replace("\\=", "=");
                let value = self.convert_value(&value.replace("\\=", "="))?;
                map.insert(key, value);
            }
        }
        Ok(map)
    }
}

impl<C: Converter> Converter for Props<C> {
    type Value = BTreeMap<String, C::Value>;

    fn convert(&self, occurrences: &[Occurrence]) -> Parsed<Self::Value> {
        tracing::trace!(occurrences = occurrences.len(), arg_type = ?self.arg_type(), "converting properties");
        match self.collect(occurrences) {
            Ok(map) if map.is_empty() => Parsed::Absent,
            Ok(map) => Parsed::Present(map),
            Err(err) => Parsed::Error(err),
        }
    }

    fn arg_type(&self) -> ArgType {
        ArgType::List
    }
}

/// Split on every `sep` that is not directly preceded by a backslash.
fn split_unescaped(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (pos, ch) in text.char_indices() {
        if ch == sep && !escaped {
            parts.push(&text[start..pos]);
            start = pos + ch.len_utf8();
        }
        escaped = ch == '\\';
    }
    parts.push(&text[start..]);
    parts
}

/// Split on the first `sep` that is not directly preceded by a backslash.
fn split_once_unescaped(text: &str, sep: char) -> Option<(&str, &str)> {
    let mut escaped = false;
    for (pos, ch) in text.char_indices() {
        if ch == sep && !escaped {
            return Some((&text[..pos], &text[pos + ch.len_utf8()..]));
        }
        escaped = ch == '\\';
    }
    None
}
