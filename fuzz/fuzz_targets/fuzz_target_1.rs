#![no_main]
use libfuzzer_sys::fuzz_target;
use optval::prelude::*;
use std::convert::TryInto;

// We check that the absent/present contract holds, but mainly make sure
// that no converter panics.
fuzz_target!(|data: &[u8]| {
    let mut data = data;
    let mut decisions;
    if data.len() > 8 {
        // Decide where each occurrence ends, one bit per token
        decisions = u64::from_le_bytes(data[..8].try_into().unwrap());
        data = &data[8..];
    } else {
        decisions = 0;
    }
    let text = String::from_utf8_lossy(data);
    let mut occurrences = Vec::new();
    let mut current = Occurrence::flag("x");
    // Tokens can't contain null bytes, so it's a reasonable separator
    for token in text.split('\0').filter(|token| !token.is_empty()) {
        current.tokens.push(token.to_owned());
        if decisions % 2 == 1 {
            occurrences.push(std::mem::replace(&mut current, Occurrence::flag("x")));
        }
        decisions /= 2;
    }
    if !current.tokens.is_empty() || decisions % 2 == 1 {
        occurrences.push(current);
    }

    check(&optval::flag(), &occurrences, false);
    check(&optval::tally(), &occurrences, false);
    check(&optval::converter::<i32>(), &occurrences, false);
    // NaN is never equal to itself
    check(&optval::converter::<f64>().map(f64::to_bits), &occurrences, false);
    check(&optval::converter::<char>(), &occurrences, false);
    check(&optval::converter::<optval::duration::Duration>(), &occurrences, false);
    check(&optval::opt_default(0, optval::converter::<u8>()), &occurrences, false);
    // These may come back absent when every token is empty.
    check(&optval::list(|s: &str| s.parse::<i64>()), &occurrences, true);
    check(&optval::props(optval::converter::<String>()), &occurrences, true);
    check(&optval::props(optval::converter::<i32>()), &occurrences, true);
});

fn check<C: Converter>(conv: &C, occurrences: &[Occurrence], may_be_absent: bool)
where
    C::Value: PartialEq + std::fmt::Debug,
{
    let first = conv.convert(occurrences);
    if occurrences.is_empty() {
        assert!(first.is_absent());
    } else if !may_be_absent {
        assert!(!first.is_absent());
    }
    assert!(!matches!(first, Parsed::Error(optval::Error::Panicked(_))));
    assert_eq!(first, conv.convert(occurrences));
}
