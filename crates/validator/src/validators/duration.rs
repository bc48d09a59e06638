//! Duration-string validator.
//!
//! Accepts the Go duration syntax: an optional sign followed by one or more
//! decimal numbers, each with a unit, as in `300ms`, `-1.5h` or `2h45m`.
//! Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`.

use std::sync::{Arc, LazyLock};

use crate::conv::attr_value_to_string;
use crate::generic::{Generic, GenericConfig, TestFn, ValidatorRequest, ValidatorResponse};

/// Error from [`parse_duration`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("invalid duration {input:?}")]
    Invalid { input: String },
    #[error("missing unit in duration {input:?}")]
    MissingUnit { input: String },
    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },
}

const NANOSECOND: u128 = 1;
const MICROSECOND: u128 = 1_000 * NANOSECOND;
const MILLISECOND: u128 = 1_000 * MICROSECOND;
const SECOND: u128 = 1_000 * MILLISECOND;
const MINUTE: u128 = 60 * SECOND;
const HOUR: u128 = 60 * MINUTE;

fn unit_nanos(unit: &str) -> Option<u128> {
    Some(match unit {
        "ns" => NANOSECOND,
        "us" | "\u{b5}s" | "\u{3bc}s" => MICROSECOND,
        "ms" => MILLISECOND,
        "s" => SECOND,
        "m" => MINUTE,
        "h" => HOUR,
        _ => return None,
    })
}

/// Parse a duration string into signed nanoseconds.
pub fn parse_duration(input: &str) -> Result<i64, DurationError> {
    let invalid = || DurationError::Invalid {
        input: input.to_owned(),
    };

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    if rest == "0" {
        return Ok(0);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    // One past i64::MAX, the magnitude of i64::MIN.
    const LIMIT: u128 = 1 << 63;
    let mut total: u128 = 0;

    while !rest.is_empty() {
        if !rest.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        let int_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let (int_digits, after_int) = rest.split_at(int_len);
        let mut whole: u128 = 0;
        for d in int_digits.bytes() {
            whole = whole * 10 + u128::from(d - b'0');
            if whole > LIMIT {
                return Err(invalid());
            }
        }
        rest = after_int;

        let mut fraction: u128 = 0;
        let mut scale: u128 = 1;
        let mut frac_len = 0;
        if let Some(after_dot) = rest.strip_prefix('.') {
            frac_len = after_dot.find(|c: char| !c.is_ascii_digit()).unwrap_or(after_dot.len());
            // Digits past nanosecond-of-hour precision cannot change the result.
            for d in after_dot[..frac_len].bytes().take(24) {
                fraction = fraction * 10 + u128::from(d - b'0');
                scale *= 10;
            }
            rest = &after_dot[frac_len..];
        }
        if int_len == 0 && frac_len == 0 {
            return Err(invalid());
        }

        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (unit, after_unit) = rest.split_at(unit_len);
        if unit.is_empty() {
            return Err(DurationError::MissingUnit {
                input: input.to_owned(),
            });
        }
        let Some(nanos) = unit_nanos(unit) else {
            return Err(DurationError::UnknownUnit {
                unit: unit.to_owned(),
                input: input.to_owned(),
            });
        };
        rest = after_unit;

        total += whole * nanos + fraction * nanos / scale;
        if total > LIMIT {
            return Err(invalid());
        }
    }

    if negative {
        // total <= 2^63, so the negation fits.
        Ok((-(total as i128)) as i64)
    } else {
        i64::try_from(total).map_err(|_| invalid())
    }
}

static IS_DURATION_STRING: LazyLock<Generic> = LazyLock::new(|| {
    Generic::new(GenericConfig {
        description: "Tests if value is a valid duration string".into(),
        markdown_description: "Tests if value is a valid duration string".into(),
        test_fn: Some(is_duration_string_test()),
        skip_when_null: true,
        skip_when_unknown: true,
        ..GenericConfig::default()
    })
});

/// Test function behind [`is_duration_string`].
pub fn is_duration_string_test() -> TestFn {
    Arc::new(|req: &ValidatorRequest<'_>, resp: &mut ValidatorResponse| {
        if let Err(err) = parse_duration(&attr_value_to_string(req.config_value)) {
            resp.diagnostics.add_attribute_error(
                req.path.clone(),
                "Value is not parseable as duration",
                format!("Value is not parseable as duration: {err}"),
            );
        }
    })
}

/// Validator requiring a duration string. Null and unknown values are
/// skipped.
pub fn is_duration_string() -> Generic {
    IS_DURATION_STRING.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::test_support::evaluate;
    use attrval_core::AttrValue;
    use rstest::rstest;

    const S: i64 = 1_000_000_000;

    #[rstest]
    #[case("0", 0)]
    #[case("-0", 0)]
    #[case("5s", 5 * S)]
    #[case("+5s", 5 * S)]
    #[case("-1.5h", -5400 * S)]
    #[case("2h45m", 9900 * S)]
    #[case("300ms", 300_000_000)]
    #[case("1µs", 1_000)]
    #[case("1us", 1_000)]
    #[case(".5s", 500_000_000)]
    #[case("1.s", S)]
    #[case("1h1m1s1ms1us1ns", 3_661_001_001_001)]
    #[case("9223372036854775807ns", i64::MAX)]
    #[case("-9223372036854775808ns", i64::MIN)]
    fn parses(#[case] input: &str, #[case] nanos: i64) {
        assert_eq!(parse_duration(input), Ok(nanos));
    }

    #[rstest]
    #[case("")]
    #[case("-")]
    #[case("s")]
    #[case(".s")]
    #[case("9223372036854775808ns")]
    fn rejects_invalid(#[case] input: &str) {
        assert_eq!(
            parse_duration(input),
            Err(DurationError::Invalid {
                input: input.to_owned()
            })
        );
    }

    #[test]
    fn reports_unit_problems() {
        assert!(matches!(parse_duration("10"), Err(DurationError::MissingUnit { .. })));
        assert!(matches!(parse_duration("1.2.3s"), Err(DurationError::MissingUnit { .. })));
        assert_eq!(
            parse_duration("3d"),
            Err(DurationError::UnknownUnit {
                unit: "d".into(),
                input: "3d".into()
            })
        );
    }

    #[test]
    fn validator_reports_unparseable_values() {
        let (_, resp) = evaluate(&is_duration_string(), &AttrValue::string_value("soon"));
        assert_eq!(
            resp.diagnostics.as_slice()[0].summary,
            "Value is not parseable as duration"
        );
        let (_, resp) = evaluate(&is_duration_string(), &AttrValue::string_value("90s"));
        assert!(resp.diagnostics.is_empty());
    }
}
