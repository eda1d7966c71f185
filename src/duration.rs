//! Compound duration expressions such as `300ms`, `-1.5h` or `1h30m`.
//!
//! A duration is an optional sign followed by one or more `number unit`
//! groups. Numbers may carry a decimal fraction. Valid units are `ns`,
//! `us` (or `µs`), `ms`, `s`, `m` and `h`. The bare literal `0` needs no unit.
//!
//! Values are held as a signed nanosecond count, so the representable range
//! is that of an `i64` of nanoseconds (roughly ±292 years).

use std::fmt::Write;

use chrono::Duration;

use crate::errors::ParseError;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SEC: u64 = 1_000_000_000;
const NANOS_PER_MIN: u64 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MIN;

/// Magnitude of `i64::MIN`. Positive results must stay one below it.
const MAX_MAGNITUDE: u64 = 1 << 63;

const UNITS: &[(&str, u64)] = &[
    ("ns", 1),
    ("us", NANOS_PER_MICRO),
    ("\u{00b5}s", NANOS_PER_MICRO),
    ("\u{03bc}s", NANOS_PER_MICRO),
    ("ms", NANOS_PER_MILLI),
    ("s", NANOS_PER_SEC),
    ("m", NANOS_PER_MIN),
    ("h", NANOS_PER_HOUR),
];

/// Parses a duration expression.
///
/// Fractions finer than a nanosecond are truncated.
///
/// ```
/// use chrono::Duration;
/// use envget::parse_duration;
///
/// assert_eq!(parse_duration("1h30m").unwrap(), Duration::minutes(90));
/// assert_eq!(parse_duration("-1.5s").unwrap(), Duration::milliseconds(-1500));
/// assert!(parse_duration("1x").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<Duration, ParseError> {
    if input.is_empty() {
        return Err(ParseError::Empty);
    }

    let (negative, mut rest) = match input.as_bytes()[0] {
        b'-' => (true, &input[1..]),
        b'+' => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(Duration::zero());
    }
    if rest.is_empty() {
        return Err(ParseError::duration(input, "missing number"));
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        let (whole, has_whole, after_whole) =
            leading_int(rest).ok_or_else(|| ParseError::duration(input, "value out of range"))?;
        rest = after_whole;

        let mut fraction = Fraction::default();
        if let Some(after_dot) = rest.strip_prefix('.') {
            let (parsed, after_fraction) = leading_fraction(after_dot);
            fraction = parsed;
            rest = after_fraction;
        }
        if !has_whole && !fraction.has_digits {
            return Err(ParseError::duration(input, "missing number"));
        }

        let unit_end = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (unit, after_unit) = rest.split_at(unit_end);
        rest = after_unit;
        if unit.is_empty() {
            return Err(ParseError::duration(input, "missing unit"));
        }
        let unit_nanos = UNITS
            .iter()
            .find_map(|&(name, nanos)| (name == unit).then_some(nanos))
            .ok_or_else(|| ParseError::duration(input, "unknown unit"))?;

        let group = whole
            .checked_mul(unit_nanos)
            .and_then(|v| v.checked_add(fraction.scaled(unit_nanos)))
            .filter(|&v| v <= MAX_MAGNITUDE)
            .ok_or_else(|| ParseError::duration(input, "value out of range"))?;

        total = total
            .checked_add(group)
            .filter(|&v| v <= MAX_MAGNITUDE)
            .ok_or_else(|| ParseError::duration(input, "value out of range"))?;
    }

    let nanos = if negative {
        // `MAX_MAGNITUDE` itself maps onto `i64::MIN`.
        0i64.checked_sub_unsigned(total).unwrap_or(i64::MIN)
    } else {
        i64::try_from(total).map_err(|_| ParseError::duration(input, "value out of range"))?
    };

    Ok(Duration::nanoseconds(nanos))
}

/// Formats a duration in the compact form accepted by [`parse_duration`].
///
/// Sub-second values use the largest fitting unit (`1.5µs`, `250ms`); longer
/// ones are broken into hours, minutes and seconds (`1h30m0s`). Zero is `0s`.
///
/// ```
/// use chrono::Duration;
/// use envget::format_duration;
///
/// assert_eq!(format_duration(Duration::minutes(90)), "1h30m0s");
/// assert_eq!(format_duration(Duration::microseconds(1)), "1µs");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let nanos = total_nanos(duration);
    if nanos == 0 {
        return "0s".to_string();
    }

    let magnitude = nanos.unsigned_abs();
    let mut out = String::new();
    if nanos < 0 {
        out.push('-');
    }

    if magnitude < NANOS_PER_SEC as u128 {
        let (unit_nanos, precision, suffix) = if magnitude < NANOS_PER_MICRO as u128 {
            (1, 0, "ns")
        } else if magnitude < NANOS_PER_MILLI as u128 {
            (NANOS_PER_MICRO, 3, "\u{00b5}s")
        } else {
            (NANOS_PER_MILLI, 6, "ms")
        };
        push_decimal(&mut out, magnitude, unit_nanos as u128, precision);
        out.push_str(suffix);
        return out;
    }

    let secs = magnitude / NANOS_PER_SEC as u128;
    let hours = secs / 3600;
    let minutes = (secs / 60) % 60;
    if hours > 0 {
        let _ = write!(out, "{hours}h");
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{minutes}m");
    }
    push_decimal(
        &mut out,
        magnitude % NANOS_PER_MIN as u128,
        NANOS_PER_SEC as u128,
        9,
    );
    out.push('s');
    out
}

fn total_nanos(duration: Duration) -> i128 {
    match duration.num_nanoseconds() {
        Some(nanos) => nanos as i128,
        None => {
            let secs = duration.num_seconds();
            let rest = duration - Duration::seconds(secs);
            secs as i128 * NANOS_PER_SEC as i128 + rest.num_nanoseconds().unwrap_or(0) as i128
        }
    }
}

/// Writes `value / unit` with up to `precision` fractional digits, trailing
/// zeros trimmed.
fn push_decimal(out: &mut String, value: u128, unit: u128, precision: usize) {
    let _ = write!(out, "{}", value / unit);
    let fraction = value % unit;
    if fraction == 0 {
        return;
    }
    let digits = format!("{fraction:0precision$}");
    out.push('.');
    out.push_str(digits.trim_end_matches('0'));
}

/// Consumes leading ASCII digits. Returns `None` on overflow.
fn leading_int(s: &str) -> Option<(u64, bool, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, rest) = s.split_at(end);
    let mut value: u64 = 0;
    for digit in digits.bytes() {
        value = value
            .checked_mul(10)?
            .checked_add(u64::from(digit - b'0'))
            .filter(|&v| v <= MAX_MAGNITUDE)?;
    }
    Some((value, !digits.is_empty(), rest))
}

#[derive(Debug, Default)]
struct Fraction {
    numerator: u64,
    denominator: u64,
    has_digits: bool,
}

impl Fraction {
    fn scaled(&self, unit_nanos: u64) -> u64 {
        if self.numerator == 0 {
            return 0;
        }
        // Always below `unit_nanos`, so it fits back into a u64.
        (u128::from(self.numerator) * u128::from(unit_nanos) / u128::from(self.denominator))
            as u64
    }
}

/// Consumes fractional digits. Digits beyond what a u64 can hold are
/// dropped since they sit far below nanosecond resolution.
fn leading_fraction(s: &str) -> (Fraction, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, rest) = s.split_at(end);
    let mut fraction = Fraction {
        numerator: 0,
        denominator: 1,
        has_digits: !digits.is_empty(),
    };
    for digit in digits.bytes() {
        let next = fraction
            .numerator
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit - b'0')));
        match (next, fraction.denominator.checked_mul(10)) {
            (Some(numerator), Some(denominator)) => {
                fraction.numerator = numerator;
                fraction.denominator = denominator;
            }
            _ => break,
        }
    }
    (fraction, rest)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_parse_single_units() {
        let cases = [
            ("0ns", Duration::zero()),
            ("1ns", Duration::nanoseconds(1)),
            ("1us", Duration::microseconds(1)),
            ("1\u{00b5}s", Duration::microseconds(1)),
            ("1\u{03bc}s", Duration::microseconds(1)),
            ("1ms", Duration::milliseconds(1)),
            ("2s", Duration::seconds(2)),
            ("3m", Duration::minutes(3)),
            ("4h", Duration::hours(4)),
        ];

        for (input, want) in cases {
            assert_eq!(parse_duration(input), Ok(want), "{input:?}");
        }
    }

    #[test]
    fn test_parse_bare_zero() {
        assert_eq!(parse_duration("0"), Ok(Duration::zero()));
        assert_eq!(parse_duration("+0"), Ok(Duration::zero()));
        assert_eq!(parse_duration("-0"), Ok(Duration::zero()));
    }

    #[test]
    fn test_parse_compound_and_signed() {
        assert_eq!(parse_duration("1h30m"), Ok(Duration::minutes(90)));
        assert_eq!(
            parse_duration("1h2m3s4ms5us6ns"),
            Ok(Duration::hours(1)
                + Duration::minutes(2)
                + Duration::seconds(3)
                + Duration::milliseconds(4)
                + Duration::microseconds(5)
                + Duration::nanoseconds(6))
        );
        assert_eq!(parse_duration("-1h30m"), Ok(Duration::minutes(-90)));
        assert_eq!(parse_duration("+5s"), Ok(Duration::seconds(5)));
        assert_eq!(parse_duration("39h9m14.425s"), Ok(Duration::milliseconds(140_954_425)));
    }

    #[test]
    fn test_parse_fractions() {
        assert_eq!(parse_duration("1.5h"), Ok(Duration::minutes(90)));
        assert_eq!(parse_duration(".5s"), Ok(Duration::milliseconds(500)));
        assert_eq!(parse_duration("1.s"), Ok(Duration::seconds(1)));
        assert_eq!(parse_duration("1.004s"), Ok(Duration::milliseconds(1004)));
        assert_eq!(parse_duration("1.0000000001s"), Ok(Duration::seconds(1)));
        assert_eq!(
            parse_duration("0.100000000000000000000h"),
            Ok(Duration::minutes(6))
        );
    }

    #[test]
    fn test_parse_range_limits() {
        assert_eq!(
            parse_duration("9223372036854775807ns"),
            Ok(Duration::nanoseconds(i64::MAX))
        );
        assert_eq!(
            parse_duration("-9223372036854775808ns"),
            Ok(Duration::nanoseconds(i64::MIN))
        );
        for input in [
            "9223372036854775808ns",
            "-9223372036854775809ns",
            "3000000h",
            "9223372036854775807ns1ns",
            "99999999999999999999s",
        ] {
            assert!(parse_duration(input).is_err(), "{input:?} should overflow");
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_duration(""), Err(ParseError::Empty));
        let cases = [
            ("xyz", "missing number"),
            ("-", "missing number"),
            ("+", "missing number"),
            (".s", "missing number"),
            ("1", "missing unit"),
            ("1h30", "missing unit"),
            ("1x", "unknown unit"),
            ("1d", "unknown unit"),
            ("1 s", "unknown unit"),
            ("1S", "unknown unit"),
            ("--1s", "missing number"),
        ];

        for (input, reason) in cases {
            assert_eq!(
                parse_duration(input),
                Err(ParseError::duration(input, reason)),
                "{input:?}"
            );
        }
    }

    #[test]
    fn test_format() {
        let cases = [
            (Duration::zero(), "0s"),
            (Duration::nanoseconds(1), "1ns"),
            (Duration::nanoseconds(1_100), "1.1\u{00b5}s"),
            (Duration::microseconds(2_200), "2.2ms"),
            (Duration::milliseconds(3_300), "3.3s"),
            (Duration::seconds(4 * 60 + 5), "4m5s"),
            (Duration::milliseconds(4 * 60_000 + 5_001), "4m5.001s"),
            (Duration::minutes(90), "1h30m0s"),
            (Duration::milliseconds(-1500), "-1.5s"),
            (Duration::nanoseconds(i64::MAX), "2562047h47m16.854775807s"),
            (Duration::nanoseconds(i64::MIN), "-2562047h47m16.854775808s"),
        ];

        for (duration, want) in cases {
            assert_eq!(format_duration(duration), want);
        }
    }

    #[test]
    fn test_format_beyond_nanosecond_range() {
        assert_eq!(format_duration(Duration::hours(3_000_000)), "3000000h0m0s");
    }

    proptest! {
        #[test]
        fn test_format_then_parse_is_identity(nanos in any::<i64>()) {
            let duration = Duration::nanoseconds(nanos);
            prop_assert_eq!(parse_duration(&format_duration(duration)), Ok(duration));
        }

        #[test]
        fn test_parse_never_panics(input in "\\PC{0,16}") {
            let _ = parse_duration(&input);
        }
    }
}
