// Timestamps are written as `[[[D:]H:]M:]S.mmm`, least significant field last.
// The part after the dot is a plain millisecond count, so "1.5" is one second
// and five milliseconds, not one and a half seconds.

use serde::{Deserialize, Serialize};

use std::{fmt, str::FromStr};

use crate::error::{SplitError, SplitResult};

const SECOND: u64 = 1000;
const MINUTE: u64 = SECOND * 60;
const HOUR: u64 = MINUTE * 60;
const DAY: u64 = HOUR * 24;

// seconds, minutes, hours, days
const UNITS: [u64; 4] = [SECOND, MINUTE, HOUR, DAY];

const MAX_FRACTION_DIGITS: usize = 3;

/// Converts a `[[[D:]H:]M:]S.mmm` timestamp into milliseconds.
pub fn parse_duration(text: &str) -> SplitResult<u64> {
    let input = text.trim();
    let (main, fraction) = input
        .split_once('.')
        .ok_or_else(|| SplitError::format(text, "missing '.' and millisecond fraction"))?;

    if fraction.len() > MAX_FRACTION_DIGITS {
        return Err(SplitError::format(
            text,
            format!("millisecond fraction has more than {MAX_FRACTION_DIGITS} digits"),
        ));
    }
    let millis = parse_field(text, fraction)?;

    let fields: Vec<&str> = main.split(':').collect();
    if fields.len() > UNITS.len() {
        return Err(SplitError::format(
            text,
            format!("expected at most {} colon-separated fields", UNITS.len()),
        ));
    }

    fields
        .iter()
        .rev()
        .zip(UNITS)
        .try_fold(millis, |total, (field, unit)| {
            parse_field(text, field)?
                .checked_mul(unit)
                .and_then(|value| total.checked_add(value))
                .ok_or_else(|| SplitError::format(text, "value is too large"))
        })
}

fn parse_field(input: &str, field: &str) -> SplitResult<u64> {
    if field.is_empty() {
        return Err(SplitError::format(input, "empty field"));
    }
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SplitError::format(
            input,
            format!("'{field}' is not a number"),
        ));
    }
    field
        .parse::<u64>()
        .map_err(|_| SplitError::format(input, format!("'{field}' is out of range")))
}

/// Converts milliseconds back into `[[[D:]H:]M:]S.mmm`.
///
/// Leading zero fields are dropped, but seconds are always written. Every
/// field after the first is padded to two digits.
pub fn format_duration(ms: u64) -> String {
    let mut rest = ms;
    let mut fields: Vec<u64> = Vec::with_capacity(UNITS.len());
    for (n, unit) in UNITS.iter().enumerate().rev() {
        let value = rest / unit;
        rest %= unit;
        if fields.is_empty() && value == 0 && n > 0 {
            continue;
        }
        fields.push(value);
    }

    let main = fields
        .iter()
        .enumerate()
        .map(|(n, value)| match n {
            0 => value.to_string(),
            _ => format!("{value:02}"),
        })
        .collect::<Vec<_>>()
        .join(":");

    format!("{main}.{rest:03}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn from_millis(ms: u64) -> Self {
        Timestamp(ms)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }
}

impl FromStr for Timestamp {
    type Err = SplitError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_duration(s).map(Timestamp)
    }
}

impl TryFrom<&str> for Timestamp {
    type Error = SplitError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Timestamp {
    type Error = SplitError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timestamp> for String {
    fn from(value: Timestamp) -> Self {
        format_duration(value.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_duration(self.0))
    }
}
