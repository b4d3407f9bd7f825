//! Primitive codec: text to scalar values and back.
//!
//! Parsing follows the XML Schema lexical spaces the carrier payloads use.
//! Numeric and boolean parsers trim surrounding whitespace; string parsing
//! keeps text as is. `validate_*` re-parses the formatted value, so a value
//! that validates always survives an export round trip.
//!
//! Date and time values use `YYYY-MM-DD[THH:MM:SS[.fraction]][Z|±HH:MM]`.
//! Offsets are limited to `±00:00` through `±13:59` and `±14:00`.

use std::str::FromStr;
use std::sync::LazyLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{Datelike, FixedOffset, NaiveDate, NaiveTime, Timelike};
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use shipbind_model::{Facets, PrimitiveKind, Scalar, SimpleType, XsDate, XsDateTime, XsTime};

use crate::error::PrimitiveError;

static OFFSET_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)(Z|[+-](?:(?:0\d|1[0-3]):[0-5]\d|14:00))?$").expect("valid offset regex")
});

static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?\d{4,})-(\d{2})-(\d{2})$").expect("valid date regex"));

static TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2}):(\d{2}):(\d{2})(?:\.(\d+))?$").expect("valid time regex")
});

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)$").expect("valid decimal regex"));

static FLOATING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?$").expect("valid double regex")
});

// ---------------------------------------------------------------------------
// String
// ---------------------------------------------------------------------------

/// Parses a string. Absent or empty input yields an empty string.
#[must_use]
pub fn parse_string(text: Option<&str>) -> String {
    text.unwrap_or_default().to_owned()
}

/// Validates a string. Every string is valid.
pub fn validate_string(value: String) -> Result<String, PrimitiveError> {
    Ok(value)
}

/// Formats a string. Escaping is left to the writer.
#[must_use]
pub fn format_string(value: &str) -> String {
    value.to_owned()
}

// ---------------------------------------------------------------------------
// Integer
// ---------------------------------------------------------------------------

/// Parses an integer.
pub fn parse_integer(text: &str) -> Result<i64, PrimitiveError> {
    let trimmed = text.trim();
    trimmed.parse::<i64>().map_err(|e| {
        PrimitiveError::new(
            PrimitiveKind::Integer,
            trimmed,
            format!("requires integer value: {e}"),
        )
    })
}

/// Validates an integer by re-parsing its formatted form.
pub fn validate_integer(value: i64) -> Result<i64, PrimitiveError> {
    parse_integer(&format_integer(value))
}

/// Formats an integer.
#[must_use]
pub fn format_integer(value: i64) -> String {
    value.to_string()
}

// ---------------------------------------------------------------------------
// Decimal
// ---------------------------------------------------------------------------

/// Parses a decimal.
pub fn parse_decimal(text: &str) -> Result<Decimal, PrimitiveError> {
    let trimmed = text.trim();
    if !DECIMAL.is_match(trimmed) {
        return Err(PrimitiveError::new(
            PrimitiveKind::Decimal,
            trimmed,
            "requires decimal value",
        ));
    }
    let mut normalized = trimmed.strip_prefix('+').unwrap_or(trimmed).to_owned();
    if normalized.ends_with('.') {
        normalized.push('0');
    }
    if let Some(rest) = normalized.strip_prefix("-.") {
        normalized = format!("-0.{rest}");
    } else if let Some(rest) = normalized.strip_prefix('.') {
        normalized = format!("0.{rest}");
    }
    Decimal::from_str(&normalized).map_err(|e| {
        PrimitiveError::new(
            PrimitiveKind::Decimal,
            trimmed,
            format!("decimal out of range: {e}"),
        )
    })
}

/// Validates a decimal by re-parsing its formatted form.
pub fn validate_decimal(value: Decimal) -> Result<Decimal, PrimitiveError> {
    parse_decimal(&format_decimal(value))
}

/// Formats a decimal without trailing zeros or a trailing point.
#[must_use]
pub fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

// ---------------------------------------------------------------------------
// Float and double
// ---------------------------------------------------------------------------

fn parse_floating(kind: PrimitiveKind, text: &str) -> Result<f64, PrimitiveError> {
    let trimmed = text.trim();
    match trimmed {
        "INF" | "+INF" => return Ok(f64::INFINITY),
        "-INF" => return Ok(f64::NEG_INFINITY),
        "NaN" => return Ok(f64::NAN),
        _ => {}
    }
    if !FLOATING.is_match(trimmed) {
        return Err(PrimitiveError::new(
            kind,
            trimmed,
            format!("requires {kind} value"),
        ));
    }
    trimmed
        .parse::<f64>()
        .map_err(|e| PrimitiveError::new(kind, trimmed, format!("requires {kind} value: {e}")))
}

fn format_special(value: f64) -> Option<String> {
    if value.is_nan() {
        Some("NaN".to_owned())
    } else if value.is_infinite() {
        Some(if value > 0.0 { "INF" } else { "-INF" }.to_owned())
    } else {
        None
    }
}

/// Parses a float. Values are held at double precision.
pub fn parse_float(text: &str) -> Result<f64, PrimitiveError> {
    parse_floating(PrimitiveKind::Float, text)
}

/// Validates a float by re-parsing its formatted form.
pub fn validate_float(value: f64) -> Result<f64, PrimitiveError> {
    parse_float(&format_float(value))
}

/// Formats a float in fixed notation with 15 fractional digits, then strips
/// trailing zeros and a trailing point.
#[must_use]
pub fn format_float(value: f64) -> String {
    if let Some(special) = format_special(value) {
        return special;
    }
    let fixed = format!("{value:.15}");
    let stripped = fixed.trim_end_matches('0').trim_end_matches('.');
    if stripped == "-0" {
        "0".to_owned()
    } else {
        stripped.to_owned()
    }
}

/// Parses a double. `INF`, `-INF` and `NaN` are accepted.
pub fn parse_double(text: &str) -> Result<f64, PrimitiveError> {
    parse_floating(PrimitiveKind::Double, text)
}

/// Validates a double by re-parsing its formatted form.
pub fn validate_double(value: f64) -> Result<f64, PrimitiveError> {
    parse_double(&format_double(value))
}

/// Formats a double in general notation: the shortest representation that
/// parses back to the same value, in exponent form for very large or very
/// small magnitudes.
#[must_use]
pub fn format_double(value: f64) -> String {
    if let Some(special) = format_special(value) {
        return special;
    }
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-5..1e16).contains(&magnitude) {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}

// ---------------------------------------------------------------------------
// Boolean
// ---------------------------------------------------------------------------

/// Parses a boolean: `true`/`1` or `false`/`0`.
pub fn parse_boolean(text: &str) -> Result<bool, PrimitiveError> {
    match text.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(PrimitiveError::new(
            PrimitiveKind::Boolean,
            other,
            "requires boolean value (one of true, 1, false, 0)",
        )),
    }
}

/// Validates a boolean. Every boolean is valid.
pub fn validate_boolean(value: bool) -> Result<bool, PrimitiveError> {
    parse_boolean(&format_boolean(value))
}

/// Formats a boolean as `true` or `false`.
#[must_use]
pub fn format_boolean(value: bool) -> String {
    if value { "true" } else { "false" }.to_owned()
}

// ---------------------------------------------------------------------------
// Base64
// ---------------------------------------------------------------------------

/// Decodes base64 text, ignoring embedded whitespace.
pub fn parse_base64(text: &str) -> Result<Vec<u8>, PrimitiveError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD.decode(compact.as_bytes()).map_err(|e| {
        PrimitiveError::new(
            PrimitiveKind::Base64,
            text.trim(),
            format!("requires base64 encoded binary value: {e}"),
        )
    })
}

/// Validates base64 content by re-decoding its encoded form.
pub fn validate_base64(value: Vec<u8>) -> Result<Vec<u8>, PrimitiveError> {
    parse_base64(&format_base64(&value))
}

/// Encodes bytes with the standard base64 alphabet.
#[must_use]
pub fn format_base64(value: &[u8]) -> String {
    STANDARD.encode(value)
}

// ---------------------------------------------------------------------------
// Date and time
// ---------------------------------------------------------------------------

fn split_offset(
    kind: PrimitiveKind,
    text: &str,
) -> Result<(String, Option<FixedOffset>), PrimitiveError> {
    let invalid = || PrimitiveError::new(kind, text, format!("requires {kind} value"));
    let caps = OFFSET_SUFFIX.captures(text).ok_or_else(invalid)?;
    let base = caps.get(1).map_or("", |m| m.as_str()).to_owned();
    let Some(zone) = caps.get(2).map(|m| m.as_str()) else {
        return Ok((base, None));
    };
    if zone == "Z" {
        return Ok((base, FixedOffset::east_opt(0)));
    }
    let sign = if zone.starts_with('-') { -1 } else { 1 };
    let hours: i32 = zone[1..3].parse().map_err(|_| invalid())?;
    let minutes: i32 = zone[4..6].parse().map_err(|_| invalid())?;
    let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)?;
    Ok((base, Some(offset)))
}

fn date_part(kind: PrimitiveKind, original: &str, text: &str) -> Result<NaiveDate, PrimitiveError> {
    let invalid = |reason: &str| PrimitiveError::new(kind, original, reason.to_owned());
    let caps = DATE
        .captures(text)
        .ok_or_else(|| invalid("requires YYYY-MM-DD date"))?;
    let year: i32 = caps[1].parse().map_err(|_| invalid("year out of range"))?;
    let month: u32 = caps[2].parse().map_err(|_| invalid("invalid month"))?;
    let day: u32 = caps[3].parse().map_err(|_| invalid("invalid day"))?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid("no such calendar date"))
}

fn time_part(kind: PrimitiveKind, original: &str, text: &str) -> Result<NaiveTime, PrimitiveError> {
    let invalid = |reason: &str| PrimitiveError::new(kind, original, reason.to_owned());
    let caps = TIME
        .captures(text)
        .ok_or_else(|| invalid("requires HH:MM:SS[.fraction] time"))?;
    let hour: u32 = caps[1].parse().map_err(|_| invalid("invalid hour"))?;
    let minute: u32 = caps[2].parse().map_err(|_| invalid("invalid minute"))?;
    let second: u32 = caps[3].parse().map_err(|_| invalid("invalid second"))?;
    let nanos = match caps.get(4) {
        Some(fraction) => {
            let digits: String = fraction.as_str().chars().take(9).collect();
            let padded = format!("{digits:0<9}");
            padded
                .parse::<u32>()
                .map_err(|_| invalid("invalid fraction"))?
        }
        None => 0,
    };
    if second > 59 {
        return Err(invalid("invalid second"));
    }
    NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
        .ok_or_else(|| invalid("time out of range"))
}

// Years past 9999 carry no `+` sign, unlike chrono's `%Y`.
fn format_ymd(date: NaiveDate) -> String {
    let year = date.year();
    let sign = if year < 0 { "-" } else { "" };
    format!(
        "{sign}{:04}-{:02}-{:02}",
        year.unsigned_abs(),
        date.month(),
        date.day()
    )
}

fn format_time_of_day(time: NaiveTime) -> String {
    let mut out = format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    );
    let nanos = time.nanosecond() % 1_000_000_000;
    if nanos != 0 {
        let fraction = format!("{nanos:09}");
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}

fn format_offset(offset: Option<FixedOffset>) -> String {
    let Some(offset) = offset else {
        return String::new();
    };
    let total_minutes = offset.local_minus_utc() / 60;
    if total_minutes == 0 {
        return "Z".to_owned();
    }
    let sign = if total_minutes < 0 { '-' } else { '+' };
    let abs = total_minutes.abs();
    format!("{sign}{:02}:{:02}", abs / 60, abs % 60)
}

/// Parses an `xs:date`.
pub fn parse_date(text: &str) -> Result<XsDate, PrimitiveError> {
    let trimmed = text.trim();
    let (base, offset) = split_offset(PrimitiveKind::Date, trimmed)?;
    let date = date_part(PrimitiveKind::Date, trimmed, &base)?;
    Ok(XsDate { date, offset })
}

/// Validates a date by re-parsing its formatted form.
pub fn validate_date(value: XsDate) -> Result<XsDate, PrimitiveError> {
    parse_date(&format_date(&value))
}

/// Formats an `xs:date`.
#[must_use]
pub fn format_date(value: &XsDate) -> String {
    format!(
        "{}{}",
        format_ymd(value.date),
        format_offset(value.offset)
    )
}

/// Parses an `xs:time`.
pub fn parse_time(text: &str) -> Result<XsTime, PrimitiveError> {
    let trimmed = text.trim();
    let (base, offset) = split_offset(PrimitiveKind::Time, trimmed)?;
    let time = time_part(PrimitiveKind::Time, trimmed, &base)?;
    Ok(XsTime { time, offset })
}

/// Validates a time by re-parsing its formatted form.
pub fn validate_time(value: XsTime) -> Result<XsTime, PrimitiveError> {
    parse_time(&format_time(&value))
}

/// Formats an `xs:time`, omitting a zero fraction.
#[must_use]
pub fn format_time(value: &XsTime) -> String {
    format!(
        "{}{}",
        format_time_of_day(value.time),
        format_offset(value.offset)
    )
}

/// Parses an `xs:dateTime`.
pub fn parse_datetime(text: &str) -> Result<XsDateTime, PrimitiveError> {
    let trimmed = text.trim();
    let (base, offset) = split_offset(PrimitiveKind::DateTime, trimmed)?;
    let Some((date, time)) = base.split_once('T') else {
        return Err(PrimitiveError::new(
            PrimitiveKind::DateTime,
            trimmed,
            "requires YYYY-MM-DDTHH:MM:SS date-time",
        ));
    };
    let date = date_part(PrimitiveKind::DateTime, trimmed, date)?;
    let time = time_part(PrimitiveKind::DateTime, trimmed, time)?;
    Ok(XsDateTime {
        datetime: date.and_time(time),
        offset,
    })
}

/// Validates a date-time by re-parsing its formatted form.
pub fn validate_datetime(value: XsDateTime) -> Result<XsDateTime, PrimitiveError> {
    parse_datetime(&format_datetime(&value))
}

/// Formats an `xs:dateTime`, omitting a zero fraction.
#[must_use]
pub fn format_datetime(value: &XsDateTime) -> String {
    format!(
        "{}T{}{}",
        format_ymd(value.datetime.date()),
        format_time_of_day(value.datetime.time()),
        format_offset(value.offset)
    )
}

// ---------------------------------------------------------------------------
// Dynamic dispatch and lists
// ---------------------------------------------------------------------------

/// Parses one value of `kind`.
pub fn parse_primitive(kind: PrimitiveKind, text: &str) -> Result<Scalar, PrimitiveError> {
    Ok(match kind {
        PrimitiveKind::String => Scalar::String(parse_string(Some(text))),
        PrimitiveKind::Integer => Scalar::Integer(parse_integer(text)?),
        PrimitiveKind::Float => Scalar::Float(parse_float(text)?),
        PrimitiveKind::Decimal => Scalar::Decimal(parse_decimal(text)?),
        PrimitiveKind::Double => Scalar::Double(parse_double(text)?),
        PrimitiveKind::Boolean => Scalar::Boolean(parse_boolean(text)?),
        PrimitiveKind::Base64 => Scalar::Base64(parse_base64(text)?),
        PrimitiveKind::Date => Scalar::Date(parse_date(text)?),
        PrimitiveKind::Time => Scalar::Time(parse_time(text)?),
        PrimitiveKind::DateTime => Scalar::DateTime(parse_datetime(text)?),
    })
}

/// Parses a whitespace-separated list of `kind` items.
pub fn parse_list(kind: PrimitiveKind, text: &str) -> Result<Vec<Scalar>, PrimitiveError> {
    text.split_ascii_whitespace()
        .map(|item| parse_primitive(kind, item))
        .collect()
}

/// Formats list items separated by single spaces.
#[must_use]
pub fn format_list(items: &[Scalar]) -> String {
    items
        .iter()
        .map(format_scalar)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses text according to a declared simple type.
pub fn parse_scalar(simple_type: &SimpleType, text: &str) -> Result<Scalar, PrimitiveError> {
    if simple_type.list {
        parse_list(simple_type.kind, text).map(Scalar::List)
    } else {
        parse_primitive(simple_type.kind, text)
    }
}

/// Checks that a value has the declared type and survives formatting.
pub fn validate_scalar(simple_type: &SimpleType, value: &Scalar) -> Result<(), PrimitiveError> {
    let mismatch = |found: PrimitiveKind| {
        PrimitiveError::new(
            simple_type.kind,
            format_scalar(value),
            format!("value has kind {found}"),
        )
    };
    match (simple_type.list, value) {
        (true, Scalar::List(items)) => {
            if let Some(item) = items.iter().find(|i| i.kind() != simple_type.kind) {
                return Err(mismatch(item.kind()));
            }
        }
        (true, other) => {
            return Err(PrimitiveError::new(
                simple_type.kind,
                format_scalar(other),
                "requires a list value",
            ));
        }
        (false, Scalar::List(_)) => {
            return Err(PrimitiveError::new(
                simple_type.kind,
                format_scalar(value),
                "list given for a single value",
            ));
        }
        (false, other) if other.kind() != simple_type.kind => {
            return Err(mismatch(other.kind()));
        }
        (false, _) => {}
    }
    parse_scalar(simple_type, &format_scalar(value)).map(|_| ())
}

/// Formats any scalar with its canonical lexical form.
#[must_use]
pub fn format_scalar(value: &Scalar) -> String {
    match value {
        Scalar::String(s) => format_string(s),
        Scalar::Integer(i) => format_integer(*i),
        Scalar::Float(f) => format_float(*f),
        Scalar::Decimal(d) => format_decimal(*d),
        Scalar::Double(d) => format_double(*d),
        Scalar::Boolean(b) => format_boolean(*b),
        Scalar::Base64(bytes) => format_base64(bytes),
        Scalar::Date(d) => format_date(d),
        Scalar::Time(t) => format_time(t),
        Scalar::DateTime(dt) => format_datetime(dt),
        Scalar::List(items) => format_list(items),
    }
}

// ---------------------------------------------------------------------------
// Facets
// ---------------------------------------------------------------------------

fn numeric_value(value: &Scalar) -> Option<f64> {
    match value {
        #[allow(clippy::cast_precision_loss)]
        Scalar::Integer(i) => Some(*i as f64),
        Scalar::Decimal(d) => d.to_f64(),
        Scalar::Float(v) | Scalar::Double(v) => Some(*v),
        _ => None,
    }
}

fn value_length(value: &Scalar, lexical: &str) -> usize {
    match value {
        Scalar::List(items) => items.len(),
        Scalar::Base64(bytes) => bytes.len(),
        _ => lexical.chars().count(),
    }
}

/// Checks a parsed value against restriction facets.
///
/// Returns one human-readable message per violated facet. `lexical` is the
/// text the value was parsed from.
#[must_use]
pub fn check_facets(facets: &Facets, lexical: &str, value: &Scalar) -> Vec<String> {
    let mut violations = Vec::new();
    if facets.is_empty() {
        return violations;
    }
    let lexical = if value.kind() == PrimitiveKind::String {
        lexical
    } else {
        lexical.trim()
    };

    if !facets.enumeration.is_empty() && !facets.enumeration.iter().any(|v| *v == lexical) {
        violations.push(format!(
            "value \"{lexical}\" does not match enumeration restriction [{}]",
            facets.enumeration.join(", ")
        ));
    }

    for pattern in facets.patterns {
        match Regex::new(&format!("^(?:{pattern})$")) {
            Ok(re) if re.is_match(lexical) => {}
            Ok(_) => violations.push(format!(
                "value \"{lexical}\" does not match pattern restriction {pattern}"
            )),
            Err(e) => violations.push(format!("pattern restriction {pattern} is invalid: {e}")),
        }
    }

    let length = value_length(value, lexical);
    if let Some(min) = facets.min_length.filter(|min| length < *min) {
        violations.push(format!(
            "value \"{lexical}\" has length {length}, less than minimum length {min}"
        ));
    }
    if let Some(max) = facets.max_length.filter(|max| length > *max) {
        violations.push(format!(
            "value \"{lexical}\" has length {length}, greater than maximum length {max}"
        ));
    }

    let numbers: Vec<f64> = match value {
        Scalar::List(items) => items.iter().filter_map(numeric_value).collect(),
        other => numeric_value(other).into_iter().collect(),
    };
    for number in numbers {
        if let Some(min) = facets.min_inclusive.filter(|min| number < *min) {
            violations.push(format!("value {number} is less than minimum {min}"));
        }
        if let Some(max) = facets.max_inclusive.filter(|max| number > *max) {
            violations.push(format!("value {number} is greater than maximum {max}"));
        }
    }

    violations
}
