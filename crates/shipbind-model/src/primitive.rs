//! Primitive kinds and scalar values carried by typed nodes.
//!
//! Date and time values keep the zone information exactly as it appeared on
//! the wire: a fixed UTC offset, or none at all for zone-naive values.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use rust_decimal::Decimal;

/// The XML-Schema-like primitive a scalar field is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `xs:string` and its derivations.
    String,
    /// `xs:integer` family, held as `i64`.
    Integer,
    /// `xs:float`.
    Float,
    /// `xs:decimal`, arbitrary precision.
    Decimal,
    /// `xs:double`.
    Double,
    /// `xs:boolean`.
    Boolean,
    /// `xs:base64Binary`.
    Base64,
    /// `xs:date`.
    Date,
    /// `xs:time`.
    Time,
    /// `xs:dateTime`.
    DateTime,
}

impl PrimitiveKind {
    /// Returns the schema name of this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Base64 => "base64Binary",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "dateTime",
        }
    }

    /// Returns `true` for kinds with a numeric value space.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Integer | Self::Float | Self::Decimal | Self::Double
        )
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An `xs:date` value with an optional fixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XsDate {
    /// Calendar date.
    pub date: NaiveDate,
    /// Zone offset; `None` for zone-naive values.
    pub offset: Option<FixedOffset>,
}

impl XsDate {
    /// Creates a zone-naive date.
    #[must_use]
    pub fn naive(date: NaiveDate) -> Self {
        Self { date, offset: None }
    }

    /// Creates a date carrying a fixed offset.
    #[must_use]
    pub fn with_offset(date: NaiveDate, offset: FixedOffset) -> Self {
        Self {
            date,
            offset: Some(offset),
        }
    }
}

/// An `xs:time` value with an optional fixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XsTime {
    /// Wall-clock time.
    pub time: NaiveTime,
    /// Zone offset; `None` for zone-naive values.
    pub offset: Option<FixedOffset>,
}

impl XsTime {
    /// Creates a zone-naive time.
    #[must_use]
    pub fn naive(time: NaiveTime) -> Self {
        Self { time, offset: None }
    }

    /// Creates a time carrying a fixed offset.
    #[must_use]
    pub fn with_offset(time: NaiveTime, offset: FixedOffset) -> Self {
        Self {
            time,
            offset: Some(offset),
        }
    }
}

/// An `xs:dateTime` value with an optional fixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XsDateTime {
    /// Local date and time as written on the wire.
    pub datetime: NaiveDateTime,
    /// Zone offset; `None` for zone-naive values.
    pub offset: Option<FixedOffset>,
}

impl XsDateTime {
    /// Creates a zone-naive date-time.
    #[must_use]
    pub fn naive(datetime: NaiveDateTime) -> Self {
        Self {
            datetime,
            offset: None,
        }
    }

    /// Creates a date-time carrying a fixed offset.
    #[must_use]
    pub fn with_offset(datetime: NaiveDateTime, offset: FixedOffset) -> Self {
        Self {
            datetime,
            offset: Some(offset),
        }
    }

    /// Returns the zoned instant, or `None` for a zone-naive value.
    #[must_use]
    pub fn to_fixed(&self) -> Option<DateTime<FixedOffset>> {
        self.offset
            .and_then(|offset| offset.from_local_datetime(&self.datetime).single())
    }
}

impl From<DateTime<FixedOffset>> for XsDateTime {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::with_offset(dt.naive_local(), *dt.offset())
    }
}

/// A parsed primitive value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// String value (unescaped).
    String(String),
    /// Integer value.
    Integer(i64),
    /// Float value.
    Float(f64),
    /// Decimal value.
    Decimal(Decimal),
    /// Double value.
    Double(f64),
    /// Boolean value.
    Boolean(bool),
    /// Decoded base64 payload.
    Base64(Vec<u8>),
    /// Date value.
    Date(XsDate),
    /// Time value.
    Time(XsTime),
    /// Date-time value.
    DateTime(XsDateTime),
    /// Items of an XSD list type.
    List(Vec<Scalar>),
}

impl Scalar {
    /// Returns the primitive kind of this value.
    ///
    /// A list reports the kind of its first item, or `String` when empty.
    #[must_use]
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::String(_) => PrimitiveKind::String,
            Self::Integer(_) => PrimitiveKind::Integer,
            Self::Float(_) => PrimitiveKind::Float,
            Self::Decimal(_) => PrimitiveKind::Decimal,
            Self::Double(_) => PrimitiveKind::Double,
            Self::Boolean(_) => PrimitiveKind::Boolean,
            Self::Base64(_) => PrimitiveKind::Base64,
            Self::Date(_) => PrimitiveKind::Date,
            Self::Time(_) => PrimitiveKind::Time,
            Self::DateTime(_) => PrimitiveKind::DateTime,
            Self::List(items) => items.first().map_or(PrimitiveKind::String, Self::kind),
        }
    }

    /// Returns the string if this is a `String` variant.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Integer` variant.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the decimal if this is a `Decimal` variant.
    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the floating point value of a `Float` or `Double` variant.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) | Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the boolean if this is a `Boolean` variant.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the bytes if this is a `Base64` variant.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Base64(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the date if this is a `Date` variant.
    #[must_use]
    pub fn as_date(&self) -> Option<&XsDate> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the time if this is a `Time` variant.
    #[must_use]
    pub fn as_time(&self) -> Option<&XsTime> {
        match self {
            Self::Time(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the date-time if this is a `DateTime` variant.
    #[must_use]
    pub fn as_datetime(&self) -> Option<&XsDateTime> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Returns the items if this is a `List` variant.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Decimal> for Scalar {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

impl From<XsDate> for Scalar {
    fn from(d: XsDate) -> Self {
        Self::Date(d)
    }
}

impl From<XsTime> for Scalar {
    fn from(t: XsTime) -> Self {
        Self::Time(t)
    }
}

impl From<XsDateTime> for Scalar {
    fn from(dt: XsDateTime) -> Self {
        Self::DateTime(dt)
    }
}
