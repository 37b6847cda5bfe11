use crate::{error::{Error, Result}, metadata::MetadataValue};

use std::fmt;

pub fn dms_to_dd(deg: f64, min: f64, sec: f64) -> f64 {
    deg + min / 60.0 + sec / 3600.0
}

/// An EXIF rational, wide enough for both the signed and unsigned variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub num: i64,
    pub denom: i64,
}

impl Rational {
    pub const fn new(num: i64, denom: i64) -> Self {
        Rational { num, denom }
    }

    /// Returns `None` when the denominator is zero.
    pub fn to_f64(self) -> Option<f64> {
        if self.denom == 0 {
            None
        } else {
            Some(self.num as f64 / self.denom as f64)
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.denom)
    }
}

impl From<exif::Rational> for Rational {
    fn from(rational: exif::Rational) -> Self {
        Rational::new(rational.num.into(), rational.denom.into())
    }
}

impl From<exif::SRational> for Rational {
    fn from(rational: exif::SRational) -> Self {
        Rational::new(rational.num.into(), rational.denom.into())
    }
}

/// A coordinate as stored by EXIF: degrees, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dms {
    pub degrees: Rational,
    pub minutes: Rational,
    pub seconds: Rational,
}

impl Dms {
    pub const fn new(degrees: Rational, minutes: Rational, seconds: Rational) -> Self {
        Dms { degrees, minutes, seconds }
    }
}

impl TryFrom<&MetadataValue> for Dms {
    type Error = Error;

    fn try_from(value: &MetadataValue) -> Result<Self> {
        match value {
            MetadataValue::Rational(parts) if parts.len() >= 3 => Ok(Dms::new(parts[0], parts[1], parts[2])),
            other => Err(Error::MalformedCoordinate(format!("expected three rationals, found {}", other))),
        }
    }
}

/// The hemisphere letter paired with a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    North,
    South,
    East,
    West,
    Other(char),
}

impl Reference {
    pub fn is_negative(self) -> bool {
        matches!(self, Reference::South | Reference::West)
    }
}

impl From<char> for Reference {
    fn from(c: char) -> Self {
        match c {
            'N' => Reference::North,
            'S' => Reference::South,
            'E' => Reference::East,
            'W' => Reference::West,
            other => Reference::Other(other),
        }
    }
}

/// Any value that doesn't start with a letter, like the empty text some
/// cameras write without a fix, gives `Other('\0')`.
impl From<&MetadataValue> for Reference {
    fn from(value: &MetadataValue) -> Self {
        let first = match value {
            MetadataValue::Text(text) => text.chars().next(),
            MetadataValue::Bytes(bytes) => bytes.first().map(|byte| *byte as char),
            _ => None,
        };

        Reference::from(first.unwrap_or('\0'))
    }
}

/// Signed decimal degrees, negative for South and West.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DecimalDegrees(pub f64);

/// Always keeps a fractional part, so whole degrees print as `40.0`.
impl fmt::Display for DecimalDegrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

fn component(rational: Rational, component: &'static str) -> Result<f64> {
    rational.to_f64().ok_or(Error::ZeroDenominator { component })
}

/// Converts a DMS triple to decimal degrees.
///
/// References other than `N`, `S`, `E` and `W` are kept positive; the
/// caller decides whether to warn about them.
pub fn to_decimal(dms: &Dms, reference: Reference) -> Result<DecimalDegrees> {
    let decimal = dms_to_dd(
        component(dms.degrees, "degrees")?,
        component(dms.minutes, "minutes")?,
        component(dms.seconds, "seconds")?,
    );

    if reference.is_negative() {
        Ok(DecimalDegrees(-decimal))
    } else {
        Ok(DecimalDegrees(decimal))
    }
}
