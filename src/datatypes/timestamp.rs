// ABOUTME: Parses the service centre timestamp reported in +CMGL listing headers
// ABOUTME: Discards the modem's timezone suffix and yields a naive local date-time

use chrono::NaiveDateTime;
use std::fmt;

/// chrono format of a `+CMGL` timestamp once the zone suffix is removed.
pub const TIMESTAMP_FORMAT: &str = "%y/%m/%d,%H:%M:%S";

/// Length of the quarter-hour timezone suffix, e.g. `+08` or `-04`.
const ZONE_SUFFIX_LEN: usize = 3;

/// Parse a modem timestamp of the form `YY/MM/DD,HH:MM:SS±ZZ`.
///
/// Many modems report UTC while labelling it as local time, so the zone
/// suffix is dropped without conversion and the result is naive.
///
/// ```
/// use sms_modem::datatypes::parse_timestamp;
///
/// let ts = parse_timestamp("21/05/01,14:30:00+08").unwrap();
/// assert_eq!(ts.to_string(), "2021-05-01 14:30:00");
/// ```
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, TimestampError> {
    if raw.len() <= ZONE_SUFFIX_LEN || !raw.is_ascii() {
        return Err(TimestampError::Malformed(raw.to_string()));
    }

    let local = &raw[..raw.len() - ZONE_SUFFIX_LEN];
    NaiveDateTime::parse_from_str(local, TIMESTAMP_FORMAT)
        .map_err(|source| TimestampError::Parse {
            raw: raw.to_string(),
            source,
        })
}

/// Errors that can occur when reading a modem timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// Too short to carry a zone suffix, or not ASCII
    Malformed(String),
    /// Date part does not match `YY/MM/DD,HH:MM:SS`
    Parse {
        raw: String,
        source: chrono::ParseError,
    },
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampError::Malformed(raw) => write!(f, "Malformed modem timestamp '{raw}'"),
            TimestampError::Parse { raw, source } => {
                write!(f, "Invalid modem timestamp '{raw}': {source}")
            }
        }
    }
}

impl std::error::Error for TimestampError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TimestampError::Parse { source, .. } => Some(source),
            TimestampError::Malformed(_) => None,
        }
    }
}
