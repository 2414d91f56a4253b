use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

const NANOS_PER_MILLI: i128 = 1_000_000;

///
/// TimestampError
///

#[derive(Debug, ThisError)]
pub enum TimestampError {
    #[error("timestamp {millis}ms is outside the representable calendar range")]
    OutOfRange { millis: i64 },

    #[error("invalid timestamp '{input}': expected RFC 3339 or integer milliseconds")]
    Invalid { input: String },
}

///
/// Timestamp
///
/// Milliseconds since the Unix epoch (UTC).
/// Text form is RFC 3339; instants outside the calendar range fall back to
/// the raw millisecond count, which parses back unchanged.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const EPOCH: Self = Self(0);

    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Format as RFC 3339 in UTC.
    pub fn to_rfc3339(self) -> Result<String, TimestampError> {
        let out_of_range = || TimestampError::OutOfRange { millis: self.0 };

        let nanos = i128::from(self.0) * NANOS_PER_MILLI;
        let datetime = OffsetDateTime::from_unix_timestamp_nanos(nanos).map_err(|_| out_of_range())?;

        datetime.format(&Rfc3339).map_err(|_| out_of_range())
    }

    /// Parse an RFC 3339 instant; sub-millisecond precision is truncated.
    pub fn parse_rfc3339(input: &str) -> Result<Self, TimestampError> {
        let datetime =
            OffsetDateTime::parse(input, &Rfc3339).map_err(|_| TimestampError::Invalid {
                input: input.to_string(),
            })?;

        let millis = datetime.unix_timestamp_nanos().div_euclid(NANOS_PER_MILLI);
        let millis = i64::try_from(millis).map_err(|_| TimestampError::Invalid {
            input: input.to_string(),
        })?;

        Ok(Self(millis))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_rfc3339() {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    // accepts RFC 3339 or a bare (optionally signed) millisecond count
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(millis) = trimmed.parse::<i64>() {
            return Ok(Self(millis));
        }

        Self::parse_rfc3339(trimmed)
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Self(millis)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_formats_as_rfc3339() {
        assert_eq!(
            Timestamp::EPOCH.to_rfc3339().expect("format"),
            "1970-01-01T00:00:00Z"
        );
    }

    #[test]
    fn millis_survive_text_round_trip() {
        for millis in [0, 1, 999, 1_700_000_000_123, -86_400_001] {
            let ts = Timestamp::from_millis(millis);
            let parsed: Timestamp = ts.to_string().parse().expect("parse");
            assert_eq!(parsed, ts, "round trip for {millis}");
        }
    }

    #[test]
    fn out_of_range_falls_back_to_millis() {
        let ts = Timestamp::from_millis(i64::MAX);

        assert!(ts.to_rfc3339().is_err());
        assert_eq!(ts.to_string(), i64::MAX.to_string());
        assert_eq!(ts.to_string().parse::<Timestamp>().expect("parse"), ts);
    }

    #[test]
    fn parses_offsets_into_utc() {
        let ts: Timestamp = "1970-01-01T01:00:00+01:00".parse().expect("parse");
        assert_eq!(ts, Timestamp::EPOCH);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            "yesterday".parse::<Timestamp>(),
            Err(TimestampError::Invalid { .. })
        ));
    }
}
