//! Cursor-based pagination for append-only logs keyed by `(created_at, id)`.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Default page size for cursor listings.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 200;

/// Error type for cursor operations.
#[derive(Debug, Error)]
pub enum CursorError {
    #[error("Invalid cursor format")]
    InvalidFormat,
    #[error("Invalid cursor encoding")]
    InvalidEncoding,
    #[error("Invalid timestamp in cursor")]
    InvalidTimestamp,
    #[error("Invalid ID in cursor")]
    InvalidId,
}

/// Encodes a cursor as `base64(RFC3339_timestamp|uuid)`.
///
/// The id breaks ties between rows written in the same microsecond.
pub fn encode_cursor(created_at: DateTime<Utc>, id: Uuid) -> String {
    let raw = format!(
        "{}|{}",
        created_at.to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
        id
    );
    URL_SAFE_NO_PAD.encode(raw.as_bytes())
}

/// Decodes a cursor into `(timestamp, id)`.
pub fn decode_cursor(cursor: &str) -> Result<(DateTime<Utc>, Uuid), CursorError> {
    let decoded = URL_SAFE_NO_PAD
        .decode(cursor)
        .map_err(|_| CursorError::InvalidEncoding)?;
    let s = String::from_utf8(decoded).map_err(|_| CursorError::InvalidFormat)?;

    let (timestamp_str, id_str) = s.split_once('|').ok_or(CursorError::InvalidFormat)?;

    let id = Uuid::parse_str(id_str).map_err(|_| CursorError::InvalidId)?;
    let timestamp = DateTime::parse_from_rfc3339(timestamp_str)
        .map_err(|_| CursorError::InvalidTimestamp)?
        .with_timezone(&Utc);

    Ok((timestamp, id))
}

/// Clamps a requested page size into `1..=MAX_PAGE_SIZE`.
pub fn clamp_page_size(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_cursor_preserves_microseconds_and_id() {
        let timestamp = Utc
            .with_ymd_and_hms(2025, 3, 9, 18, 0, 5)
            .unwrap()
            .with_nanosecond(250_000)
            .unwrap();
        let id = Uuid::new_v4();

        let (decoded_ts, decoded_id) = decode_cursor(&encode_cursor(timestamp, id)).unwrap();

        assert_eq!(decoded_ts.timestamp_micros(), timestamp.timestamp_micros());
        assert_eq!(decoded_id, id);
    }

    #[test]
    fn test_cursor_is_url_safe() {
        let cursor = encode_cursor(Utc::now(), Uuid::new_v4());
        assert!(!cursor.contains('+') && !cursor.contains('/') && !cursor.contains('='));
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            decode_cursor("***"),
            Err(CursorError::InvalidEncoding)
        ));
        assert!(matches!(
            decode_cursor(&URL_SAFE_NO_PAD.encode(b"no-separator")),
            Err(CursorError::InvalidFormat)
        ));
        assert!(matches!(
            decode_cursor(&URL_SAFE_NO_PAD.encode(b"2025-01-01T00:00:00Z|not-a-uuid")),
            Err(CursorError::InvalidId)
        ));
        let bad_ts = format!("yesterday|{}", Uuid::nil());
        assert!(matches!(
            decode_cursor(&URL_SAFE_NO_PAD.encode(bad_ts.as_bytes())),
            Err(CursorError::InvalidTimestamp)
        ));
    }

    #[test]
    fn test_clamp_page_size() {
        assert_eq!(clamp_page_size(None), DEFAULT_PAGE_SIZE);
        assert_eq!(clamp_page_size(Some(0)), 1);
        assert_eq!(clamp_page_size(Some(10)), 10);
        assert_eq!(clamp_page_size(Some(10_000)), MAX_PAGE_SIZE);
    }
}
