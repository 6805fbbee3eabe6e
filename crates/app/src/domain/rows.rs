//! Row decoding helpers shared by the repositories.
//!
//! Timestamps and dates are stored as ISO 8601 TEXT columns and counters as
//! INTEGER columns; these helpers convert them back to domain types, mapping
//! failures to [`sqlx::Error::ColumnDecode`].

use jiff::{Timestamp, civil::Date};
use sqlx::{Row, sqlite::SqliteRow};

pub(crate) fn try_get_timestamp(row: &SqliteRow, col: &str) -> Result<Timestamp, sqlx::Error> {
    row.try_get::<String, _>(col)?
        .parse::<Timestamp>()
        .map_err(|e| decode_error(col, e))
}

pub(crate) fn try_get_opt_timestamp(
    row: &SqliteRow,
    col: &str,
) -> Result<Option<Timestamp>, sqlx::Error> {
    row.try_get::<Option<String>, _>(col)?
        .map(|value| value.parse::<Timestamp>())
        .transpose()
        .map_err(|e| decode_error(col, e))
}

pub(crate) fn try_get_date(row: &SqliteRow, col: &str) -> Result<Date, sqlx::Error> {
    row.try_get::<String, _>(col)?
        .parse::<Date>()
        .map_err(|e| decode_error(col, e))
}

/// Decode a non-negative counter column (stock, quantity).
pub(crate) fn try_get_counter(row: &SqliteRow, col: &str) -> Result<u32, sqlx::Error> {
    let value: i64 = row.try_get(col)?;

    u32::try_from(value).map_err(|e| decode_error(col, e))
}

/// Decode a monetary amount column.
pub(crate) fn try_get_amount(row: &SqliteRow, col: &str) -> Result<u64, sqlx::Error> {
    let value: i64 = row.try_get(col)?;

    u64::try_from(value).map_err(|e| decode_error(col, e))
}

fn decode_error<E>(col: &str, source: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(source),
    }
}
