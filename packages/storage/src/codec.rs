// ABOUTME: Serialization boundary between typed records and SQLite columns
// ABOUTME: JSON text blobs for nested arrays, INTEGER 0/1 for boolean flags

use std::str::FromStr;

use dayboard_core::ValidationError;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{sqlite::SqliteRow, Row};

use crate::StorageResult;

/// Encode a nested structure as JSON text for a blob column
pub fn encode_blob<T: Serialize>(value: &T) -> StorageResult<String> {
    Ok(serde_json::to_string(value)?)
}

/// Decode a JSON text blob. NULL and empty text decode to the default value.
pub fn decode_blob<T: DeserializeOwned + Default>(raw: Option<String>) -> StorageResult<T> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(text) => Ok(serde_json::from_str(text)?),
    }
}

/// Read a blob column from a row and decode it
pub fn blob_column<T: DeserializeOwned + Default>(
    row: &SqliteRow,
    column: &str,
) -> StorageResult<T> {
    decode_blob(row.try_get::<Option<String>, _>(column)?)
}

/// Read a 0/1 flag column as a bool. NULL reads as false.
pub fn flag_column(row: &SqliteRow, column: &str) -> StorageResult<bool> {
    let raw: Option<i64> = row.try_get(column)?;
    Ok(raw.unwrap_or(0) != 0)
}

/// Read a wire-enum column. Unknown text is an error rather than a silent default.
pub fn enum_column<T: FromStr<Err = ValidationError>>(
    row: &SqliteRow,
    column: &str,
) -> StorageResult<T> {
    let raw: String = row.try_get(column)?;
    Ok(raw.parse()?)
}

pub fn to_flag(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
