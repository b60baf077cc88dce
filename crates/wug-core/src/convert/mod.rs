// ── Schema mapper ──
//
// Pure translation between desired-state records and `wug_api` wire
// types. No I/O. Fields the wire carries as strings are coerced
// explicitly; a value that does not parse is a `CoreError::Mapping`.

mod device;
mod monitor;

use std::fmt::Display;
use std::str::FromStr;

use crate::error::CoreError;

/// Bidirectional mapping between a record and its wire shape.
pub trait SchemaMap: Sized {
    type Wire;

    /// Record → wire. Absent optional fields stay absent.
    fn to_wire(&self) -> Self::Wire;

    /// Wire → record.
    ///
    /// `desired` supplies the attributes the server never echoes back
    /// (template options, the owning device of a monitor).
    fn from_wire(wire: Self::Wire, desired: &Self) -> Result<Self, CoreError>;
}

// ── Coercion helpers ─────────────────────────────────────────────────

/// A field the record requires but the payload left out.
fn required<T>(field: &str, value: Option<T>) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::mapping(field, "missing from response"))
}

/// Parse a number the wire carries as a string.
fn parse_number<T>(field: &str, raw: &str) -> Result<T, CoreError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| CoreError::mapping(field, format!("`{raw}` is not a number ({e})")))
}

fn parse_optional_number<T>(field: &str, raw: Option<&str>) -> Result<Option<T>, CoreError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.map(|s| parse_number(field, s)).transpose()
}

/// Parse a boolean the wire carries as `"true"`/`"false"`.
fn parse_flag(field: &str, raw: &str) -> Result<bool, CoreError> {
    match raw.trim() {
        s if s.eq_ignore_ascii_case("true") => Ok(true),
        s if s.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(CoreError::mapping(
            field,
            format!("`{raw}` is not a boolean"),
        )),
    }
}
