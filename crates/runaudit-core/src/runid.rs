//! Timestamp extraction from workflow run identifiers.
//!
//! Run ids follow the convention `<trigger>__<date>[.<fraction>-<suffix>]`,
//! e.g. `manual__2023-02-13T131127.5671880000-27f960c46`. The embedded date
//! is the run's logical event time, which is preferred over the wall clock
//! when stamping the record.

use chrono::NaiveDateTime;

/// Date format of the run-id segment, e.g. `2023-02-13T131127`.
const RUN_ID_DATE_FORMAT: &str = "%Y-%m-%dT%H%M%S";

/// Wire format for the record timestamp, e.g. `2023-02-13T13:11:27Z`.
const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Extract the literal date segment from a run id.
///
/// Returns `None` when the id has no `__` separator or the segment does not
/// parse as a date of the expected shape.
pub fn extract_run_date(run_id: &str) -> Option<&str> {
    let (_, rest) = run_id.split_once("__")?;
    let date = rest.split('.').next()?;
    NaiveDateTime::parse_from_str(date, RUN_ID_DATE_FORMAT).ok()?;
    Some(date)
}

/// The run id's embedded date reformatted to the wire format, if present.
pub fn run_timestamp(run_id: &str) -> Option<String> {
    let date = extract_run_date(run_id)?;
    let parsed = NaiveDateTime::parse_from_str(date, RUN_ID_DATE_FORMAT).ok()?;
    Some(parsed.format(WIRE_FORMAT).to_string())
}
