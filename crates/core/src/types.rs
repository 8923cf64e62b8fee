/// Primary keys are the numeric ids taken from upstream resource URLs.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
