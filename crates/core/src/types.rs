/// Content item identifiers are assigned by the backend and may be negative.
pub type ItemId = i64;

/// Display duration of a zone or content item, in seconds.
pub type Seconds = u32;
