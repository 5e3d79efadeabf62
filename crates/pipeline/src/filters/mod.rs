//! Exclusion filters for the candidate pipeline.

pub mod already_consumed;
pub mod own_events;
pub mod profiled;

pub use already_consumed::AlreadyConsumedFilter;
pub use own_events::OwnEventsFilter;
pub use profiled::ProfiledEventFilter;
