//! Observability for tagvault
//!
//! - Structured logging (JSON, one line per event)
//! - Typed events
//! - Counters
//!
//! Observability never changes the outcome of an operation.
//!
//! # Usage
//!
//! ```ignore
//! use tagvault::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::TagGroupInserted, &[("taggroup_id", "3")]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log an event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::ConfigLoaded, &[("namespace", "verse.tag_groups")]);
    }
}
