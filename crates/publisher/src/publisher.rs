//! Report publishing abstraction for testability.
//!
//! The [`ReportPublisher`] trait hides the message-queue client so the relay
//! pipeline can be exercised with an in-memory publisher in tests while
//! production code uses [`KafkaPublisher`](crate::KafkaPublisher).
//!
//! ```text
//!   relay ──► ReportPublisher (trait)
//!                 │        │
//!                 ▼        ▼
//!          KafkaPublisher  in-memory (tests)
//!                 │
//!                 ▼
//!           Kafka brokers
//! ```

use crate::error::PublisherError;

/// Sends one encoded report to a fixed destination.
///
/// Implementations own their network resources and release them on drop, so
/// a publisher going out of scope (including on an early `?` return) closes
/// its connections.
pub trait ReportPublisher {
    /// Destination topic.
    fn topic(&self) -> &str;

    /// Sends a single message and blocks until the client reports the outcome.
    ///
    /// There is no retry: an error here is final for the current run.
    ///
    /// # Errors
    ///
    /// Returns `PublisherError::Send` if the broker rejects the message or the
    /// connection fails.
    fn publish(&mut self, key: Option<&[u8]>, payload: &[u8]) -> Result<(), PublisherError>;
}
