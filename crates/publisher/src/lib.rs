//! Scanpost report publishing.
//!
//! # Module Structure
//!
//! - [`error`]: Publishing errors (`PublisherError`)
//! - [`publisher`]: The `ReportPublisher` trait
//! - [`crate::kafka`]: Kafka implementation (`KafkaPublisher`)

pub mod error;
pub mod kafka;
pub mod publisher;

pub use error::PublisherError;
pub use crate::kafka::KafkaPublisher;
pub use publisher::ReportPublisher;
