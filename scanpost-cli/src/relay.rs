//! Report relay: read, decode, re-encode, publish.
//!
//! The steps run strictly in order and any failure ends the run:
//!
//! 1. read the input stream to EOF
//! 2. decode it as a [`Report`]
//! 3. re-encode the report as compact JSON
//! 4. connect the publisher and send one message
//!
//! The publisher is created and dropped inside a blocking task, so its
//! connections are released whether the send succeeds or not. A decode or
//! encode failure returns before any connection is attempted.

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info};

use scanpost_core::report::Report;
use scanpost_publisher::{PublisherError, ReportPublisher};

use crate::error::CliError;

/// Reads a report from `input`, publishes it, and returns the decoded report.
///
/// `connect` is called at most once, after the report has been decoded and
/// re-encoded.
pub async fn relay<R, C, P>(
    mut input: R,
    connect: C,
    message_key: Option<String>,
) -> Result<Report, CliError>
where
    R: AsyncRead + Unpin,
    C: FnOnce() -> Result<P, PublisherError> + Send + 'static,
    P: ReportPublisher,
{
    let mut raw = Vec::new();
    input.read_to_end(&mut raw).await?;
    debug!(bytes = raw.len(), "report input read");

    let report = Report::from_slice(&raw)?;
    info!(
        results = report.results.len(),
        vulnerabilities = report.vulnerability_count(),
        "report decoded"
    );

    let payload = report.to_vec()?;
    publish(connect, message_key, payload).await?;

    Ok(report)
}

/// Sends `payload` once on a blocking thread.
async fn publish<C, P>(
    connect: C,
    message_key: Option<String>,
    payload: Vec<u8>,
) -> Result<(), CliError>
where
    C: FnOnce() -> Result<P, PublisherError> + Send + 'static,
    P: ReportPublisher,
{
    tokio::task::spawn_blocking(move || -> Result<(), PublisherError> {
        let mut publisher = connect()?;
        debug!(topic = publisher.topic(), bytes = payload.len(), "sending report");
        publisher.publish(message_key.as_deref().map(str::as_bytes), &payload)
    })
    .await
    .map_err(|e| CliError::Command(format!("publish task failed: {e}")))??;

    Ok(())
}
