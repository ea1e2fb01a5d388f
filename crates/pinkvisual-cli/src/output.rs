//! Result output through the log stream.

use anyhow::{Context, Result};
use pinkvisual_api::{Listing, Record};

/// Logs a single record as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the record cannot be serialized.
pub fn emit_record(record: &Record) -> Result<()> {
    let json = serde_json::to_string_pretty(record).context("failed to serialize record")?;
    tracing::info!("{json}");
    Ok(())
}

/// Logs a listing summary followed by its records as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the records cannot be serialized.
pub fn emit_listing(listing: &Listing<Record>) -> Result<()> {
    let total = listing
        .total
        .map_or_else(|| String::from("-"), |total| total.to_string());
    tracing::info!("Total: {total}, returned: {}", listing.len());

    let json =
        serde_json::to_string_pretty(&listing.items).context("failed to serialize records")?;
    tracing::info!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;
    use tracing::subscriber::with_default;
    use tracing_mock::{expect, subscriber};

    use super::*;

    fn record(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_emit_record() {
        // Arrange
        let record = record(json!({ "id": 1 }));
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().with_fields(expect::msg("{\n  \"id\": 1\n}")))
            .only()
            .run_with_handle();

        // Act
        with_default(subscriber, || {
            emit_record(&record).unwrap();
        });

        // Assert
        handle.assert_finished();
    }

    #[test]
    fn test_emit_listing_with_total() {
        // Arrange
        let listing = Listing {
            items: vec![record(json!({ "id": "3311" }))],
            total: Some(14),
        };
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().with_fields(expect::msg("Total: 14, returned: 1")))
            .event(expect::event().with_fields(expect::msg("[\n  {\n    \"id\": \"3311\"\n  }\n]")))
            .only()
            .run_with_handle();

        // Act
        with_default(subscriber, || {
            emit_listing(&listing).unwrap();
        });

        // Assert
        handle.assert_finished();
    }

    #[test]
    fn test_emit_listing_without_total() {
        // Arrange
        let listing: Listing<Record> = Listing {
            items: Vec::new(),
            total: None,
        };
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().with_fields(expect::msg("Total: -, returned: 0")))
            .event(expect::event().with_fields(expect::msg("[]")))
            .only()
            .run_with_handle();

        // Act
        with_default(subscriber, || {
            emit_listing(&listing).unwrap();
        });

        // Assert
        handle.assert_finished();
    }
}
