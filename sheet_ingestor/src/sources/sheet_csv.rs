//! Google Sheets CSV-export source.
//!
//! Reads a sheet through the public `gviz` CSV endpoint, so a sheet shared
//! as "anyone with the link" needs no credentials. When `SHEET_API_KEY` is
//! set it is passed along as the `key` query parameter for sheets gated
//! behind an API key.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use shared_utils::env::optional_env;
use tracing::{debug, info};

use crate::{
    models::{entry::RawRow, snapshot::Snapshot},
    sources::{
        SnapshotSource,
        errors::{SourceError, SourceInitError},
    },
};

const BASE_URL: &str = "https://docs.google.com/spreadsheets/d";

/// Environment variable holding an optional Google API key.
pub const API_KEY_VAR: &str = "SHEET_API_KEY";

/// Configuration for a [`SheetCsvSource`].
#[derive(Debug, Clone, Deserialize)]
pub struct SheetCsvConfig {
    /// Spreadsheet id, the long token in the sheet URL. May be left out of
    /// the config file when supplied through the environment instead;
    /// [`SheetCsvSource::new`] rejects a blank id.
    #[serde(default)]
    pub sheet_id: String,

    /// A1-style range to read. The default starts below the header row.
    #[serde(default = "default_range")]
    pub range: String,

    /// Zero-based index of the value column within the fetched range.
    /// Column 0 is always the label.
    #[serde(default = "default_value_column")]
    pub value_column: usize,

    /// Request timeout in seconds. A hung fetch must not stall the loop.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_range() -> String {
    "A2:B12".to_string()
}

fn default_value_column() -> usize {
    1
}

fn default_timeout_secs() -> u64 {
    10
}

/// Fetches snapshots from the Google Sheets CSV export endpoint.
pub struct SheetCsvSource {
    client: Client,
    config: SheetCsvConfig,
    api_key: Option<SecretString>,
}

impl SheetCsvSource {
    /// Creates a new source from `config`.
    ///
    /// Picks up an optional API key from the `SHEET_API_KEY` environment
    /// variable. The request timeout is fixed on the client at build time.
    pub fn new(config: SheetCsvConfig) -> Result<Self, SourceInitError> {
        if config.sheet_id.trim().is_empty() {
            return Err(SourceInitError::Config("sheet_id is empty".to_string()));
        }
        if config.value_column == 0 {
            return Err(SourceInitError::Config(
                "value_column 0 is the label column".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let api_key = optional_env(API_KEY_VAR).map(|k| SecretString::new(k.into()));
        if api_key.is_some() {
            debug!("using API key from {API_KEY_VAR}");
        }

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn export_url(&self) -> String {
        format!("{BASE_URL}/{}/gviz/tq", self.config.sheet_id)
    }
}

#[async_trait]
impl SnapshotSource for SheetCsvSource {
    async fn fetch(&self) -> Result<Snapshot, SourceError> {
        let mut query: Vec<(&str, String)> = vec![
            ("tqx", "out:csv".to_string()),
            ("range", self.config.range.clone()),
        ];
        if let Some(key) = &self.api_key {
            query.push(("key", key.expose_secret().to_string()));
        }

        let response = self
            .client
            .get(self.export_url())
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload = response.text().await?;
        let rows = decode_rows(&payload, self.config.value_column)?;
        let snapshot = Snapshot::from_rows(rows);
        if snapshot.is_empty() {
            return Err(SourceError::Empty);
        }

        info!(entries = snapshot.len(), "fetched snapshot");
        Ok(snapshot)
    }
}

/// Decodes the CSV payload into raw rows.
///
/// The configured range starts below the sheet's header, so headers are off.
/// Rows shorter than the value column are kept with an empty raw value and
/// dropped later during numeric coercion.
pub fn decode_rows(payload: &str, value_column: usize) -> Result<Vec<RawRow>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(payload.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let label = record.get(0).unwrap_or_default().to_string();
        let raw_value = record.get(value_column).unwrap_or_default().to_string();
        rows.push(RawRow { label, raw_value });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(value_column: usize) -> SheetCsvConfig {
        SheetCsvConfig {
            sheet_id: "sheet123".to_string(),
            range: default_range(),
            value_column,
            timeout_secs: default_timeout_secs(),
        }
    }

    #[test]
    fn export_url_targets_the_gviz_endpoint() {
        let source = SheetCsvSource::new(config(1)).expect("source builds");
        assert_eq!(
            source.export_url(),
            "https://docs.google.com/spreadsheets/d/sheet123/gviz/tq"
        );
    }

    #[test]
    fn rejects_blank_sheet_id_and_label_column_as_value() {
        let mut cfg = config(1);
        cfg.sheet_id = "  ".to_string();
        assert!(matches!(
            SheetCsvSource::new(cfg),
            Err(SourceInitError::Config(_))
        ));
        assert!(matches!(
            SheetCsvSource::new(config(0)),
            Err(SourceInitError::Config(_))
        ));
    }

    #[test]
    fn decode_rows_reads_label_and_value_columns() {
        let payload = "\"Ms Chen\",\"5\"\n\"Mr Patel\",\"12\"\n";
        let rows = decode_rows(payload, 1).expect("decodes");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "Ms Chen");
        assert_eq!(rows[0].raw_value, "5");
    }

    #[test]
    fn decode_rows_honors_a_moved_value_column() {
        // Later sheet revisions put the count in column C.
        let payload = "Ms Chen,old,5\nMr Patel,old,12\n";
        let rows = decode_rows(payload, 2).expect("decodes");
        assert_eq!(rows[1].raw_value, "12");
    }

    #[test]
    fn decode_rows_pads_short_rows() {
        let payload = "Ms Chen\nMr Patel,12\n";
        let rows = decode_rows(payload, 1).expect("decodes");
        assert_eq!(rows[0].raw_value, "");
        assert_eq!(rows[1].raw_value, "12");
    }

    #[test]
    fn config_defaults_cover_the_original_sheet_shape() {
        let cfg: SheetCsvConfig = toml::from_str("sheet_id = \"abc\"").expect("parses");
        assert_eq!(cfg.range, "A2:B12");
        assert_eq!(cfg.value_column, 1);
        assert_eq!(cfg.timeout_secs, 10);
    }
}
