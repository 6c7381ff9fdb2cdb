use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use url::Url;

use crate::domain::service_query::{cell_range, PriceUpdate};

use super::AccessTokenSource;

#[async_trait]
pub trait CellWriter: Send + Sync {
    /// Overwrites a single cell with a raw number.
    async fn write_cell(&self, range: &str, value: f64) -> anyhow::Result<()>;
}

pub struct GoogleSheetsClient<T> {
    client: Client,
    token_source: T,
    base_url: Url,
    spreadsheet_id: String,
}

impl<T: AccessTokenSource> GoogleSheetsClient<T> {
    pub fn new(token_source: T, base_url: &str, spreadsheet_id: String) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid spreadsheet base url {}", base_url))?;

        Ok(GoogleSheetsClient {
            client: Client::new(),
            token_source,
            base_url,
            spreadsheet_id,
        })
    }

    pub fn values_url(&self, range: &str) -> anyhow::Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Spreadsheet base url cannot be a base"))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values", range]);
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");

        Ok(url)
    }
}

#[async_trait]
impl<T: AccessTokenSource> CellWriter for GoogleSheetsClient<T> {
    async fn write_cell(&self, range: &str, value: f64) -> anyhow::Result<()> {
        let url = self.values_url(range)?;
        let token = self.token_source.access_token().await?;

        self.client
            .put(url)
            .bearer_auth(token)
            .json(&json!({
                "range": range,
                "majorDimension": "ROWS",
                "values": [[value]],
            }))
            .send()
            .await
            .context("Spreadsheet update request failed")?
            .error_for_status()
            .context("Spreadsheet API rejected the update")?;

        Ok(())
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct WriteReport {
    pub updated: Vec<String>,
    pub failed: Vec<(String, String)>,
}

/// Writes each price into `<column><row>`, one request per row.
pub struct SpreadsheetWriter<W> {
    writer: W,
    column: String,
    sheet_name: Option<String>,
}

impl<W: CellWriter> SpreadsheetWriter<W> {
    pub fn new(writer: W, column: String, sheet_name: Option<String>) -> Self {
        SpreadsheetWriter {
            writer,
            column,
            sheet_name,
        }
    }

    pub async fn apply(&self, updates: &[PriceUpdate]) -> WriteReport {
        let mut report = WriteReport::default();

        for update in updates {
            let range = cell_range(self.sheet_name.as_deref(), &self.column, update.row);

            match self.writer.write_cell(&range, update.price).await {
                Ok(()) => {
                    log::info!(
                        "Updated {} price to {} in column {}",
                        update.name,
                        update.price,
                        self.column
                    );
                    report.updated.push(update.name.clone());
                }
                Err(e) => {
                    log::error!("Error updating {}: {:?}", update.name, e);
                    report.failed.push((update.name.clone(), format!("{:#}", e)));
                }
            }
        }

        report
    }
}
