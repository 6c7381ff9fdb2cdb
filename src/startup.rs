use crate::{
    configuration::Settings,
    services::{
        GoogleSearchClient, GoogleSheetsClient, OpenaiClient, PriceExtractor, PriceUpdater,
        RunSummary, ServiceAccountAuth, ServiceAccountKey, SpreadsheetWriter, SPREADSHEETS_SCOPE,
    },
};

pub type LivePriceUpdater =
    PriceUpdater<GoogleSearchClient, OpenaiClient, GoogleSheetsClient<ServiceAccountAuth>>;

/// Builds every client from `configuration`. Fails before any request is sent
/// when a credential is missing or the key file cannot be used.
pub fn build(configuration: &Settings) -> anyhow::Result<LivePriceUpdater> {
    configuration.validate()?;

    let key = ServiceAccountKey::from_file(&configuration.spreadsheet.credentials_path)?;
    let auth = ServiceAccountAuth::new(key, SPREADSHEETS_SCOPE)?;

    let search = GoogleSearchClient::new(
        configuration.api_keys.google_search.clone(),
        configuration.api_keys.google_cx.clone(),
        configuration.search.base_url.clone(),
        configuration.search.query_suffix.clone(),
    );
    let openai_client = OpenaiClient::new(
        configuration.api_keys.anthropic.clone(),
        configuration.llm.api_base.clone(),
        configuration.llm.model.clone(),
        configuration.llm.max_tokens,
    );
    let sheets = GoogleSheetsClient::new(
        auth,
        &configuration.spreadsheet.base_url,
        configuration.spreadsheet.id.clone(),
    )?;
    let writer = SpreadsheetWriter::new(
        sheets,
        configuration.spreadsheet.column.clone(),
        configuration.spreadsheet.sheet_name.clone(),
    );

    Ok(PriceUpdater::new(
        search,
        PriceExtractor::new(openai_client),
        writer,
    ))
}

pub async fn run(configuration: Settings) -> anyhow::Result<RunSummary> {
    let updater = build(&configuration)?;
    Ok(updater.run(&configuration.services).await)
}
