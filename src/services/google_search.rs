use async_trait::async_trait;
use itertools::Itertools;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[async_trait]
pub trait PriceSearch: Send + Sync {
    /// Plain text of the search results, empty when nothing was found or the
    /// search failed.
    async fn search(&self, service_name: &str, plan: &str) -> String;
}

pub struct GoogleSearchClient {
    client: Client,
    api_key: String,
    search_engine_id: String,
    url: String,
    query_suffix: String,
}

#[derive(Serialize)]
struct GetQuery<'a> {
    key: &'a str,
    cx: &'a str,
    q: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}

impl GoogleSearchClient {
    pub fn new(
        api_key: String,
        search_engine_id: String,
        url: String,
        query_suffix: String,
    ) -> Self {
        GoogleSearchClient {
            client: Client::new(),
            api_key,
            search_engine_id,
            url,
            query_suffix,
        }
    }

    async fn fetch_results(&self, query: &str) -> Result<String, reqwest::Error> {
        let response = self
            .client
            .get(&self.url)
            .query(&GetQuery {
                key: &self.api_key,
                cx: &self.search_engine_id,
                q: query,
            })
            .send()
            .await?
            .error_for_status()?
            .json::<ApiResponse>()
            .await?;

        Ok(join_search_items(&response.items))
    }
}

#[async_trait]
impl PriceSearch for GoogleSearchClient {
    async fn search(&self, service_name: &str, plan: &str) -> String {
        let query = build_price_query(service_name, plan, &self.query_suffix);

        match self.fetch_results(&query).await {
            Ok(text) => text,
            Err(e) => {
                log::error!("Error searching for {} {}: {:?}", service_name, plan, e);
                String::new()
            }
        }
    }
}

pub fn build_price_query(service_name: &str, plan: &str, suffix: &str) -> String {
    [service_name, plan, suffix]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .join(" ")
}

fn join_search_items(items: &[SearchItem]) -> String {
    items
        .iter()
        .map(|item| format!("{}\n{}", item.title, item.snippet))
        .join("\n\n")
}
