use crate::domain::price::ExtractedPrice;

use super::CompletionProvider;

pub struct PriceExtractor<C> {
    completion: C,
}

impl<C: CompletionProvider> PriceExtractor<C> {
    pub fn new(completion: C) -> Self {
        PriceExtractor { completion }
    }

    /// Asks the model for the price found in `search_results`.
    ///
    /// Completion failures are returned to the caller; an answer without a
    /// usable number is `ExtractedPrice::NotFound`.
    pub async fn extract(
        &self,
        search_results: &str,
        service_name: &str,
        plan: &str,
    ) -> anyhow::Result<ExtractedPrice> {
        let prompt = build_extraction_prompt(search_results, service_name, plan);
        let reply = self.completion.complete(&prompt).await?;
        let reply = reply.trim();

        log::info!("Model response for {}: {}", service_name, reply);

        Ok(ExtractedPrice::from_reply(reply))
    }
}

pub fn build_extraction_prompt(search_results: &str, service_name: &str, plan: &str) -> String {
    format!(
        "Search results for {name} {plan} subscription price in Turkey:\n\n\
        {search_results}\n\n\
        Extract the current subscription price for {name} {plan} from the above text. \
        The price should be in Turkish Lira (TL or ₺). \
        Return only the numeric price value, without currency symbol. \
        If multiple prices are found, return the most relevant one for the {name} plan. \
        If you can't find a price, explain why and return -1.",
        name = service_name,
        plan = plan,
        search_results = search_results,
    )
}
