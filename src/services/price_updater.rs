use crate::domain::{
    price::ExtractedPrice,
    service_query::{PriceUpdate, ServiceQuery},
};

use super::{
    CellWriter, CompletionProvider, PriceExtractor, PriceSearch, SpreadsheetWriter, WriteReport,
};

#[derive(Debug, PartialEq)]
pub enum ServiceOutcome {
    Queued(PriceUpdate),
    NotFound { name: String },
    Failed { name: String, reason: String },
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<ServiceOutcome>,
    /// `None` when no price was found, so the spreadsheet was never touched.
    pub written: Option<WriteReport>,
}

impl RunSummary {
    pub fn queued(&self) -> Vec<&PriceUpdate> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                ServiceOutcome::Queued(update) => Some(update),
                _ => None,
            })
            .collect()
    }
}

pub struct PriceUpdater<S, C, W> {
    search: S,
    extractor: PriceExtractor<C>,
    writer: SpreadsheetWriter<W>,
}

impl<S, C, W> PriceUpdater<S, C, W>
where
    S: PriceSearch,
    C: CompletionProvider,
    W: CellWriter,
{
    pub fn new(search: S, extractor: PriceExtractor<C>, writer: SpreadsheetWriter<W>) -> Self {
        PriceUpdater {
            search,
            extractor,
            writer,
        }
    }

    async fn process_service(&self, service: &ServiceQuery) -> ServiceOutcome {
        log::info!("Searching for {} price...", service.name);
        let search_results = self.search.search(&service.name, &service.plan).await;

        match self
            .extractor
            .extract(&search_results, &service.name, &service.plan)
            .await
        {
            Ok(ExtractedPrice::Found(price)) => {
                log::info!("{} price: {}", service.name, price);
                ServiceOutcome::Queued(PriceUpdate {
                    name: service.name.clone(),
                    price,
                    row: service.row,
                })
            }
            Ok(ExtractedPrice::NotFound) => {
                log::info!("Could not find price for {}", service.name);
                ServiceOutcome::NotFound {
                    name: service.name.clone(),
                }
            }
            Err(e) => {
                log::error!("Error processing {}: {:?}", service.name, e);
                ServiceOutcome::Failed {
                    name: service.name.clone(),
                    reason: format!("{:#}", e),
                }
            }
        }
    }

    /// Processes `services` one after another, then writes every price found
    /// in a single batch.
    pub async fn run(&self, services: &[ServiceQuery]) -> RunSummary {
        let mut summary = RunSummary::default();

        for service in services {
            let outcome = self.process_service(service).await;
            summary.outcomes.push(outcome);
        }

        let updates: Vec<PriceUpdate> = summary.queued().into_iter().cloned().collect();

        if updates.is_empty() {
            log::info!("No updates to apply to the spreadsheet.");
            return summary;
        }

        let report = self.writer.apply(&updates).await;
        log::info!(
            "Spreadsheet updated: {} of {} rows written.",
            report.updated.len(),
            updates.len()
        );
        summary.written = Some(report);

        summary
    }
}
