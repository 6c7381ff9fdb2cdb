pub mod google_search;
pub mod google_sheets;
pub mod openai_client;
pub mod price_extractor;
pub mod price_updater;
pub mod service_account;

pub use google_search::*;
pub use google_sheets::*;
pub use openai_client::*;
pub use price_extractor::*;
pub use price_updater::*;
pub use service_account::*;
