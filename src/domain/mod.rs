pub mod price;
pub mod service_query;
