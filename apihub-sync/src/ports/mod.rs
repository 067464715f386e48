pub mod catalog;
#[cfg(test)]
pub mod fakes;
pub mod registry;

pub use catalog::CatalogSource;
pub use registry::{CollectOutcome, MetadataSink};
