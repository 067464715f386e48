pub mod sync;
pub mod translate;

pub use sync::{FetchFailure, PreparedSync, SyncReport, SyncService};
pub use translate::{SpecsByUrl, Translator, derive_api_id};
