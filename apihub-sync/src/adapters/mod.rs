pub mod apihub;
pub mod swaggerhub;

pub use apihub::{ApiHubClient, PollSettings, TokenSource};
pub use swaggerhub::SwaggerHubClient;
