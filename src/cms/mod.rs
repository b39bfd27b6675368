pub mod client;
pub mod query;
pub mod resolver;

pub use client::CmsClient;
pub use query::{ContentQuery, Direction};
pub use resolver::{EndpointResolver, HostResolver, RequestContext};
