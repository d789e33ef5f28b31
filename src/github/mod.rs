pub mod client;
pub mod http;
pub mod types;

pub use client::{ErrorKind, GithubClient, GithubError};
pub use http::HttpGithubClient;
pub use types::{SearchPage, SearchQuery, User};
