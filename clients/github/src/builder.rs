use crate::fetch::Credentials;
use crate::GithubClient;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::ClientBuilder;
use secrecy::SecretString;
use testcommits::api::{Error, Result};

pub struct GithubClientBuilder {
    client_builder: ClientBuilder,
    github_url: String,
    headers: HeaderMap,
    auth: Option<Credentials>,
}

impl Default for GithubClientBuilder {
    fn default() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static("testcommitinfo"));
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        Self {
            client_builder: ClientBuilder::default(),
            github_url: "https://api.github.com".to_string(),
            headers,
            auth: None,
        }
    }
}

impl GithubClientBuilder {
    pub fn with_github_url<STR: AsRef<str>>(mut self, url: STR) -> GithubClientBuilder {
        // A trailing slash would turn into `//` in the endpoint URLs.
        self.github_url = url.as_ref().trim_end_matches('/').to_string();
        self
    }

    /// Username/secret pair for basic authentication.
    pub fn with_auth<STR: Into<String>>(mut self, username: STR, secret: SecretString) -> GithubClientBuilder {
        self.auth = Some((username.into(), secret));
        self
    }

    pub fn build(self) -> Result<GithubClient> {
        let client = self
            .client_builder
            .default_headers(self.headers)
            .build()
            .map_err(|err| Error::Request(err.into()))?;
        Ok(GithubClient {
            client,
            github_url: self.github_url,
            auth: self.auth,
        })
    }
}
