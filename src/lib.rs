pub mod args;
pub mod report;
pub mod settings;

pub use args::Args;

use github_client::GithubClientBuilder;
use report::Report;
use settings::Settings;

/// Builds an API client from the settings and collects the full report.
pub async fn collect_report(settings: &Settings) -> anyhow::Result<Report> {
    let mut builder = GithubClientBuilder::default().with_github_url(&settings.api_url);
    if let Some((username, secret)) = &settings.auth {
        builder = builder.with_auth(username.clone(), secret.clone());
    }
    let client = builder.build()?;
    Ok(report::collect_info(&client, settings).await?)
}
