use crate::settings::Settings;
use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use log::info;
use serde::Serialize;
use std::fs;
use std::path::Path;
use testcommits::api::{CommitClient, Result};
use testcommits::collector::{Project, User, UserStats};
use testcommits::counter::{ranking, CommitStats};

pub struct Report {
    pub projects: Vec<Project>,
    pub users: Vec<User>,
}

/// Timestamp for github's from-that-date query.
pub fn since(days: u32) -> String {
    since_from(Utc::now(), days)
}

fn since_from(now: DateTime<Utc>, days: u32) -> String {
    (now - Duration::days(i64::from(days)))
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}

/// Fetches and aggregates everything: all organizations' repositories
/// first, then the extra projects with restricted attribution. One request
/// at a time, in program order.
pub async fn collect_info<C: CommitClient>(client: &C, settings: &Settings) -> Result<Report> {
    let since = since(settings.days);
    let mut users = UserStats::default();
    let mut projects = Vec::new();

    for organization in &settings.organizations {
        info!("Looking for projects in organization {}...", organization);
        for name in client.org_repos(organization).await? {
            let mut project = Project::new(organization.clone(), name, false);
            project.load(client, &since, &mut users).await?;
            if project.is_active() {
                projects.push(project);
            }
        }
    }

    for (owner, name) in &settings.extra_projects {
        let mut project = Project::new(owner.clone(), name.clone(), true);
        project.load(client, &since, &mut users).await?;
        if project.is_active() {
            projects.push(project);
        }
    }

    let mut users = users.into_users();
    projects.sort_by(|a, b| ranking(&a.stats, &b.stats));
    users.sort_by(|a, b| ranking(&a.stats, &b.stats));
    Ok(Report { projects, users })
}

pub fn render(report: &Report, settings: &Settings) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "
Test statistics
===============

We want more and better testing. For a quick and dirty quantity
indication ('more'), here are the commits that have the string
'test' in one of the commit's touched filenames.

Period: {period} days.
Github organizations that I queried: {orgs}

Projects sorted by amount of commits with tests
-----------------------------------------------

",
        period = settings.days,
        orgs = settings.organizations.join(", ")
    ));
    for project in &report.projects {
        out.push_str(&info_line(project));
    }
    out.push_str(
        "

Committers sorted by amount of commits with tests
-------------------------------------------------

",
    );
    for user in &report.users {
        out.push_str(&info_line(user));
    }
    out
}

fn info_line<S: CommitStats>(item: &S) -> String {
    format!(
        "{name}: {tested} {percentage}\n",
        name = item.name(),
        tested = item.counter().num_testcommits,
        percentage = item.counter().percentage()
    )
}

#[derive(Serialize)]
struct ReportEntry {
    name: String,
    num_testcommits: u32,
    percentage: String,
}

#[derive(Serialize)]
struct JsonReport {
    projects: Vec<ReportEntry>,
    users: Vec<ReportEntry>,
}

fn entry<S: CommitStats>(item: &S) -> ReportEntry {
    ReportEntry {
        name: item.name().to_string(),
        num_testcommits: item.counter().num_testcommits,
        percentage: item.counter().bare_percentage(),
    }
}

pub fn export_json(report: &Report, path: &Path) -> anyhow::Result<()> {
    let output = JsonReport {
        projects: report.projects.iter().map(entry).collect(),
        users: report.users.iter().map(entry).collect(),
    };
    let output = serde_json::to_string_pretty(&output)?;
    fs::write(path, output).with_context(|| format!("failed to write {}", path.display()))?;
    info!("Wrote results to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use testcommits::classifier::ChangedFile;
    use testcommits::commit::Commit;

    #[test]
    fn since_subtracts_the_lookback_window() {
        let now = Utc.with_ymd_and_hms(1972, 12, 25, 0, 0, 0).unwrap();
        assert_eq!(since_from(now, 7), "1972-12-18T00:00:00");
    }

    fn sample_report() -> (Report, Settings) {
        let mut project = Project::new("nens", "busy", false);
        let testcommit = Commit::new(
            "Reinout",
            &[ChangedFile::new("tests.py".to_string(), None)],
        );
        let plain = Commit::new("Reinout", &[]);
        project.stats.add_commit(&testcommit);
        project.stats.add_commit(&plain);
        project.stats.add_commit(&plain);

        let mut users = UserStats::default();
        let user = users.get_or_create("Reinout");
        user.add_commit(&testcommit);
        user.add_commit(&plain);
        user.add_commit(&plain);

        let mut settings = Settings::default();
        settings.organizations = vec!["nens".to_string()];
        (
            Report {
                projects: vec![project],
                users: users.into_users(),
            },
            settings,
        )
    }

    #[test]
    fn render_lists_projects_and_users() {
        let (report, settings) = sample_report();
        let text = render(&report, &settings);
        assert!(text.contains("Period: 7 days."));
        assert!(text.contains("Github organizations that I queried: nens"));
        assert!(text.contains("busy: 1 (33%)"));
        assert!(text.contains("Reinout: 1 (33%)"));
    }

    #[test]
    fn export_writes_bare_percentages() {
        let (report, _) = sample_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        export_json(&report, &path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["projects"][0]["name"], "busy");
        assert_eq!(written["projects"][0]["num_testcommits"], 1);
        assert_eq!(written["projects"][0]["percentage"], "33");
        assert_eq!(written["users"][0]["name"], "Reinout");
    }
}
