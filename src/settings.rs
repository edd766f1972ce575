use anyhow::Context;
use log::{info, warn};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::json;
use std::fs;
use std::path::Path;

pub const SETTINGS_FILENAME: &str = "settings.json";

/// Run configuration. Built once at startup from the defaults plus an
/// optional `settings.json` overlay, then only read.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Username/secret pair for basic authentication, if any.
    pub auth: Option<(String, SecretString)>,
    /// Lookback window in days.
    pub days: u32,
    pub organizations: Vec<String>,
    /// Explicitly declared (owner, project) pairs outside the scanned
    /// organizations; counted with restricted attribution.
    pub extra_projects: Vec<(String, String)>,
    pub api_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            auth: None,
            days: 7,
            organizations: vec![
                "ddsc".to_string(),
                "lizardsystem".to_string(),
                "nens".to_string(),
            ],
            extra_projects: vec![
                ("reinout".to_string(), "buildout".to_string()),
                ("reinout".to_string(), "django-rest-framework".to_string()),
                ("reinout".to_string(), "serverinfo".to_string()),
                ("reinout".to_string(), "z3c.dependencychecker".to_string()),
                ("rvanlaar".to_string(), "djangorecipe".to_string()),
                ("zestsoftware".to_string(), "zest.releaser".to_string()),
            ],
            api_url: "https://api.github.com".to_string(),
        }
    }
}

/// Keys recognized in `settings.json`; absent (or null) keys keep the
/// built-in default.
#[derive(Deserialize, Default)]
struct SettingsOverride {
    auth: Option<(String, SecretString)>,
    days: Option<u32>,
    organizations: Option<Vec<String>>,
    extra_projects: Option<Vec<(String, String)>>,
    api_url: Option<String>,
}

impl Settings {
    /// Overlays the settings file, when present, over the defaults.
    pub fn load(settings_file: &Path) -> anyhow::Result<Settings> {
        let mut settings = Settings::default();
        if settings_file.exists() {
            let contents = fs::read_to_string(settings_file)
                .with_context(|| format!("failed to read {}", settings_file.display()))?;
            let overrides: SettingsOverride = serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse {}", settings_file.display()))?;
            settings.merge(overrides);
        }
        Ok(settings)
    }

    fn merge(&mut self, overrides: SettingsOverride) {
        if let Some(auth) = overrides.auth {
            self.auth = Some(auth);
        }
        if let Some(days) = overrides.days {
            self.days = days;
        }
        if let Some(organizations) = overrides.organizations {
            self.organizations = organizations;
        }
        if let Some(extra_projects) = overrides.extra_projects {
            self.extra_projects = extra_projects;
        }
        if let Some(api_url) = overrides.api_url {
            self.api_url = api_url;
        }
    }

    /// The settings as a printable JSON value, secret redacted.
    fn describe(&self) -> serde_json::Value {
        json!({
            "auth": self.auth.as_ref().map(|(username, _)| json!([username, "<secret>"])),
            "days": self.days,
            "organizations": self.organizations,
            "extra_projects": self.extra_projects,
            "api_url": self.api_url,
        })
    }
}

pub fn show_config(settings: &Settings, settings_file: &Path) -> anyhow::Result<()> {
    if !settings_file.exists() {
        warn!(
            "{} does not exist. The defaults are probably not what you want :-)",
            settings_file.display()
        );
    }
    info!("The current settings are:");
    println!("{}", serde_json::to_string_pretty(&settings.describe())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/settings.json")).unwrap();
        assert_eq!(settings.days, 7);
        assert!(settings.auth.is_none());
        assert_eq!(settings.api_url, "https://api.github.com");
    }

    #[test]
    fn file_overlays_defaults_key_by_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"auth": ["atilla_the_hun", "nonexisting_password"], "days": 30}}"#
        )
        .unwrap();

        let settings = Settings::load(file.path()).unwrap();

        assert_eq!(settings.days, 30);
        let (username, secret) = settings.auth.unwrap();
        assert_eq!(username, "atilla_the_hun");
        assert_eq!(secret.expose_secret(), "nonexisting_password");
        // Untouched keys keep their defaults.
        assert_eq!(settings.organizations.len(), 3);
    }

    #[test]
    fn null_auth_keeps_the_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"auth": null, "organizations": ["nens"]}}"#).unwrap();

        let settings = Settings::load(file.path()).unwrap();

        assert!(settings.auth.is_none());
        assert_eq!(settings.organizations, vec!["nens"]);
    }

    #[test]
    fn garbage_settings_fail_loudly() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();
        assert!(Settings::load(file.path()).is_err());
    }

    #[test]
    fn describe_redacts_the_secret() {
        let mut settings = Settings::default();
        settings.auth = Some((
            "reinout".to_string(),
            SecretString::new("very_secret".to_string()),
        ));
        let described = serde_json::to_string(&settings.describe()).unwrap();
        assert!(described.contains("reinout"));
        assert!(!described.contains("very_secret"));
    }
}
