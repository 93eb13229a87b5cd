/// `load_config` module: reads the static YAML config and the profile document it points to,
/// and injects environment secrets.
///
/// This is the only place where user-supplied YAML is parsed into typed structs.
///
/// # Responsibilities
/// - Parse the config file into [`CliConfig`]
/// - Resolve a relative `profile` path against the config file's directory
/// - Inject `GITHUB_TOKEN` into the `github` section when it is set
/// - Parse the profile document into [`CvData`] ([`load_profile`])
///
/// # Errors
/// All errors use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::Result;
use folio_core::cv::PdfOptions;
use folio_core::github::{
    GitHubConfig, DEFAULT_API_BASE, DEFAULT_EVENTS_PER_PAGE, DEFAULT_REPOS_PER_PAGE,
};
use folio_core::model::CvData;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Environment variable holding the optional GitHub API token.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug)]
pub struct CliConfig {
    /// Profile document path, already resolved against the config directory.
    pub profile: PathBuf,
    pub export: ExportSection,
    pub github: Option<GitHubSection>,
}

#[derive(Debug, Deserialize)]
pub struct ExportSection {
    pub output_dir: PathBuf,
    #[serde(default)]
    pub image_path: Option<PathBuf>,
    #[serde(default)]
    pub max_projects: Option<usize>,
}

impl ExportSection {
    pub fn pdf_options(&self) -> PdfOptions {
        let defaults = PdfOptions::default();
        PdfOptions {
            image_path: self.image_path.clone(),
            max_projects: self.max_projects.unwrap_or(defaults.max_projects),
        }
    }
}

#[derive(Deserialize)]
pub struct GitHubSection {
    #[serde(default)]
    pub api_base: Option<String>,
    pub username: String,
    #[serde(default)]
    pub repos_per_page: Option<u32>,
    #[serde(default)]
    pub events_per_page: Option<u32>,
    /// Injected from the environment, never read from the file.
    #[serde(skip)]
    pub token: Option<String>,
}

impl std::fmt::Debug for GitHubSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubSection")
            .field("api_base", &self.api_base)
            .field("username", &self.username)
            .field("repos_per_page", &self.repos_per_page)
            .field("events_per_page", &self.events_per_page)
            .field("token_set", &self.token.is_some())
            .finish()
    }
}

impl GitHubSection {
    pub fn client_config(&self) -> GitHubConfig {
        let mut config = GitHubConfig::new(self.username.clone());
        config.api_base = self
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        config.repos_per_page = self.repos_per_page.unwrap_or(DEFAULT_REPOS_PER_PAGE);
        config.events_per_page = self.events_per_page.unwrap_or(DEFAULT_EVENTS_PER_PAGE);
        config.token = self.token.clone();
        config
    }
}

/// Loads a static YAML config file (no secrets) and injects secrets from the environment.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    #[derive(Deserialize)]
    struct RawConfig {
        profile: PathBuf,
        export: ExportSection,
        #[serde(default)]
        github: Option<GitHubSection>,
    }

    let raw: RawConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    let profile = if raw.profile.is_relative() {
        path_ref
            .parent()
            .map(|dir| dir.join(&raw.profile))
            .unwrap_or(raw.profile)
    } else {
        raw.profile
    };

    let github = raw.github.map(|mut section| {
        section.token = std::env::var(GITHUB_TOKEN_ENV)
            .ok()
            .filter(|token| !token.trim().is_empty());
        info!(
            username = %section.username,
            token_set = section.token.is_some(),
            "GitHub section configured"
        );
        section
    });

    Ok(CliConfig {
        profile,
        export: raw.export,
        github,
    })
}

/// Reads and parses the profile document.
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<CvData> {
    let path_ref = path.as_ref();
    info!(profile_path = ?path_ref, "Loading profile document");

    let content = fs::read_to_string(path_ref).map_err(|e| {
        error!(error = ?e, profile_path = ?path_ref, "Failed to read profile document");
        anyhow::anyhow!("Failed to read profile document {:?}: {}", path_ref, e)
    })?;

    let data: CvData = serde_yaml::from_str(&content).map_err(|e| {
        error!(error = ?e, profile_path = ?path_ref, "Failed to parse profile YAML");
        anyhow::anyhow!("Failed to parse profile YAML: {e}")
    })?;

    info!(
        name = %data.profile.name,
        projects = data.projects.len(),
        "Profile document loaded"
    );
    Ok(data)
}
