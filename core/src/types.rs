//! Domain DTOs for the sites API.
//!
//! # Design
//! These types mirror the server's JSON schema but are defined independently
//! of the mock-server crate; integration tests catch schema drift between the
//! two. Single-entity responses wrap the object under `site`, listings wrap an
//! array under `sites`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::sites::applications::GitProvider;

pub type ServerId = u64;
pub type SiteId = u64;

/// Project type a site is provisioned as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Php,
    Html,
    Symfony,
    SymfonyDev,
    SymfonyFour,
}

impl ProjectType {
    pub const ALL: [ProjectType; 5] = [
        ProjectType::Php,
        ProjectType::Html,
        ProjectType::Symfony,
        ProjectType::SymfonyDev,
        ProjectType::SymfonyFour,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Php => "php",
            ProjectType::Html => "html",
            ProjectType::Symfony => "symfony",
            ProjectType::SymfonyDev => "symfony_dev",
            ProjectType::SymfonyFour => "symfony_four",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ApiError::InvalidArgument(format!("unsupported project type {s:?}")))
    }
}

/// Provisioning status reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteStatus {
    Installing,
    Installed,
    Removing,
    #[serde(other)]
    Unknown,
}

/// Last-known server-side representation of a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteAttributes {
    pub id: SiteId,
    /// The site's domain name.
    pub name: String,
    pub directory: String,
    pub wildcards: bool,
    pub status: SiteStatus,
    pub repository: Option<String>,
    pub repository_provider: Option<String>,
    pub repository_branch: Option<String>,
    pub repository_status: Option<String>,
    pub quick_deploy: bool,
    pub project_type: ProjectType,
    pub app: Option<String>,
    pub app_status: Option<String>,
    pub hipchat_room: Option<String>,
    pub slack_channel: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
}

/// Form payload for `POST servers/{server}/sites`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSiteRequest {
    pub domain: String,
    pub project_type: ProjectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wildcards: Option<bool>,
}

/// Form payload for `POST servers/{server}/sites/{site}/git`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallGitRequest {
    pub provider: GitProvider,
    pub repository: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composer: Option<bool>,
}

/// Form payload for `POST servers/{server}/sites/{site}/wordpress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallWordPressRequest {
    pub database: String,
    pub user: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SiteEnvelope {
    pub site: SiteAttributes,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SitesEnvelope {
    pub sites: Vec<SiteAttributes>,
}

/// `created_at` uses a space-separated, zone-less timestamp.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
