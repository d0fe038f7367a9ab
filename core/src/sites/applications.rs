//! Applications that can be installed onto a site.
//!
//! `Application` is a closed sum type. Its `ApplicationKind` tag picks the
//! path segment under `servers/{server}/sites/{site}/` used for both install
//! and uninstall; the variant payload supplies the install form body.
//! An unconfigured application is valid for uninstall only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::{decode_form, encode_form};
use crate::types::{InstallGitRequest, InstallWordPressRequest};

/// Discriminant of an `Application`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationKind {
    Git,
    WordPress,
}

impl ApplicationKind {
    /// Path segment appended to the site path.
    pub fn segment(&self) -> &'static str {
        match self {
            ApplicationKind::Git => "git",
            ApplicationKind::WordPress => "wordpress",
        }
    }
}

/// Source control provider a git application is pulled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GitProvider {
    Github,
    Bitbucket,
    Gitlab,
    /// Any other remote, addressed by URL.
    Custom,
}

impl GitProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            GitProvider::Github => "github",
            GitProvider::Bitbucket => "bitbucket",
            GitProvider::Gitlab => "gitlab",
            GitProvider::Custom => "custom",
        }
    }
}

impl fmt::Display for GitProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GitProvider {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "github" => Ok(GitProvider::Github),
            "bitbucket" => Ok(GitProvider::Bitbucket),
            "gitlab" => Ok(GitProvider::Gitlab),
            "custom" => Ok(GitProvider::Custom),
            other => Err(ApiError::InvalidArgument(format!("unsupported git provider {other:?}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GitSource {
    provider: GitProvider,
    repository: String,
}

/// A codebase deployed from a git repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitApplication {
    source: Option<GitSource>,
    branch: Option<String>,
    composer: Option<bool>,
}

#[allow(clippy::wrong_self_convention)]
impl GitApplication {
    pub fn new() -> Self {
        Self::default()
    }

    /// `repository` is the `owner/name` slug on GitHub.
    pub fn from_github(self, repository: impl Into<String>) -> Self {
        self.from_provider(GitProvider::Github, repository)
    }

    pub fn from_bitbucket(self, repository: impl Into<String>) -> Self {
        self.from_provider(GitProvider::Bitbucket, repository)
    }

    pub fn from_gitlab(self, repository: impl Into<String>) -> Self {
        self.from_provider(GitProvider::Gitlab, repository)
    }

    /// Self-hosted remote, e.g. `git@example.org:owner/repo.git`.
    pub fn from_git(self, url: impl Into<String>) -> Self {
        self.from_provider(GitProvider::Custom, url)
    }

    pub fn from_provider(mut self, provider: GitProvider, repository: impl Into<String>) -> Self {
        self.source = Some(GitSource {
            provider,
            repository: repository.into(),
        });
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Whether the server runs `composer install` after cloning.
    pub fn with_composer(mut self, composer: bool) -> Self {
        self.composer = Some(composer);
        self
    }

    pub fn provider(&self) -> Option<GitProvider> {
        self.source.as_ref().map(|s| s.provider)
    }

    pub fn repository(&self) -> Option<&str> {
        self.source.as_ref().map(|s| s.repository.as_str())
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    pub fn composer(&self) -> Option<bool> {
        self.composer
    }

    pub fn is_configured(&self) -> bool {
        self.source.as_ref().is_some_and(|s| !s.repository.is_empty())
    }

    /// Install payload, or `None` while no source is set.
    pub fn to_request(&self) -> Option<InstallGitRequest> {
        self.source.as_ref().map(|source| InstallGitRequest {
            provider: source.provider,
            repository: source.repository.clone(),
            branch: self.branch.clone(),
            composer: self.composer,
        })
    }
}

impl From<InstallGitRequest> for GitApplication {
    fn from(request: InstallGitRequest) -> Self {
        GitApplication {
            source: Some(GitSource {
                provider: request.provider,
                repository: request.repository,
            }),
            branch: request.branch,
            composer: request.composer,
        }
    }
}

/// A WordPress install backed by an existing database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordPressApplication {
    credentials: Option<InstallWordPressRequest>,
}

impl WordPressApplication {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn using_database(mut self, database: impl Into<String>, user: impl Into<String>) -> Self {
        self.credentials = Some(InstallWordPressRequest {
            database: database.into(),
            user: user.into(),
        });
        self
    }

    pub fn database(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.database.as_str())
    }

    pub fn user(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.user.as_str())
    }

    pub fn is_configured(&self) -> bool {
        self.credentials
            .as_ref()
            .is_some_and(|c| !c.database.is_empty() && !c.user.is_empty())
    }

    pub fn to_request(&self) -> Option<InstallWordPressRequest> {
        self.credentials.clone()
    }
}

/// Install payload of either variant; serializes as the inner request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InstallRequest {
    Git(InstallGitRequest),
    WordPress(InstallWordPressRequest),
}

/// An application variant that can be installed onto or removed from a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Application {
    Git(GitApplication),
    WordPress(WordPressApplication),
}

impl Application {
    pub fn kind(&self) -> ApplicationKind {
        match self {
            Application::Git(_) => ApplicationKind::Git,
            Application::WordPress(_) => ApplicationKind::WordPress,
        }
    }

    pub fn segment(&self) -> &'static str {
        self.kind().segment()
    }

    pub fn is_configured(&self) -> bool {
        match self {
            Application::Git(app) => app.is_configured(),
            Application::WordPress(app) => app.is_configured(),
        }
    }

    fn request(&self) -> Option<InstallRequest> {
        match self {
            Application::Git(app) => app.to_request().map(InstallRequest::Git),
            Application::WordPress(app) => app.to_request().map(InstallRequest::WordPress),
        }
    }

    /// Wire representation of this application. Unconfigured variants map to
    /// an empty body.
    pub fn to_form(&self) -> Result<String, ApiError> {
        match self.request() {
            Some(request) => encode_form(&request),
            None => Ok(String::new()),
        }
    }

    /// Payload for an install call; fails when nothing has been configured.
    pub fn install_request(&self) -> Result<InstallRequest, ApiError> {
        match self.request() {
            Some(request) if self.is_configured() => Ok(request),
            _ => {
                let reason = match self.kind() {
                    ApplicationKind::Git => "git application has no repository configured",
                    ApplicationKind::WordPress => "wordpress application has no database configured",
                };
                Err(ApiError::InvalidArgument(reason.to_string()))
            }
        }
    }

    /// Decode a form body produced by `to_form` back into an application.
    /// An empty body yields the unconfigured variant.
    pub fn from_form(kind: ApplicationKind, body: &str) -> Result<Self, ApiError> {
        let app = match kind {
            ApplicationKind::Git if body.is_empty() => Application::Git(GitApplication::new()),
            ApplicationKind::WordPress if body.is_empty() => {
                Application::WordPress(WordPressApplication::new())
            }
            ApplicationKind::Git => Application::Git(decode_form::<InstallGitRequest>(body)?.into()),
            ApplicationKind::WordPress => Application::WordPress(WordPressApplication {
                credentials: Some(decode_form(body)?),
            }),
        };
        Ok(app)
    }
}

impl From<GitApplication> for Application {
    fn from(app: GitApplication) -> Self {
        Application::Git(app)
    }
}

impl From<WordPressApplication> for Application {
    fn from(app: WordPressApplication) -> Self {
        Application::WordPress(app)
    }
}
