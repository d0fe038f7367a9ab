//! In-memory emulation of the provisioning API's sites endpoints.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Site {
    pub id: u64,
    pub name: String,
    pub directory: String,
    pub wildcards: bool,
    pub status: String,
    pub repository: Option<String>,
    pub repository_provider: Option<String>,
    pub repository_branch: Option<String>,
    pub repository_status: Option<String>,
    pub quick_deploy: bool,
    pub project_type: String,
    pub app: Option<String>,
    pub app_status: Option<String>,
    pub hipchat_room: Option<String>,
    pub slack_channel: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SiteEnvelope {
    pub site: Site,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SitesEnvelope {
    pub sites: Vec<Site>,
}

#[derive(Deserialize)]
pub struct CreateSite {
    pub domain: String,
    pub project_type: String,
    pub directory: Option<String>,
    pub wildcards: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateSite {
    pub name: Option<String>,
    pub directory: Option<String>,
    pub wildcards: Option<bool>,
}

#[derive(Deserialize)]
pub struct InstallGit {
    pub provider: String,
    pub repository: String,
    pub branch: Option<String>,
    pub composer: Option<bool>,
}

#[derive(Deserialize)]
pub struct InstallWordPress {
    pub database: String,
    pub user: String,
}

const PROJECT_TYPES: &[&str] = &["php", "html", "symfony", "symfony_dev", "symfony_four"];
const GIT_PROVIDERS: &[&str] = &["github", "bitbucket", "gitlab", "custom"];

#[derive(Default)]
pub struct Store {
    sites: BTreeMap<(u64, u64), Site>,
    next_id: u64,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/servers/{server}/sites", get(list_sites).post(create_site))
        .route(
            "/servers/{server}/sites/{site}",
            get(get_site).put(update_site).delete(delete_site),
        )
        .route(
            "/servers/{server}/sites/{site}/git",
            post(install_git).delete(uninstall_git),
        )
        .route(
            "/servers/{server}/sites/{site}/wordpress",
            post(install_wordpress).delete(uninstall_wordpress),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_sites(State(db): State<Db>, Path(server): Path<u64>) -> Json<SitesEnvelope> {
    let store = db.read().await;
    let sites = store
        .sites
        .range((server, 0)..=(server, u64::MAX))
        .map(|(_, site)| site.clone())
        .collect();
    Json(SitesEnvelope { sites })
}

async fn create_site(
    State(db): State<Db>,
    Path(server): Path<u64>,
    Form(input): Form<CreateSite>,
) -> Result<Json<SiteEnvelope>, StatusCode> {
    if input.domain.trim().is_empty() || !PROJECT_TYPES.contains(&input.project_type.as_str()) {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let mut store = db.write().await;
    store.next_id += 1;
    let site = Site {
        id: store.next_id,
        name: input.domain,
        directory: input.directory.unwrap_or_else(|| "/public".to_string()),
        wildcards: input.wildcards.unwrap_or(false),
        status: "installing".to_string(),
        repository: None,
        repository_provider: None,
        repository_branch: None,
        repository_status: None,
        quick_deploy: false,
        project_type: input.project_type,
        app: None,
        app_status: None,
        hipchat_room: None,
        slack_channel: None,
        created_at: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };
    info!(server, site = site.id, domain = %site.name, "created site");
    store.sites.insert((server, site.id), site.clone());
    Ok(Json(SiteEnvelope { site }))
}

async fn get_site(
    State(db): State<Db>,
    Path((server, site)): Path<(u64, u64)>,
) -> Result<Json<SiteEnvelope>, StatusCode> {
    let store = db.read().await;
    store
        .sites
        .get(&(server, site))
        .cloned()
        .map(|site| Json(SiteEnvelope { site }))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_site(
    State(db): State<Db>,
    Path((server, site)): Path<(u64, u64)>,
    Form(input): Form<UpdateSite>,
) -> Result<Json<SiteEnvelope>, StatusCode> {
    let mut store = db.write().await;
    let entry = store.sites.get_mut(&(server, site)).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        entry.name = name;
    }
    if let Some(directory) = input.directory {
        entry.directory = directory;
    }
    if let Some(wildcards) = input.wildcards {
        entry.wildcards = wildcards;
    }
    debug!(server, site, "updated site");
    Ok(Json(SiteEnvelope { site: entry.clone() }))
}

async fn delete_site(
    State(db): State<Db>,
    Path((server, site)): Path<(u64, u64)>,
) -> StatusCode {
    let mut store = db.write().await;
    match store.sites.remove(&(server, site)) {
        Some(_) => {
            info!(server, site, "deleted site");
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn install_git(
    State(db): State<Db>,
    Path((server, site)): Path<(u64, u64)>,
    Form(input): Form<InstallGit>,
) -> StatusCode {
    if !GIT_PROVIDERS.contains(&input.provider.as_str()) || input.repository.is_empty() {
        return StatusCode::UNPROCESSABLE_ENTITY;
    }
    let mut store = db.write().await;
    let Some(entry) = store.sites.get_mut(&(server, site)) else {
        return StatusCode::NOT_FOUND;
    };
    entry.repository = Some(input.repository);
    entry.repository_provider = Some(input.provider);
    entry.repository_branch = Some(input.branch.unwrap_or_else(|| "master".to_string()));
    entry.repository_status = Some("installed".to_string());
    entry.app = Some("Git".to_string());
    entry.app_status = Some("installed".to_string());
    entry.status = "installed".to_string();
    debug!(server, site, composer = ?input.composer, "installed git repository");
    StatusCode::OK
}

async fn uninstall_git(
    State(db): State<Db>,
    Path((server, site)): Path<(u64, u64)>,
) -> StatusCode {
    let mut store = db.write().await;
    let Some(entry) = store.sites.get_mut(&(server, site)) else {
        return StatusCode::NOT_FOUND;
    };
    entry.repository = None;
    entry.repository_provider = None;
    entry.repository_branch = None;
    entry.repository_status = None;
    entry.app = None;
    entry.app_status = None;
    StatusCode::OK
}

async fn install_wordpress(
    State(db): State<Db>,
    Path((server, site)): Path<(u64, u64)>,
    Form(input): Form<InstallWordPress>,
) -> StatusCode {
    if input.database.is_empty() || input.user.is_empty() {
        return StatusCode::UNPROCESSABLE_ENTITY;
    }
    let mut store = db.write().await;
    let Some(entry) = store.sites.get_mut(&(server, site)) else {
        return StatusCode::NOT_FOUND;
    };
    entry.app = Some("WordPress".to_string());
    entry.app_status = Some("installed".to_string());
    entry.status = "installed".to_string();
    debug!(server, site, database = %input.database, "installed wordpress");
    StatusCode::OK
}

async fn uninstall_wordpress(
    State(db): State<Db>,
    Path((server, site)): Path<(u64, u64)>,
) -> StatusCode {
    let mut store = db.write().await;
    let Some(entry) = store.sites.get_mut(&(server, site)) else {
        return StatusCode::NOT_FOUND;
    };
    entry.app = None;
    entry.app_status = None;
    StatusCode::OK
}
