//! Async client for the catalog backend.
//!
//! Every resource follows the same shape: `GET /{resource}` lists,
//! `GET /{resource}/{id}` shows, `POST` creates, `PUT` updates and
//! `DELETE` removes. Recipes are the exception: `GET /recipes/{id}` takes a
//! *machine* id and returns every recipe that machine can run.

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::wire::{ErrorBody, Item, Machine, Recipe};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Machines,
    Items,
    Recipes,
}

impl Resource {
    pub fn path(self) -> &'static str {
        match self {
            Self::Machines => "machines",
            Self::Items => "items",
            Self::Recipes => "recipes",
        }
    }

    fn singular(self) -> &'static str {
        match self {
            Self::Machines => "machine",
            Self::Items => "item",
            Self::Recipes => "recipe",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|source| CatalogError::Transport {
                url: config.base_url.clone(),
                source,
            })?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, resource: Resource, id: Option<&str>) -> String {
        match id {
            Some(id) => format!("{}/{}/{id}", self.base_url, resource.path()),
            None => format!("{}/{}", self.base_url, resource.path()),
        }
    }

    // ─── Machines ───────────────────────────────────────────────────────

    pub async fn list_machines(&self) -> Result<Vec<Machine>, CatalogError> {
        self.request(Method::GET, Resource::Machines, None, None::<&()>)
            .await
    }

    pub async fn machine(&self, id: &str) -> Result<Machine, CatalogError> {
        self.request(Method::GET, Resource::Machines, Some(id), None::<&()>)
            .await
    }

    pub async fn create_machine(&self, machine: &Machine) -> Result<Machine, CatalogError> {
        self.request(Method::POST, Resource::Machines, None, Some(machine))
            .await
    }

    pub async fn update_machine(&self, id: &str, machine: &Machine) -> Result<Machine, CatalogError> {
        self.request(Method::PUT, Resource::Machines, Some(id), Some(machine))
            .await
    }

    pub async fn delete_machine(&self, id: &str) -> Result<(), CatalogError> {
        self.delete(Resource::Machines, id).await
    }

    // ─── Items ──────────────────────────────────────────────────────────

    pub async fn list_items(&self) -> Result<Vec<Item>, CatalogError> {
        self.request(Method::GET, Resource::Items, None, None::<&()>)
            .await
    }

    pub async fn item(&self, id: &str) -> Result<Item, CatalogError> {
        self.request(Method::GET, Resource::Items, Some(id), None::<&()>)
            .await
    }

    pub async fn create_item(&self, item: &Item) -> Result<Item, CatalogError> {
        self.request(Method::POST, Resource::Items, None, Some(item))
            .await
    }

    pub async fn update_item(&self, id: &str, item: &Item) -> Result<Item, CatalogError> {
        self.request(Method::PUT, Resource::Items, Some(id), Some(item))
            .await
    }

    pub async fn delete_item(&self, id: &str) -> Result<(), CatalogError> {
        self.delete(Resource::Items, id).await
    }

    // ─── Recipes ────────────────────────────────────────────────────────

    pub async fn list_recipes(&self) -> Result<Vec<Recipe>, CatalogError> {
        self.request(Method::GET, Resource::Recipes, None, None::<&()>)
            .await
    }

    /// Recipes runnable on the given machine.
    pub async fn recipes_for_machine(&self, machine_id: &str) -> Result<Vec<Recipe>, CatalogError> {
        self.request(Method::GET, Resource::Recipes, Some(machine_id), None::<&()>)
            .await
    }

    pub async fn create_recipe(&self, recipe: &Recipe) -> Result<Recipe, CatalogError> {
        self.request(Method::POST, Resource::Recipes, None, Some(recipe))
            .await
    }

    // ─── Plumbing ───────────────────────────────────────────────────────

    async fn request<B, T>(
        &self,
        method: Method,
        resource: Resource,
        id: Option<&str>,
        body: Option<&B>,
    ) -> Result<T, CatalogError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(resource, id);
        log::debug!("{method} {url}");
        let mut builder = self.http.request(method, &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let resp = builder
            .send()
            .await
            .map_err(|source| CatalogError::Transport {
                url: url.clone(),
                source,
            })?;
        let resp = check_status(resp).await?;
        resp.json::<T>()
            .await
            .map_err(|source| CatalogError::Decode { url, source })
    }

    async fn delete(&self, resource: Resource, id: &str) -> Result<(), CatalogError> {
        let url = self.url(resource, Some(id));
        log::debug!("DELETE {url}");
        let resp = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|source| CatalogError::Transport {
                url: url.clone(),
                source,
            })?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound {
                resource: resource.singular(),
                id: id.to_string(),
            });
        }
        check_status(resp).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into [`CatalogError::Status`], preferring the
/// server's `{ "error": ... }` message over the raw body.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, CatalogError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.error,
        Err(_) if text.is_empty() => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
        Err(_) => text,
    };
    log::warn!("catalog request failed with {status}: {message}");
    Err(CatalogError::Status {
        status: status.as_u16(),
        message,
    })
}
