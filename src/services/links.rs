//! Link management
//!
//! All reads and writes of link records go through [`LinkService`]; the
//! HTTP handlers only translate between JSON bodies and these calls.
//! Errors carry their HTTP status via `LinkgateError::http_status`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{LinkgateError, Result};
use crate::storage::{KvStore, LinkMetadata, LinkRecord};
use crate::utils::url::normalize_url;
use crate::utils::{generate_random_code, is_valid_path};

/// How long after creation a link may still be edited without admin
/// credentials.
const EDIT_WINDOW_MS: i64 = 5 * 60 * 1000;

/// Upper bound on keys enumerated per listing.
const LIST_KEY_LIMIT: usize = 1000;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkInput {
    pub url: Option<String>,
    pub custom_path: Option<String>,
    pub embeds: Option<bool>,
    pub metadata: Option<LinkMetadata>,
    pub cloaking: Option<bool>,
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedLink {
    pub original_url: String,
    pub path: String,
    pub short_url: String,
    pub editable: bool,
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLinkInput {
    pub path: Option<String>,
    pub url: Option<String>,
    pub new_path: Option<String>,
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedLink {
    pub message: String,
    pub path: String,
    pub new_url: String,
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSummary {
    pub path: String,
    pub short_url: String,
    pub original_url: String,
    pub created_at: Option<i64>,
    pub embeds: bool,
    pub cloaking: bool,
    pub metadata: Option<LinkMetadata>,
    pub domain: Option<String>,
}

pub struct LinkService {
    store: Arc<dyn KvStore>,
    random_path_length: usize,
}

impl LinkService {
    pub fn new(store: Arc<dyn KvStore>, random_path_length: usize) -> Self {
        Self {
            store,
            random_path_length,
        }
    }

    pub fn store(&self) -> &Arc<dyn KvStore> {
        &self.store
    }

    /// Create a new short link.
    ///
    /// `request_host` is used for the composed short URL when the link has
    /// no explicit domain; `allowed_domains` is the configured allow-list.
    pub async fn create(
        &self,
        input: CreateLinkInput,
        request_host: &str,
        allowed_domains: &[String],
    ) -> Result<CreatedLink> {
        let url = normalize_url(input.url.as_deref().unwrap_or(""))?;

        if let Some(custom) = input.custom_path.as_deref()
            && !custom.is_empty()
            && !is_valid_path(custom)
        {
            return Err(LinkgateError::validation(
                "Custom path can only contain letters, numbers, slashes, and dashes.",
            ));
        }

        let path = match input.custom_path.as_deref() {
            Some(custom) if !custom.is_empty() => custom.to_string(),
            _ => generate_random_code(self.random_path_length),
        };

        // Check-then-put; a concurrent create racing this one is accepted.
        if self.store.get(&path).await?.is_some() {
            return Err(LinkgateError::conflict(format!(
                "The path \"{path}\" is already in use. Please choose another."
            )));
        }

        let domain = match input.domain {
            Some(ref d) if !d.is_empty() => {
                validate_domain(d, allowed_domains)?;
                Some(d.clone())
            }
            _ => None,
        };

        let record = LinkRecord {
            url: url.clone(),
            created_at: Some(chrono::Utc::now().timestamp_millis()),
            embeds: Some(input.embeds == Some(true)),
            metadata: input.metadata,
            cloaking: input.cloaking == Some(true),
            domain: domain.clone(),
        };

        self.store.put(&path, &record.to_json()?).await?;
        info!("Created link {} -> {}", path, url);

        let base_host = domain.as_deref().unwrap_or(request_host);
        Ok(CreatedLink {
            original_url: url,
            path: path.clone(),
            short_url: format!("https://{base_host}/{path}"),
            editable: true,
            domain,
        })
    }

    /// Update an existing link, optionally renaming it.
    ///
    /// Non-admin callers are held to the self-edit window measured from
    /// the record's creation time; the update keeps that time, so editing
    /// never extends the window.
    pub async fn update(
        &self,
        input: UpdateLinkInput,
        is_admin: bool,
        allowed_domains: &[String],
    ) -> Result<UpdatedLink> {
        let path = match input.path.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => {
                return Err(LinkgateError::validation(
                    "A valid path and URL are required.",
                ));
            }
        };
        let url = normalize_url(input.url.as_deref().unwrap_or(""))
            .map_err(|_| LinkgateError::validation("A valid path and URL are required."))?;

        let raw = self
            .store
            .get(path)
            .await?
            .ok_or_else(|| LinkgateError::not_found("The specified path does not exist."))?;
        let record = LinkRecord::from_json(&raw)?;

        if !is_admin {
            let editable = record
                .created_at
                .is_some_and(|ts| chrono::Utc::now().timestamp_millis() - ts <= EDIT_WINDOW_MS);
            if !editable {
                return Err(LinkgateError::forbidden("This link is no longer editable."));
            }
        }

        let mut target = path.to_string();
        if let Some(new_path) = input.new_path.as_deref()
            && !new_path.is_empty()
            && new_path != path
        {
            if !is_valid_path(new_path) {
                return Err(LinkgateError::validation(
                    "New path can only contain letters, numbers, slashes, and dashes.",
                ));
            }
            if self.store.get(new_path).await?.is_some() {
                return Err(LinkgateError::conflict(format!(
                    "The new path \"{new_path}\" is already in use."
                )));
            }
            target = new_path.to_string();
        }

        let domain = match input.domain {
            Some(ref d) if !d.is_empty() => {
                validate_domain(d, allowed_domains)?;
                Some(d.clone())
            }
            _ => record.domain.clone(),
        };

        let updated = LinkRecord {
            url: url.clone(),
            // Keep the original creation time so the edit window is not reset.
            created_at: record
                .created_at
                .or_else(|| Some(chrono::Utc::now().timestamp_millis())),
            embeds: record.embeds,
            metadata: record.metadata,
            cloaking: record.cloaking,
            domain: domain.clone(),
        };

        // Write the new key before deleting the old one; a crash in
        // between leaves a duplicate rather than losing the link.
        self.store.put(&target, &updated.to_json()?).await?;
        if target != path {
            self.store.delete(path).await?;
        }
        info!("Updated link {} -> {}", target, url);

        Ok(UpdatedLink {
            message: "Link updated successfully.".to_string(),
            path: target,
            new_url: url,
            domain,
        })
    }

    /// Delete a link. Deleting an absent path succeeds.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.store.delete(path).await?;
        info!("Deleted link {}", path);
        Ok(())
    }

    /// List stored links, skipping unparsable records.
    ///
    /// Entries without an explicit domain take the request host as their
    /// effective domain for both filtering and the composed short URL.
    pub async fn list(
        &self,
        filter_domain: Option<&str>,
        request_host: &str,
    ) -> Result<Vec<LinkSummary>> {
        let keys = self.store.keys(LIST_KEY_LIMIT).await?;
        let mut links = Vec::new();

        for key in keys {
            let Some(raw) = self.store.get(&key).await? else {
                continue;
            };
            let Ok(record) = LinkRecord::from_json(&raw) else {
                debug!("Skipping unparsable record at {}", key);
                continue;
            };

            let effective_domain = record.domain.as_deref().unwrap_or(request_host);
            if let Some(filter) = filter_domain
                && effective_domain != filter
            {
                continue;
            }

            links.push(LinkSummary {
                short_url: format!("https://{effective_domain}/{key}"),
                path: key,
                original_url: record.url,
                created_at: record.created_at,
                embeds: record.embeds.unwrap_or(false),
                cloaking: record.cloaking,
                metadata: record.metadata,
                domain: record.domain,
            });
        }

        Ok(links)
    }

    /// Look up a record for redirecting. A stored value that does not
    /// parse, or parses without a usable destination, resolves to `None`.
    pub async fn resolve(&self, path: &str) -> Result<Option<LinkRecord>> {
        let Some(raw) = self.store.get(path).await? else {
            return Ok(None);
        };
        match LinkRecord::from_json(&raw) {
            Ok(record) if !record.url.is_empty() => Ok(Some(record)),
            Ok(_) => Ok(None),
            Err(e) => {
                debug!("Malformed record at {}: {}", path, e);
                Ok(None)
            }
        }
    }
}

fn validate_domain(domain: &str, allowed: &[String]) -> Result<()> {
    if !allowed.is_empty() && !allowed.iter().any(|d| d == domain) {
        return Err(LinkgateError::validation(
            "The specified domain is not allowed.",
        ));
    }
    Ok(())
}
