use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;

use super::query::ContentQuery;
use super::resolver::{EndpointResolver, HostResolver, RequestContext};
use crate::{
    config::CmsConfig,
    domain::{Paginated, Pagination},
    error::{AppError, Result},
};

/// Upper bound on pages read by [`CmsClient::list_all_or_empty`].
const MAX_PAGES: u32 = 50;

#[derive(Deserialize)]
struct ListResponse<T> {
    data: Vec<T>,
    #[serde(default)]
    meta: Option<ListMeta>,
}

#[derive(Deserialize)]
struct ListMeta {
    #[serde(default)]
    pagination: Option<Pagination>,
}

/// Read/write access to the CMS REST API. Reads have a degrading variant that
/// turns any failure into "no content".
pub struct CmsClient {
    http: Client,
    resolver: Arc<dyn EndpointResolver>,
    api_token: Option<String>,
}

impl CmsClient {
    pub fn new(
        resolver: Arc<dyn EndpointResolver>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            resolver,
            api_token: api_token.filter(|t| !t.is_empty()),
        })
    }

    pub fn from_config(config: &CmsConfig) -> Result<Self> {
        Self::new(
            Arc::new(HostResolver::from_config(config)),
            config.api_token.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn resolver(&self) -> Arc<dyn EndpointResolver> {
        self.resolver.clone()
    }

    pub async fn list<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &ContentQuery,
    ) -> Result<Paginated<T>> {
        let mut url = self.resolver.api_url(collection, RequestContext::Server);
        let query_string = query.to_query_string();
        if !query_string.is_empty() {
            url.push('?');
            url.push_str(&query_string);
        }

        tracing::debug!("GET {}", url);
        let response = self.request(Method::GET, &url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Cms(format!(
                "GET {} returned {}",
                collection, status
            )));
        }

        let body: ListResponse<T> = response.json().await?;
        let pagination = body
            .meta
            .and_then(|m| m.pagination)
            .unwrap_or_else(|| Pagination {
                page: query.current_page(),
                page_size: query.current_page_size(),
                page_count: if body.data.is_empty() { 0 } else { 1 },
                total: body.data.len() as u64,
            });

        Ok(Paginated {
            data: body.data,
            pagination,
        })
    }

    /// Like [`CmsClient::list`], but an unreachable CMS, an error status or a
    /// malformed body all come back as an empty page.
    pub async fn list_or_empty<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &ContentQuery,
    ) -> Paginated<T> {
        match self.list(collection, query).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", collection, e);
                Paginated::empty(query.current_page(), query.current_page_size())
            }
        }
    }

    /// Every record matching `query`, following `meta.pagination` from the
    /// query's page to the last one. A failing first page gives an empty list;
    /// a failure further on keeps the pages already fetched.
    pub async fn list_all_or_empty<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &ContentQuery,
    ) -> Vec<T> {
        let mut records = Vec::new();
        let mut page = query.current_page();

        for _ in 0..MAX_PAGES {
            match self.list(collection, &query.clone().page(page)).await {
                Ok(batch) => {
                    let more = batch.pagination.page < batch.pagination.page_count
                        && !batch.data.is_empty();
                    records.extend(batch.data);
                    if !more {
                        return records;
                    }
                    page = batch.pagination.page + 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch {} page {}: {}", collection, page, e);
                    return records;
                }
            }
        }

        tracing::warn!("Stopped reading {} after {} pages", collection, MAX_PAGES);
        records
    }

    /// First record whose `field` equals `value`, if any.
    pub async fn find_one<T: DeserializeOwned>(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Option<T> {
        let query = ContentQuery::new()
            .eq(field, value)
            .page_size(1)
            .populate_all();

        self.list_or_empty(collection, &query)
            .await
            .data
            .into_iter()
            .next()
    }

    pub async fn create<B: Serialize>(&self, collection: &str, body: &B) -> Result<()> {
        let url = self.resolver.api_url(collection, RequestContext::Server);

        tracing::debug!("POST {}", url);
        let response = self
            .request(Method::POST, &url)
            .json(&json!({ "data": body }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::Cms(format!(
                "POST {} returned {}: {}",
                collection,
                status,
                detail.chars().take(200).collect::<String>()
            )));
        }

        Ok(())
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}
