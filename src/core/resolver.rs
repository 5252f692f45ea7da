use crate::config::site::{AddressLayout, SiteConfig};
use crate::core::extract::{self, create_selector};
use crate::domain::model::{IdentityQuery, Resolution};
use crate::domain::ports::{PageFetcher, Resolver};
use crate::utils::error::{LookupError, Result};
use async_trait::async_trait;
use scraper::Selector;
use url::Url;

/// Two-stage lookup: search by name and personal number, then follow the single
/// hit to its detail page and read the postal address.
pub struct SiteResolver<F: PageFetcher> {
    fetcher: F,
    base_url: Url,
    search_url: Url,
    param_names: [String; 3],
    result_selector: Selector,
    address_selector: Selector,
    address_layout: AddressLayout,
}

impl<F: PageFetcher> SiteResolver<F> {
    pub fn new(fetcher: F, config: &SiteConfig) -> Result<Self> {
        let base_url = Url::parse(&config.site.base_url)?;
        let search_url = base_url.join(&config.search.path)?;
        let params = &config.search.params;

        Ok(Self {
            fetcher,
            base_url,
            search_url,
            param_names: [
                params.first_name.clone(),
                params.last_name.clone(),
                params.national_id.clone(),
            ],
            result_selector: create_selector(&config.search.result_selector)?,
            address_selector: create_selector(&config.address.selector)?,
            address_layout: config.address.clone(),
        })
    }

    pub fn search_url_for(&self, query: &IdentityQuery) -> Url {
        let mut url = self.search_url.clone();
        let [first, last, id] = &self.param_names;
        url.query_pairs_mut()
            .append_pair(first, &query.first_name)
            .append_pair(last, &query.last_name)
            .append_pair(id, &query.national_id);
        url
    }

    async fn fetch_page(&self, url: &Url) -> std::result::Result<String, Resolution> {
        self.fetcher.fetch(url).await.map_err(|e| {
            if e.is_transport() {
                Resolution::FetchFailed(e)
            } else {
                Resolution::ParseFailed(e)
            }
        })
    }

    async fn try_resolve(&self, query: &IdentityQuery) -> std::result::Result<Resolution, Resolution> {
        let search_url = self.search_url_for(query);
        tracing::debug!("Querying {} for {}", search_url, query);

        let search_page = self.fetch_page(&search_url).await?;
        let hits = extract::search_hits(&search_page, &self.result_selector);

        let href = match hits.as_slice() {
            [] => {
                tracing::debug!("No result for {}", query);
                return Ok(Resolution::NotFound);
            }
            [only] => only
                .as_deref()
                .ok_or_else(|| Resolution::ParseFailed(LookupError::markup("search hit without href")))?,
            many => {
                tracing::debug!("Found {} results for {}", many.len(), query);
                return Ok(Resolution::Ambiguous {
                    candidates: many.len(),
                });
            }
        };

        let address_url = self
            .base_url
            .join(href)
            .map_err(|e| Resolution::ParseFailed(LookupError::UrlError(e)))?;
        tracing::debug!("Fetching address page {}", address_url);

        let address_page = self.fetch_page(&address_url).await?;
        let address =
            extract::postal_address(&address_page, &self.address_selector, &self.address_layout)
                .map_err(Resolution::ParseFailed)?;

        Ok(Resolution::Resolved(address))
    }
}

#[async_trait]
impl<F: PageFetcher> Resolver for SiteResolver<F> {
    async fn resolve(&self, query: &IdentityQuery) -> Resolution {
        match self.try_resolve(query).await {
            Ok(resolution) | Err(resolution) => resolution,
        }
    }
}
