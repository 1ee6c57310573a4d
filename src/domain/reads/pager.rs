//! Fills a client page from several provider pages.
use std::future::Future;

use log::debug;

use crate::{
    constants::MAX_PROVIDER_PAGE_FETCHES,
    models::{ProviderPage, RelayError},
};

#[derive(Debug, Clone, PartialEq)]
pub struct FilledPage<T> {
    pub items: Vec<T>,
    /// Last provider page consulted.
    pub current_page: u32,
    pub has_more: bool,
}

/// Fetches provider pages starting at `start_page` until `page_size` items
/// are collected, the provider reports no next page, or the fetch budget
/// runs out. `fetch` returns items already filtered for the client.
///
/// Provider pages are taken whole. A page that would overflow `page_size`
/// is left for the next request, so `current_page + 1` always resumes
/// exactly where this page ended. The first page is always taken.
pub async fn fill_page<T, F, Fut>(
    start_page: u32,
    page_size: usize,
    mut fetch: F,
) -> Result<FilledPage<T>, RelayError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<ProviderPage<T>, RelayError>>,
{
    let mut items: Vec<T> = Vec::new();
    let mut page = start_page.max(1);
    let mut fetches = 0;

    loop {
        let provider_page = fetch(page).await?;
        fetches += 1;

        if !items.is_empty() && items.len() + provider_page.items.len() > page_size {
            debug!(
                "Filled {} items, provider page {page} deferred to the next request",
                items.len()
            );
            return Ok(FilledPage {
                items,
                current_page: page - 1,
                has_more: true,
            });
        }
        items.extend(provider_page.items);

        let has_more = provider_page.has_next_page;
        if items.len() >= page_size || !has_more || fetches >= MAX_PROVIDER_PAGE_FETCHES {
            debug!("Filled {} items after {} provider pages", items.len(), fetches);
            return Ok(FilledPage {
                items,
                current_page: page,
                has_more,
            });
        }
        page += 1;
    }
}
