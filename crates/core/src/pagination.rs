// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::registry::{Page, SearchQuery};
use std::future::Future;
use tracing::{debug, warn};

/// Fetches every page of a search.
///
/// Page 1 is always fetched. Further pages are fetched while the accumulated
/// item count is below the total reported by the most recent page. Pages are
/// fetched sequentially since each stop decision depends on the last total.
///
/// # Arguments
///
/// * `query` - The search parameters, passed unchanged to every fetch
/// * `fetch_page` - Fetches one page by number, starting at 1
///
/// # Errors
///
/// Returns the first fetch error. No partial list is ever returned.
pub async fn aggregate_pages<T, E, F, Fut>(
    query: SearchQuery,
    mut fetch_page: F,
) -> Result<Vec<T>, E>
where
    F: FnMut(SearchQuery, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let mut page_number: u32 = 1;
    let first: Page<T> = fetch_page(query, page_number).await?;
    let mut total_count: usize = first.total_count;
    let mut items: Vec<T> = first.items;

    while items.len() < total_count {
        page_number += 1;
        let page: Page<T> = fetch_page(query, page_number).await?;
        total_count = page.total_count;

        if page.items.is_empty() {
            warn!(
                page = page_number,
                total_count,
                fetched = items.len(),
                "Registry returned an empty page before reaching the reported total"
            );
            break;
        }

        items.extend(page.items);
    }

    debug!(
        pages = page_number,
        items = items.len(),
        sort_key = query.sort_key().as_str(),
        "Aggregated paged search"
    );

    Ok(items)
}
