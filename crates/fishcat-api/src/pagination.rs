//! Page-number pagination for the samples listing.
//!
//! The envelope carries `count`, `next`, `previous` and `results`; the
//! `next`/`previous` links are relative URLs preserving the active query
//! parameters.

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u32 = 1000;
pub const MAX_PAGE_SIZE: u32 = 10_000;

/// Clamp a requested page size to the allowed range, defaulting when absent.
pub fn clamp_page_size(requested: Option<u32>) -> u32 {
    requested.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// One page of a paginated listing.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Build the envelope for `page` of the listing at `path`, carrying the
    /// extra query parameters into the navigation links.
    pub fn new(
        path: &str,
        extra: &[(&str, &str)],
        page: u32,
        page_size: u32,
        count: u64,
        results: Vec<T>,
    ) -> Self {
        let total_pages = if count == 0 {
            1
        } else {
            count.div_ceil(page_size as u64)
        };

        let next = if (page as u64) < total_pages {
            Some(page_url(path, extra, page + 1, page_size))
        } else {
            None
        };
        let previous = if page > 1 {
            Some(page_url(path, extra, page - 1, page_size))
        } else {
            None
        };

        Self {
            count,
            next,
            previous,
            results,
        }
    }
}

fn page_url(path: &str, extra: &[(&str, &str)], page: u32, page_size: u32) -> String {
    let mut url = format!("{}?page={}&page_size={}", path, page, page_size);
    for (key, value) in extra {
        url.push('&');
        url.push_str(key);
        url.push('=');
        url.push_str(value);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_defaults_when_absent() {
        assert_eq!(clamp_page_size(None), 1000);
    }

    #[test]
    fn test_page_size_clamped_to_cap() {
        assert_eq!(clamp_page_size(Some(50_000)), 10_000);
        assert_eq!(clamp_page_size(Some(0)), 1);
        assert_eq!(clamp_page_size(Some(250)), 250);
    }

    #[test]
    fn test_first_page_has_no_previous() {
        let page: Page<u32> = Page::new("/api/v1/samples", &[], 1, 10, 25, vec![]);
        assert_eq!(page.previous, None);
        assert_eq!(page.next.as_deref(), Some("/api/v1/samples?page=2&page_size=10"));
    }

    #[test]
    fn test_last_page_has_no_next() {
        let page: Page<u32> = Page::new("/api/v1/samples", &[], 3, 10, 25, vec![]);
        assert_eq!(page.next, None);
        assert_eq!(page.previous.as_deref(), Some("/api/v1/samples?page=2&page_size=10"));
    }

    #[test]
    fn test_links_preserve_extra_params() {
        let extra = [("year", "2012"), ("mu_type", "qma")];
        let page: Page<u32> = Page::new("/api/v1/samples", &extra, 2, 10, 30, vec![]);
        assert_eq!(
            page.next.as_deref(),
            Some("/api/v1/samples?page=3&page_size=10&year=2012&mu_type=qma")
        );
        assert_eq!(
            page.previous.as_deref(),
            Some("/api/v1/samples?page=1&page_size=10&year=2012&mu_type=qma")
        );
    }

    #[test]
    fn test_empty_listing_is_a_single_page() {
        let page: Page<u32> = Page::new("/api/v1/samples", &[], 1, 10, 0, vec![]);
        assert_eq!(page.count, 0);
        assert_eq!(page.next, None);
        assert_eq!(page.previous, None);
    }
}
