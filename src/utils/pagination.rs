use actix_web::HttpRequest;
use serde::Serialize;

use crate::error::AppError;

/// The `page` query parameter. A repeated parameter resolves to its last
/// value; a query string that cannot be decoded is an invalid page.
pub fn requested_page(req: &HttpRequest) -> Result<Option<String>, AppError> {
    let params: Vec<(String, String)> =
        serde_urlencoded::from_str(req.query_string()).map_err(|_| AppError::InvalidPage)?;
    Ok(params
        .into_iter()
        .filter(|(key, _)| key == "page")
        .map(|(_, value)| value)
        .last())
}

/// Page-number pagination over `count` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: i64,
    pub size: i64,
    pub num_pages: i64,
}

impl Page {
    /// Resolves `?page=` (a number or `last`) against the item count.
    /// An empty collection still has one empty page.
    pub fn resolve(requested: Option<&str>, count: i64, size: i64) -> Result<Self, AppError> {
        let size = size.max(1);
        let num_pages = ((count + size - 1) / size).max(1);

        let number = match requested.map(str::trim) {
            None | Some("") => 1,
            Some("last") => num_pages,
            Some(raw) => raw.parse::<i64>().map_err(|_| AppError::InvalidPage)?,
        };
        if number < 1 || number > num_pages {
            return Err(AppError::InvalidPage);
        }

        Ok(Self {
            number,
            size,
            num_pages,
        })
    }

    pub fn limit(&self) -> i64 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.size
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(req: &HttpRequest, page: Page, count: i64, results: Vec<T>) -> Self {
        let next = page
            .has_next()
            .then(|| page_url(req, Some(page.number + 1)));
        // the first page is linked without a page parameter
        let previous = page.has_previous().then(|| {
            let target = page.number - 1;
            page_url(req, (target > 1).then_some(target))
        });

        Self {
            count,
            next,
            previous,
            results,
        }
    }
}

/// The current request URL with its `page` parameter replaced (or removed).
fn page_url(req: &HttpRequest, page: Option<i64>) -> String {
    let info = req.connection_info();
    let mut params: Vec<(String, String)> =
        serde_urlencoded::from_str(req.query_string()).unwrap_or_default();
    params.retain(|(key, _)| key != "page");
    if let Some(page) = page {
        params.push(("page".into(), page.to_string()));
    }
    params.sort();

    let mut url = format!("{}://{}{}", info.scheme(), info.host(), req.path());
    if !params.is_empty() {
        if let Ok(query) = serde_urlencoded::to_string(&params) {
            url.push('?');
            url.push_str(&query);
        }
    }
    url
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    #[test]
    fn resolves_page_numbers() {
        let page = Page::resolve(None, 25, 10).unwrap();
        assert_eq!((page.number, page.offset(), page.limit()), (1, 0, 10));

        let page = Page::resolve(Some("3"), 25, 10).unwrap();
        assert_eq!(page.offset(), 20);
        assert!(!page.has_next());
        assert!(page.has_previous());

        assert_eq!(Page::resolve(Some("last"), 25, 10).unwrap().number, 3);
        assert_eq!(Page::resolve(Some(""), 25, 10).unwrap().number, 1);
    }

    #[test]
    fn repeated_page_parameter_uses_the_last_value() {
        let req = TestRequest::get()
            .uri("/snippets/?page=1&format=json&page=2")
            .to_http_request();
        assert_eq!(requested_page(&req).unwrap().as_deref(), Some("2"));

        let req = TestRequest::get().uri("/snippets/").to_http_request();
        assert_eq!(requested_page(&req).unwrap(), None);
    }

    #[test]
    fn empty_collection_has_one_page() {
        let page = Page::resolve(Some("1"), 0, 10).unwrap();
        assert_eq!(page.num_pages, 1);
        assert!(!page.has_next());
        assert!(matches!(Page::resolve(Some("2"), 0, 10), Err(AppError::InvalidPage)));
    }

    #[test]
    fn rejects_out_of_range_and_malformed_pages() {
        for raw in ["0", "-1", "4", "abc", "1.5"] {
            assert!(
                matches!(Page::resolve(Some(raw), 25, 10), Err(AppError::InvalidPage)),
                "{raw} should be invalid"
            );
        }
    }

    #[test]
    fn builds_next_and_previous_links() {
        let req = TestRequest::get()
            .uri("/snippets/?page=2&format=json")
            .insert_header(("host", "testserver"))
            .to_http_request();
        let page = Page::resolve(Some("2"), 35, 10).unwrap();

        let paginated = Paginated::new(&req, page, 35, vec![0; 10]);

        assert_eq!(
            paginated.next.as_deref(),
            Some("http://testserver/snippets/?format=json&page=3")
        );
        assert_eq!(
            paginated.previous.as_deref(),
            Some("http://testserver/snippets/?format=json")
        );
    }

    #[test]
    fn single_page_has_no_links() {
        let req = TestRequest::get().uri("/users/").to_http_request();
        let page = Page::resolve(None, 3, 10).unwrap();

        let paginated = Paginated::new(&req, page, 3, vec!["a", "b", "c"]);

        assert!(paginated.next.is_none());
        assert!(paginated.previous.is_none());
    }
}
