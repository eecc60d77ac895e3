use actix_web::HttpRequest;

/// Builds absolute hyperlinks to the API's resources.
///
/// When the request was made with a format suffix (`/snippets.json`) the
/// links carry the same suffix, except for the highlight page, which is
/// only ever rendered as `.html`.
#[derive(Debug, Clone)]
pub struct Links {
    base: String,
    suffix: String,
}

impl Links {
    pub fn new(req: &HttpRequest, format: Option<&str>) -> Self {
        let info = req.connection_info();
        Self {
            base: format!("{}://{}", info.scheme(), info.host()),
            suffix: format.map(|f| format!(".{f}")).unwrap_or_default(),
        }
    }

    fn to(&self, path: &str) -> String {
        if self.suffix.is_empty() {
            format!("{}{path}/", self.base)
        } else {
            format!("{}{path}{}", self.base, self.suffix)
        }
    }

    pub fn root(&self) -> String {
        format!("{}/{}", self.base, self.suffix)
    }

    pub fn snippet_list(&self) -> String {
        self.to("/snippets")
    }

    pub fn snippet_detail(&self, id: i64) -> String {
        self.to(&format!("/snippets/{id}"))
    }

    pub fn snippet_highlight(&self, id: i64) -> String {
        if self.suffix.is_empty() {
            format!("{}/snippets/{id}/highlight/", self.base)
        } else {
            format!("{}/snippets/{id}/highlight.html", self.base)
        }
    }

    pub fn user_list(&self) -> String {
        self.to("/users")
    }

    pub fn user_detail(&self, id: i64) -> String {
        self.to(&format!("/users/{id}"))
    }
}
