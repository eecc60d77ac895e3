//! Request body parsing for the media types the API accepts.

use actix_web::{HttpMessage, HttpRequest};
use serde_json::{Map, Value};

use crate::error::AppError;

pub const MEDIA_TYPES: [&str; 2] = ["application/json", "application/x-www-form-urlencoded"];

/// Parses `body` according to the request's `Content-Type`.
///
/// An empty body is an empty object. Form fields become string values,
/// the last occurrence of a repeated key wins.
pub fn parse(req: &HttpRequest, body: &[u8]) -> Result<Value, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    let content_type = || {
        req.headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned()
    };
    let mime = req
        .mime_type()
        .map_err(|_| AppError::UnsupportedMediaType(content_type()))?
        .ok_or_else(|| AppError::UnsupportedMediaType(content_type()))?;

    match mime.essence_str() {
        "application/json" => serde_json::from_slice(body)
            .map_err(|err| AppError::Parse(format!("JSON parse error - {err}"))),
        "application/x-www-form-urlencoded" => {
            let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
                .map_err(|err| AppError::Parse(format!("Form parse error - {err}")))?;
            Ok(Value::Object(
                pairs
                    .into_iter()
                    .map(|(key, value)| (key, Value::String(value)))
                    .collect(),
            ))
        }
        _ => Err(AppError::UnsupportedMediaType(content_type())),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use serde_json::json;

    use super::*;

    fn request(content_type: &str) -> HttpRequest {
        TestRequest::post()
            .insert_header(("content-type", content_type))
            .to_http_request()
    }

    #[test]
    fn parses_json_bodies() {
        let req = request("application/json; charset=utf-8");
        let value = parse(&req, br#"{"code": "print(1)", "linenos": true}"#).unwrap();
        assert_eq!(value, json!({"code": "print(1)", "linenos": true}));
    }

    #[test]
    fn parses_form_bodies() {
        let req = request("application/x-www-form-urlencoded");
        let value = parse(&req, b"code=print%281%29&linenos=on&title=a&title=b").unwrap();
        assert_eq!(value, json!({"code": "print(1)", "linenos": "on", "title": "b"}));
    }

    #[test]
    fn empty_body_is_an_empty_object() {
        let req = TestRequest::post().to_http_request();
        assert_eq!(parse(&req, b"").unwrap(), json!({}));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let req = request("application/json");
        match parse(&req, b"{not json") {
            Err(AppError::Parse(detail)) => assert!(detail.starts_with("JSON parse error - ")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn other_media_types_are_unsupported() {
        let req = request("text/plain");
        match parse(&req, b"hello") {
            Err(AppError::UnsupportedMediaType(media_type)) => assert_eq!(media_type, "text/plain"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
