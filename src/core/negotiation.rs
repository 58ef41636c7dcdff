use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use crate::core::library::LibraryResult;

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_XML: &str = "application/xml";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

// Representation is the wire format chosen for a response body
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub(crate) enum Representation {
    #[default]
    Json,
    Xml,
}

impl Representation {
    pub fn content_type(&self) -> &'static str {
        match self {
            Representation::Json => APPLICATION_JSON,
            Representation::Xml => APPLICATION_XML,
        }
    }

    // Suffix on the path wins over the Accept header.
    pub fn negotiate(path: &str, headers: &HeaderMap) -> Self {
        if let (_, Some(repr)) = split_suffix(path) {
            return repr;
        }
        Representation::from_accept(headers.get(ACCEPT).and_then(|v| v.to_str().ok()))
    }

    pub fn from_accept(accept: Option<&str>) -> Self {
        let accept = match accept {
            Some(accept) if !accept.trim().is_empty() => accept,
            _ => return Representation::default(),
        };
        let mut best: Option<(f32, Representation)> = None;
        for range in accept.split(',') {
            let mut parts = range.split(';');
            let media_type = parts.next().unwrap_or("").trim().to_ascii_lowercase();
            let quality = parts
                .filter_map(|p| p.split_once('='))
                .filter(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
                .filter_map(|(_, q)| q.trim().parse::<f32>().ok())
                .next()
                .unwrap_or(1.0);
            if quality <= 0.0 {
                continue;
            }
            if let Some(repr) = Representation::from_media_type(media_type.as_str()) {
                match best {
                    Some((q, _)) if q >= quality => {}
                    _ => best = Some((quality, repr)),
                }
            }
        }
        best.map(|(_, repr)| repr).unwrap_or_default()
    }

    fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            APPLICATION_JSON | "*/*" | "application/*" => Some(Representation::Json),
            APPLICATION_XML | "text/xml" => Some(Representation::Xml),
            other if other.ends_with("+json") => Some(Representation::Json),
            other if other.ends_with("+xml") => Some(Representation::Xml),
            _ => None,
        }
    }

    pub fn encode<T: Serialize>(&self, xml_root: &str, value: &T) -> LibraryResult<Vec<u8>> {
        match self {
            Representation::Json => Ok(serde_json::to_vec(value)?),
            Representation::Xml => {
                let body = quick_xml::se::to_string_with_root(xml_root, value)?;
                Ok(format!("{}{}", XML_DECLARATION, body).into_bytes())
            }
        }
    }

    pub fn respond(&self, status: StatusCode, body: Vec<u8>) -> Response {
        (status, [(CONTENT_TYPE, HeaderValue::from_static(self.content_type()))], body).into_response()
    }
}

// Strips a trailing `.json`/`.xml` from a path or path segment.
pub(crate) fn split_suffix(path: &str) -> (&str, Option<Representation>) {
    if let Some(stem) = path.strip_suffix(".json") {
        (stem, Some(Representation::Json))
    } else if let Some(stem) = path.strip_suffix(".xml") {
        (stem, Some(Representation::Xml))
    } else {
        (path, None)
    }
}

// Whether a request Content-Type names a JSON document.
pub(crate) fn is_json_content(headers: &HeaderMap) -> bool {
    match headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
        None => true,
        Some(value) => {
            let media_type = value.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
            media_type == APPLICATION_JSON || media_type.ends_with("+json")
        }
    }
}
