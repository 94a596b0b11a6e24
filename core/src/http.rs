//! HTTP request/response data and the transport seam.
//!
//! # Design
//! Requests and responses are plain data. Services build an `HttpRequest`
//! and hand it to an injected `Transport`, returning whatever pending value
//! the transport produces. The core never touches the network itself, so a
//! host can plug in any HTTP stack (or a recording stub in tests).
//!
//! All fields use owned types (`String`, `Vec`) so requests can be moved
//! onto worker threads without lifetime concerns.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `path` is the full URL (base URL plus endpoint path). `query` holds
/// query-string pairs in insertion order, unencoded; the transport is
/// responsible for encoding them.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// A request without body or query parameters.
    pub fn new(method: HttpMethod, path: String) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// A request carrying `payload` serialized as a JSON body.
    pub fn with_json<B: Serialize + ?Sized>(
        method: HttpMethod,
        path: String,
        payload: &B,
    ) -> Result<Self, ApiError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(Self {
            method,
            path,
            query: Vec::new(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Injected HTTP capability.
///
/// `send` must not block: it starts the exchange and hands back a pending
/// value (typically a future) that the caller may await, poll, or drop.
/// Services return this value untouched.
pub trait Transport {
    type Pending;

    fn send(&self, request: HttpRequest) -> Self::Pending;
}

impl<T: Transport + ?Sized> Transport for &T {
    type Pending = T::Pending;

    fn send(&self, request: HttpRequest) -> Self::Pending {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    type Pending = T::Pending;

    fn send(&self, request: HttpRequest) -> Self::Pending {
        (**self).send(request)
    }
}

/// Flatten a serializable parameter struct into query pairs.
///
/// The value must serialize to a JSON object. Optional members should be
/// skipped at serialization time; a member that still encodes to `null`
/// (including a non-finite float) is an error. Strings are used verbatim,
/// floats use Rust's shortest form (`80.0` becomes `80`) and every other
/// scalar uses its JSON text.
pub fn encode_query<P: Serialize + ?Sized>(params: &P) -> Result<Vec<(String, String)>, ApiError> {
    let value =
        serde_json::to_value(params).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    let serde_json::Value::Object(map) = value else {
        return Err(ApiError::SerializationError(
            "query parameters must serialize to an object".to_string(),
        ));
    };
    map.into_iter()
        .map(|(k, v)| match v {
            serde_json::Value::Null => Err(ApiError::SerializationError(format!(
                "query parameter `{k}` has no representable value"
            ))),
            serde_json::Value::String(s) => Ok((k, s)),
            serde_json::Value::Number(n) => {
                let text = match n.as_f64() {
                    Some(f) if n.is_f64() => f.to_string(),
                    _ => n.to_string(),
                };
                Ok((k, text))
            }
            other => Ok((k, other.to_string())),
        })
        .collect()
}

/// Map non-success status codes to the appropriate `ApiError` variant.
pub(crate) fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

pub(crate) fn decode_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    check_status(response, 200)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Params {
        score: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        correct: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    }

    #[test]
    fn encode_query_keeps_scalars_and_skips_absent_members() {
        let params = Params {
            score: 72.5,
            correct: Some(4),
            label: None,
        };
        let pairs = encode_query(&params).unwrap();
        assert!(pairs.contains(&("score".to_string(), "72.5".to_string())));
        assert!(pairs.contains(&("correct".to_string(), "4".to_string())));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn encode_query_uses_strings_verbatim() {
        let params = Params {
            score: 10.0,
            correct: None,
            label: Some("a b".to_string()),
        };
        let pairs = encode_query(&params).unwrap();
        assert!(pairs.contains(&("label".to_string(), "a b".to_string())));
    }

    #[test]
    fn encode_query_writes_whole_floats_without_fraction() {
        let params = Params {
            score: 80.0,
            correct: Some(5),
            label: None,
        };
        let pairs = encode_query(&params).unwrap();
        assert!(pairs.contains(&("score".to_string(), "80".to_string())));
        assert!(pairs.contains(&("correct".to_string(), "5".to_string())));
    }

    #[test]
    fn encode_query_rejects_null_members() {
        #[derive(Serialize)]
        struct Loose {
            score: f64,
            label: Option<String>,
        }
        let err = encode_query(&Loose {
            score: 1.0,
            label: None,
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::SerializationError(_)));
    }

    #[test]
    fn encode_query_rejects_non_finite_floats() {
        for score in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let params = Params {
                score,
                correct: None,
                label: None,
            };
            assert!(matches!(
                encode_query(&params),
                Err(ApiError::SerializationError(_))
            ));
        }
    }

    #[test]
    fn encode_query_rejects_non_objects() {
        let err = encode_query(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, ApiError::SerializationError(_)));
    }

    #[test]
    fn with_json_sets_content_type() {
        let payload = serde_json::json!({ "a": 1 });
        let req = HttpRequest::with_json(HttpMethod::Post, "/x".to_string(), &payload).unwrap();
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        assert_eq!(req.body.as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn check_status_maps_404_to_not_found() {
        let response = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(matches!(check_status(&response, 200), Err(ApiError::NotFound)));
    }

    #[test]
    fn decode_json_reports_bad_body() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "not json".to_string(),
        };
        let err = decode_json::<Vec<i32>>(&response).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn method_display_is_uppercase() {
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }
}
