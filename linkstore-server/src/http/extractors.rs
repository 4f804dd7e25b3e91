//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde_json::{Map, Value as JsonValue};

use super::error::ApiError;
use crate::models::ValidationError;

/// First `id` in the query string, empty when absent.
///
/// Repeated keys are allowed; later values are ignored.
async fn id_from_query<S>(parts: &mut Parts, state: &S) -> Result<String, ApiError>
where
    S: Send + Sync,
{
    let Query(pairs): Query<Vec<(String, String)>> = Query::from_request_parts(parts, state)
        .await
        .map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "query",
                reason: "could not parse query string",
            })
        })?;

    Ok(pairs
        .into_iter()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value)
        .unwrap_or_default())
}

/// Extract the `id` query parameter, rejecting a missing or empty value
pub struct RequiredLinkId(pub String);

impl<S> FromRequestParts<S> for RequiredLinkId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let id = id_from_query(parts, state).await?;
        if id.is_empty() {
            return Err(ApiError::Validation(ValidationError::Empty { field: "id" }));
        }
        Ok(Self(id))
    }
}

/// Extract the `id` query parameter, empty when absent
pub struct OptionalLinkId(pub String);

impl<S> FromRequestParts<S> for OptionalLinkId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        id_from_query(parts, state).await.map(Self)
    }
}

/// Link request body: a JSON object with optional `label` and `data`
///
/// The content type is not checked. Fields other than `label` and `data` are
/// ignored; a missing `data` is JSON null.
#[derive(Debug)]
pub struct LinkBody {
    pub label: Option<JsonValue>,
    pub data: JsonValue,
}

impl LinkBody {
    fn from_slice(bytes: &[u8]) -> Result<Self, ValidationError> {
        let mut object: Map<String, JsonValue> =
            serde_json::from_slice(bytes).map_err(|_| ValidationError::InvalidFormat {
                field: "request body",
                reason: "must be a JSON object",
            })?;

        Ok(Self {
            label: object.remove("label"),
            data: object.remove("data").unwrap_or(JsonValue::Null),
        })
    }
}

impl<S> FromRequest<S> for LinkBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "request body",
                reason: "could not be read",
            })
        })?;

        Ok(Self::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_with_label_and_data() {
        let body = LinkBody::from_slice(br#"{"label":"home","data":{"url":"x"}}"#).unwrap();
        assert_eq!(body.label, Some(json!("home")));
        assert_eq!(body.data, json!({"url": "x"}));
    }

    #[test]
    fn missing_data_is_null() {
        let body = LinkBody::from_slice(br#"{"label":"home"}"#).unwrap();
        assert_eq!(body.data, JsonValue::Null);
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(LinkBody::from_slice(br#"["home", 1]"#).is_err());
        assert!(LinkBody::from_slice(b"not json").is_err());
        assert!(LinkBody::from_slice(b"").is_err());
    }
}
