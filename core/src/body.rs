//! Request body serialization by declared content type.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::{ContentType, FormPart, FormValue, RequestBody};
use crate::query::Query;

/// A request payload before encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Value(Value),
    Form(FormData),
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Body::Value(value)
    }
}

impl From<FormData> for Body {
    fn from(form: FormData) -> Self {
        Body::Form(form)
    }
}

/// Multipart form under construction. File parts are carried as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    parts: Vec<FormPart>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.parts.push(FormPart {
            name: name.to_string(),
            value: FormValue::Text(value.into()),
        });
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, mime: &str, bytes: Vec<u8>) -> Self {
        self.parts.push(FormPart {
            name: name.to_string(),
            value: FormValue::File {
                file_name: file_name.to_string(),
                mime: mime.to_string(),
                bytes,
            },
        });
        self
    }

    /// Flatten a JSON object: strings raw, other scalars as text, nested
    /// objects and arrays as JSON text, `null` dropped.
    pub fn from_json(value: &Value) -> Result<Self, ApiError> {
        let object = value.as_object().ok_or_else(|| {
            ApiError::Serialization(format!("form data must be a JSON object, got {value}"))
        })?;
        let mut form = FormData::new();
        for (name, value) in object {
            form = match value {
                Value::Null => continue,
                Value::String(text) => form.text(name, text.as_str()),
                other => form.text(name, other.to_string()),
            };
        }
        Ok(form)
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<FormPart> {
        self.parts
    }
}

/// Encode `body` for the wire according to `content_type`.
pub fn encode_body(content_type: ContentType, body: Body) -> Result<RequestBody, ApiError> {
    match (content_type, body) {
        (_, Body::Value(Value::Null)) => Ok(RequestBody::Empty),
        (ContentType::Json, Body::Value(value)) => serde_json::to_string(&value)
            .map(RequestBody::Text)
            .map_err(|e| ApiError::Serialization(e.to_string())),
        (ContentType::Text, Body::Value(Value::String(text))) => Ok(RequestBody::Text(text)),
        (ContentType::Text, Body::Value(value)) => Ok(RequestBody::Text(value.to_string())),
        (ContentType::FormData, Body::Value(value)) => {
            Ok(RequestBody::Multipart(FormData::from_json(&value)?.into_parts()))
        }
        (ContentType::FormData, Body::Form(form)) => Ok(RequestBody::Multipart(form.into_parts())),
        (ContentType::UrlEncoded, Body::Value(value)) => {
            Ok(RequestBody::Text(Query::from_json(&value)?.encode()))
        }
        (other, Body::Form(_)) => Err(ApiError::Serialization(format!(
            "form data cannot be sent as {}",
            other.mime()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_body_is_stringified() {
        let body = encode_body(ContentType::Json, json!({"name": "x"}).into()).unwrap();
        assert_eq!(body, RequestBody::Text(r#"{"name":"x"}"#.to_string()));
    }

    #[test]
    fn json_body_round_trips() {
        let input = json!({"code": "SPRING", "percent": 20, "tags": ["a", "b"], "meta": {"k": null}});
        let body = encode_body(ContentType::Json, input.clone().into()).unwrap();
        let back: Value = serde_json::from_str(body.as_text().unwrap()).unwrap();
        assert_eq!(back, input);
    }

    #[test]
    fn null_produces_no_body() {
        for content_type in [ContentType::Json, ContentType::Text, ContentType::FormData] {
            let body = encode_body(content_type, Value::Null.into()).unwrap();
            assert!(body.is_empty());
        }
    }

    #[test]
    fn text_body_passes_strings_through() {
        let body = encode_body(ContentType::Text, json!("raw text").into()).unwrap();
        assert_eq!(body, RequestBody::Text("raw text".to_string()));
        let body = encode_body(ContentType::Text, json!({"a": 1}).into()).unwrap();
        assert_eq!(body, RequestBody::Text(r#"{"a":1}"#.to_string()));
    }

    #[test]
    fn form_data_flattens_objects() {
        let input = json!({"name": "Court 1", "capacity": 10, "meta": {"indoor": true}, "gone": null});
        let body = encode_body(ContentType::FormData, input.into()).unwrap();
        let RequestBody::Multipart(parts) = body else {
            panic!("expected multipart body");
        };
        let rendered: Vec<(&str, &FormValue)> =
            parts.iter().map(|p| (p.name.as_str(), &p.value)).collect();
        assert_eq!(
            rendered,
            vec![
                ("name", &FormValue::Text("Court 1".to_string())),
                ("capacity", &FormValue::Text("10".to_string())),
                ("meta", &FormValue::Text(r#"{"indoor":true}"#.to_string())),
            ]
        );
    }

    #[test]
    fn explicit_form_keeps_file_parts() {
        let form = FormData::new()
            .text("caption", "team photo")
            .file("photo", "team.png", "image/png", vec![0x89, 0x50]);
        let body = encode_body(ContentType::FormData, form.into()).unwrap();
        let RequestBody::Multipart(parts) = body else {
            panic!("expected multipart body");
        };
        assert_eq!(parts.len(), 2);
        assert_eq!(
            parts[1].value,
            FormValue::File {
                file_name: "team.png".to_string(),
                mime: "image/png".to_string(),
                bytes: vec![0x89, 0x50],
            }
        );
    }

    #[test]
    fn url_encoded_reuses_query_encoder() {
        let body = encode_body(
            ContentType::UrlEncoded,
            json!({"grant": "refresh token", "scope": ["a", "b"]}).into(),
        )
        .unwrap();
        assert_eq!(
            body,
            RequestBody::Text("grant=refresh%20token&scope=a&scope=b".to_string())
        );
    }

    #[test]
    fn form_under_json_is_rejected() {
        let err = encode_body(ContentType::Json, FormData::new().into()).unwrap_err();
        assert!(matches!(err, ApiError::Serialization(_)));
    }
}
