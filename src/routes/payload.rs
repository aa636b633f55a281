use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::uploads::Upload;

/// Create/update request body.
///
/// Accepts either a JSON document or a `multipart/form-data` form. Form text
/// fields are collected into a JSON object of strings before decoding into
/// `T`, so the input types only need to tolerate string-typed values. The
/// first non-empty file part, if any, is returned as `upload`.
pub struct Payload<T> {
    pub data: T,
    pub upload: Option<Upload>,
}

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.starts_with("multipart/form-data"));

        if !is_multipart {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(|e| AppError::Payload(e.body_text()))?;
            let data =
                serde_json::from_slice(&body).map_err(|e| AppError::Payload(e.to_string()))?;
            return Ok(Self { data, upload: None });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::Payload(e.body_text()))?;

        let mut fields = Map::new();
        let mut upload = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Payload(e.body_text()))?
        {
            if let Some(file_name) = field.file_name().map(str::to_owned) {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Payload(e.body_text()))?;
                // Browsers send an empty part when no file was picked
                if !bytes.is_empty() && upload.is_none() {
                    upload = Some(Upload { file_name, bytes });
                }
                continue;
            }

            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            let text = field
                .text()
                .await
                .map_err(|e| AppError::Payload(e.body_text()))?;
            fields.insert(name, Value::String(text));
        }

        let data = serde_json::from_value(Value::Object(fields))
            .map_err(|e| AppError::Payload(e.to_string()))?;

        Ok(Self { data, upload })
    }
}
