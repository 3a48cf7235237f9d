use super::request::unescape_path;
use super::SonarClient;
use crate::errors::{ApiError, DecodeError, SonarError};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, Request, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Statuses which SonarQube uses for successful responses.
const SUCCESS: [StatusCode; 5] = [
    StatusCode::OK,
    StatusCode::CREATED,
    StatusCode::ACCEPTED,
    StatusCode::NO_CONTENT,
    StatusCode::NOT_MODIFIED,
];

/// What to do with the body of a successful response.
pub enum Destination<'a> {
    /// Keep the body for [Response::json].
    Json,
    /// Ask for `text/plain` and keep the body for [Response::text].
    Text,
    /// Copy the body into a sink, e.g. a file, as it arrives.
    Writer(&'a mut (dyn AsyncWrite + Unpin + Send)),
    /// Ignore the body.
    Discard,
}

impl fmt::Debug for Destination<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Json => f.write_str("Json"),
            Destination::Text => f.write_str("Text"),
            Destination::Writer(_) => f.write_str("Writer"),
            Destination::Discard => f.write_str("Discard"),
        }
    }
}

/// Everything about a response except its body.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    pub method: Method,
    pub url: url::Url,
    /// Path of [Self::url] with percent-escapes decoded.
    pub path: String,
    pub status: StatusCode,
    pub headers: HeaderMap,
}

/// A successful response.
#[derive(Debug)]
pub struct Response {
    meta: ResponseMeta,
    body: Bytes,
}

impl Response {
    pub fn status(&self) -> StatusCode {
        self.meta.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.meta.headers
    }

    pub fn meta(&self) -> &ResponseMeta {
        &self.meta
    }

    /// The body as received. Empty for [Destination::Writer] and [Destination::Discard].
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, SonarError> {
        serde_json::from_slice(&self.body).map_err(|e| self.decode_error(e.into()))
    }

    /// The body as a string, verbatim.
    pub fn text(&self) -> Result<String, SonarError> {
        String::from_utf8(self.body.to_vec()).map_err(|e| self.decode_error(e.into()))
    }

    pub(crate) fn decode_error(&self, source: DecodeError) -> SonarError {
        SonarError::Decode {
            response: Box::new(self.meta.clone()),
            source,
        }
    }
}

impl SonarClient {
    /// Send a request and handle its response according to `destination`.
    ///
    /// Statuses other than 200, 201, 202, 204 and 304 produce
    /// [SonarError::Api] with a message taken from the response body.
    pub async fn execute(
        &self,
        mut request: Request,
        destination: Destination<'_>,
    ) -> Result<Response, SonarError> {
        if let Destination::Text = destination {
            request
                .headers_mut()
                .insert(ACCEPT, HeaderValue::from_static("text/plain"));
        }
        let method = request.method().clone();
        let url = request.url().clone();
        let path = unescape_path(&url)?.into_owned();

        log::debug!("{} {}", method, url);
        let res = self.client.execute(request).await?;
        let meta = ResponseMeta {
            method,
            url,
            path,
            status: res.status(),
            headers: res.headers().clone(),
        };
        log::debug!("{} {} -> {}", meta.method, meta.path, meta.status);

        if !SUCCESS.contains(&meta.status) {
            return Err(api_error(meta, res).await);
        }

        let body = match destination {
            Destination::Json | Destination::Text => res.bytes().await?,
            Destination::Writer(writer) => {
                copy_body(res, writer).await?;
                Bytes::new()
            }
            Destination::Discard => Bytes::new(),
        };
        Ok(Response { meta, body })
    }
}

async fn copy_body(
    mut res: reqwest::Response,
    writer: &mut (dyn AsyncWrite + Unpin + Send),
) -> Result<(), SonarError> {
    let mut written = 0;
    while let Some(chunk) = res.chunk().await? {
        writer.write_all(&chunk).await?;
        written += chunk.len();
    }
    writer.flush().await?;
    log::trace!("copied {} bytes", written);
    Ok(())
}

async fn api_error(meta: ResponseMeta, res: reqwest::Response) -> SonarError {
    let message = match res.bytes().await {
        Ok(body) => error_message(&body),
        Err(e) => unreadable_body(&e),
    };
    log::debug!("{} {}: {}", meta.method, meta.path, message);
    ApiError {
        response: meta,
        message,
    }
    .into()
}

/// Message of an error response whose body could not be received.
fn unreadable_body(error: &dyn std::error::Error) -> String {
    format!("failed to read response body: {}", error)
}

/// Best-effort human readable message from an error response body.
pub(crate) fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => format_error(&value),
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}

fn format_error(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(format_error).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let mut entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{{{}: {}}}", k, format_error(v)))
                .collect();
            entries.sort();
            entries.join(", ")
        }
        other => format!("failed to parse unexpected type: {}", type_name(other)),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
