//! Inert HTTP request descriptors.
//!
//! A [`StoreRequest`] says what to call and how to read the answer; it never
//! touches the network. Hand it to [`StoreClient::send`](crate::clients::StoreClient::send)
//! or any other [`Transport`](crate::clients::Transport) to run it.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Put => http::Method::PUT,
            Method::Post => http::Method::POST,
            Method::Delete => http::Method::DELETE,
        }
    }
}

/// Query string parameters, kept sorted so descriptors compare stably.
pub type RequestParams = BTreeMap<String, String>;

/// JSON object sent as the request payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBody(Map<String, Value>);

impl RequestBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` when `value` is present; `None` leaves the body untouched.
    pub fn set<V: Into<Value>>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.0.insert(key.to_string(), value.into());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

pub type Decoder<T> = fn(Value) -> Result<T>;

/// A resource the store API exposes as a collection under [`Resource::PATH`].
pub trait Resource: Sized {
    /// Human readable name used in decode errors.
    const NAME: &'static str;
    /// Collection path, e.g. `/inventories`.
    const PATH: &'static str;

    fn from_payload(payload: Value) -> Result<Self>;

    fn from_payload_list(payload: Value) -> Result<Vec<Self>> {
        match payload {
            Value::Array(items) => items.into_iter().map(Self::from_payload).collect(),
            other => Err(Error::decode(
                Self::NAME,
                serde::de::Error::custom(format!("expected an array, found {}", kind(&other))),
            )),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Borrowed view of a descriptor, independent of what it decodes to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawRequest<'a> {
    pub method: Method,
    pub uri: &'a str,
    pub params: Option<&'a RequestParams>,
    pub body: Option<&'a RequestBody>,
}

pub struct StoreRequest<T> {
    method: Method,
    uri: String,
    params: Option<RequestParams>,
    body: Option<RequestBody>,
    decode: Decoder<T>,
}

impl<T> StoreRequest<T> {
    pub fn new(
        method: Method,
        uri: impl Into<String>,
        params: Option<RequestParams>,
        body: Option<RequestBody>,
        decode: Decoder<T>,
    ) -> Self {
        Self {
            method,
            uri: uri.into(),
            params,
            body,
            decode,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn params(&self) -> Option<&RequestParams> {
        self.params.as_ref()
    }

    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    pub fn raw(&self) -> RawRequest<'_> {
        RawRequest {
            method: self.method,
            uri: &self.uri,
            params: self.params.as_ref(),
            body: self.body.as_ref(),
        }
    }

    /// Runs the response decoder over a raw payload.
    pub fn decode(&self, payload: Value) -> Result<T> {
        (self.decode)(payload)
    }
}

impl<R: Resource> StoreRequest<R> {
    /// `GET <PATH>/<id>`, decoding a single resource.
    pub fn fetch_one(id: impl fmt::Display) -> Self {
        Self::new(
            Method::Get,
            format!("{}/{}", R::PATH, id),
            None,
            None,
            R::from_payload,
        )
    }
}

impl<R: Resource> StoreRequest<Vec<R>> {
    /// `GET <PATH>`, decoding an array in server order.
    pub fn fetch_all() -> Self {
        Self::new(Method::Get, R::PATH, None, None, R::from_payload_list)
    }
}

impl<T> Clone for StoreRequest<T> {
    fn clone(&self) -> Self {
        Self {
            method: self.method,
            uri: self.uri.clone(),
            params: self.params.clone(),
            body: self.body.clone(),
            decode: self.decode,
        }
    }
}

impl<T> fmt::Debug for StoreRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreRequest")
            .field("method", &self.method)
            .field("uri", &self.uri)
            .field("params", &self.params)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

// Decoders are plain functions chosen by the builder, so equality is decided
// by what goes over the wire.
impl<T> PartialEq for StoreRequest<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw() == other.raw()
    }
}
