mod api_key;
mod basic;
mod client;

pub use api_key::ApiKey;
pub use basic::{BasicClient, REQUEST_TIMEOUT};
pub use client::HttpClient;

use reqwest::header::{CONTENT_TYPE, HeaderValue};

/// Builds a JSON `GET` request for `url`.
pub fn json_get(url: reqwest::Url) -> reqwest::blocking::Request {
    let mut req = reqwest::blocking::Request::new(reqwest::Method::GET, url);
    req.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    req
}
