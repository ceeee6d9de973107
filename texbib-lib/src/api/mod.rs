//! Backend clients and the HTTP abstraction they share.

use serde_json::Value;

pub(crate) mod ads;
pub(crate) mod inspire;
pub(crate) mod semantic_scholar;

use crate::{Error, ErrorKind};

/// A raw backend response: the HTTP status code and the body text.
///
/// Clients interpret the status themselves because "non-2xx" means absent
/// for most backends while a rate-limit status must stay an error.
#[derive(Debug)]
pub struct Response {
    status: u16,
    body: String,
}

impl Response {
    /// Creates a response from a status code and body text.
    #[must_use]
    pub const fn new(status: u16, body: String) -> Self {
        Self { status, body }
    }

    pub(crate) fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub(crate) const fn status(&self) -> u16 {
        self.status
    }

    pub(crate) fn body(&self) -> &str {
        &self.body
    }
}

/// The transport used by every backend client.
///
/// Implemented for [`reqwest::blocking::Client`]; tests substitute a mock so
/// resolution chains can be exercised without the network.
pub trait Client
where
    Self: Default,
{
    /// Performs a GET request with the given headers.
    ///
    /// # Errors
    ///
    /// An `Err` is returned when the transport fails; HTTP error statuses
    /// are returned as a [`Response`], not an `Err`.
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<Response, Error>;

    /// Performs a POST request with a JSON body and the given headers.
    ///
    /// # Errors
    ///
    /// An `Err` is returned when the transport fails; HTTP error statuses
    /// are returned as a [`Response`], not an `Err`.
    fn post_json(&self, url: &str, headers: &[(&str, &str)], body: &Value)
        -> Result<Response, Error>;
}

impl Client for reqwest::blocking::Client {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<Response, Error> {
        let mut request = reqwest::blocking::Client::get(self, url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        read_response(request.send())
    }

    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &Value,
    ) -> Result<Response, Error> {
        let mut request = self.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        read_response(request.send())
    }
}

fn read_response(sent: reqwest::Result<reqwest::blocking::Response>) -> Result<Response, Error> {
    let response = sent.map_err(|e| Error::wrap(ErrorKind::IO, e))?;
    let status = response.status().as_u16();
    let body = response
        .text()
        .map_err(|e| Error::wrap(ErrorKind::Deserialize, e))?;
    Ok(Response::new(status, body))
}

/// Turns a rate-limit status into a distinguishable error so callers never
/// mistake it for "not found".
pub(crate) fn reject_rate_limited(service: &str, response: &Response) -> Result<(), Error> {
    if response.status() == 429 {
        Err(Error::new(
            ErrorKind::RateLimit,
            format!("{service} rate limit exceeded (429)"),
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
pub(crate) use test::{
    assert_url, impl_producer, ok_response, status_response, take_request_log, MockClient,
    Producer, REQUEST_LOG,
};
