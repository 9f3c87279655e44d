//! HTTP transport used by the RPC client.

use std::fmt;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::error::Error;

/// Raw HTTP response handed back to the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: i32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Something that can POST a JSON body to the daemon.
///
/// Implementations must be safe to share between threads; the client holds no locks
/// of its own.
pub trait Transport: Send + Sync + fmt::Debug {
    /// POSTs `body` as `application/json` and returns the raw response.
    fn send(&self, body: Vec<u8>) -> Result<HttpResponse, Error>;

    /// Releases idle connections held by the transport.
    fn close(&self) -> Result<(), Error> {
        Ok(())
    }

    /// The URL requests are sent to.
    fn url(&self) -> &str;
}

/// Blocking HTTP/1.1 transport backed by `minreq`.
#[derive(Clone)]
pub struct MinreqTransport {
    url: String,
    timeout: Option<Duration>,
    basic_auth: Option<String>,
}

impl MinreqTransport {
    /// Creates a transport for `url` with no timeout and no authentication.
    pub fn new(url: impl Into<String>) -> Self {
        MinreqTransport {
            url: url.into(),
            timeout: None,
            basic_auth: None,
        }
    }

    /// Sets the per-request timeout. Requests never time out unless this is set.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds HTTP Basic Authentication to every request.
    pub fn basic_auth(mut self, user: String, pass: Option<String>) -> Self {
        let mut credentials = user;
        credentials.push(':');
        if let Some(pass) = pass {
            credentials.push_str(&pass);
        }
        self.basic_auth = Some(format!("Basic {}", STANDARD.encode(credentials)));
        self
    }
}

impl Transport for MinreqTransport {
    fn send(&self, body: Vec<u8>) -> Result<HttpResponse, Error> {
        let mut request = minreq::post(&self.url)
            .with_header("Content-Type", "application/json")
            .with_body(body);
        if let Some(auth) = &self.basic_auth {
            request = request.with_header("Authorization", auth.as_str());
        }
        if let Some(timeout) = self.timeout {
            // minreq counts whole seconds and treats 0 as "expire immediately"
            request = request.with_timeout(timeout.as_secs().max(1));
        }

        let response = request.send()?;
        Ok(HttpResponse {
            status: response.status_code,
            body: response.into_bytes(),
        })
    }

    fn close(&self) -> Result<(), Error> {
        // minreq opens a fresh connection per request, nothing is pooled
        debug!(url = %self.url, "closing transport");
        Ok(())
    }

    fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Debug for MinreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let basic_auth = self.basic_auth.as_ref().map(|_| "<redacted>");
        f.debug_struct("MinreqTransport")
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .field("basic_auth", &basic_auth)
            .finish()
    }
}
