use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::PathBuf,
    time::Duration,
};

use serde::Deserialize;
use serde_json::value::{RawValue, to_raw_value};
use serde_json::{Number, Value, json};
use tracing::{debug, trace};

use crate::error::{Error, RpcError};
use crate::transport::{MinreqTransport, Transport};
use crate::types::{Info, Transaction, ValidateAddress};

/// Id sent with every request. Calls are strictly one request per round trip.
const REQUEST_ID: u64 = 1;

/// client authentication methods
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Auth {
    None,
    UserPass(String, String),
    CookieFile(PathBuf),
}

impl Auth {
    /// Resolve into a username and password.
    pub fn get_user_pass(self) -> Result<(Option<String>, Option<String>), Error> {
        match self {
            Auth::None => Ok((None, None)),
            Auth::UserPass(u, p) => Ok((Some(u), Some(p))),
            Auth::CookieFile(path) => {
                let line = BufReader::new(File::open(path)?)
                    .lines()
                    .next()
                    .ok_or(Error::InvalidCookieFile)??;
                let (user, pass) = line
                    .trim()
                    .split_once(':')
                    .ok_or(Error::InvalidCookieFile)?;
                Ok((Some(user.into()), Some(pass.into())))
            }
        }
    }
}

/// Builds a [`Client`] with non-default settings.
#[derive(Clone, Debug)]
pub struct ClientBuilder {
    host: String,
    port: u16,
    auth: Auth,
    timeout: Option<Duration>,
    check_response_id: bool,
}

impl ClientBuilder {
    pub fn new(host: &str, port: u16) -> Self {
        ClientBuilder {
            host: host.to_owned(),
            port,
            auth: Auth::None,
            timeout: None,
            check_response_id: false,
        }
    }

    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = auth;
        self
    }

    /// Per-request timeout. Without one, a call blocks until the daemon answers.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Reject responses whose `id` does not echo the request id.
    pub fn check_response_id(mut self, check: bool) -> Self {
        self.check_response_id = check;
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        if matches!(self.auth, Auth::None) {
            return Err(Error::MissingAuthentication);
        }

        let (user, pass) = match self.auth.get_user_pass() {
            Ok((Some(user), pass)) => (user, pass),
            Ok((None, _)) => return Err(Error::MissingAuthentication),
            Err(Error::Io(_)) => return Err(Error::InvalidCookieFile),
            Err(e) => return Err(e),
        };

        let url = base_url(&self.host, self.port);
        let mut transport = MinreqTransport::new(url).basic_auth(user, pass);
        if let Some(timeout) = self.timeout {
            transport = transport.timeout(timeout);
        }

        let mut client = Client::with_transport(transport);
        client.check_response_id = self.check_response_id;
        Ok(client)
    }
}

// RPC Client.
#[derive(Debug)]
pub struct Client {
    transport: Box<dyn Transport>,
    check_response_id: bool,
}

impl Client {
    /// Creates a client for the daemon at `http://<host>:<port>` using basic auth.
    ///
    /// No network I/O happens until the first call.
    pub fn new(host: &str, port: u16, user: &str, pass: &str) -> Self {
        let transport = MinreqTransport::new(base_url(host, port))
            .basic_auth(user.to_owned(), Some(pass.to_owned()));
        Self::with_transport(transport)
    }

    /// Creates a client authenticating via username/password or cookie file.
    pub fn with_auth(host: &str, port: u16, auth: Auth) -> Result<Self, Error> {
        ClientBuilder::new(host, port).auth(auth).build()
    }

    /// Creates a client with a custom transport.
    pub fn with_transport<T>(transport: T) -> Self
    where
        T: Transport + 'static,
    {
        Self {
            transport: Box::new(transport),
            check_response_id: false,
        }
    }

    /// The URL every request is POSTed to.
    pub fn url(&self) -> &str {
        self.transport.url()
    }

    /// Calls the RPC `method` with a given `args` list.
    pub fn call<T>(&self, method: &str, args: &[Value]) -> Result<T, Error>
    where
        T: for<'de> Deserialize<'de>,
    {
        debug!(rpc.method = method, rpc.params = args.len(), "rpc call");

        let params = to_raw_value(args).map_err(Error::Request)?;
        let request = jsonrpc::Request {
            method,
            params: Some(&*params),
            id: json!(REQUEST_ID),
            jsonrpc: Some("2.0"),
        };
        let body = serde_json::to_vec(&request).map_err(Error::Request)?;

        let response = self.transport.send(body)?;
        debug!(
            rpc.method = method,
            status = response.status,
            body_len = response.body.len(),
            "rpc response"
        );
        trace!(rpc.method = method, body = %response.text(), "rpc response body");

        if response.status != 200 {
            return Err(Error::Http {
                status: response.status,
                body: response.text(),
            });
        }

        let envelope: Envelope = serde_json::from_slice(&response.body)?;

        if let Some(err) = RpcError::from_value(envelope.error) {
            return Err(Error::Rpc(err));
        }

        if self.check_response_id && envelope.id != json!(REQUEST_ID) {
            return Err(Error::IdMismatch {
                expected: json!(REQUEST_ID),
                received: envelope.id,
            });
        }

        let raw = envelope.result.as_deref().map_or("null", RawValue::get);
        Ok(serde_json::from_str(raw)?)
    }

    /// Releases idle connections held by the transport.
    pub fn close(&self) -> Result<(), Error> {
        self.transport.close()
    }
}

// staking wallet RPC methods
impl Client {
    /// Get wallet and node status.
    pub fn get_info(&self) -> Result<Info, Error> {
        self.call("getinfo", &[])
    }

    /// Get a wallet transaction by txid.
    pub fn get_transaction(&self, txid: &str) -> Result<Transaction, Error> {
        self.call("gettransaction", &[json!(txid)])
    }

    /// Send `amount` coins to `address`. Returns the txid.
    ///
    /// Every call spends funds; nothing is retried. A NaN or infinite `amount` is
    /// rejected before anything is sent.
    pub fn send_to_address(
        &self,
        address: &str,
        amount: f64,
        comment: &str,
    ) -> Result<String, Error> {
        let Some(amount) = Number::from_f64(amount) else {
            return Err(non_finite_amount(amount));
        };
        self.call(
            "sendtoaddress",
            &[json!(address), Value::Number(amount), json!(comment)],
        )
    }

    /// Generate a new receiving address under `label`.
    pub fn get_new_address(&self, label: &str) -> Result<String, Error> {
        self.call("getnewaddress", &[json!(label)])
    }

    /// Check whether `address` is valid for this wallet's network.
    pub fn validate_address(&self, address: &str) -> Result<ValidateAddress, Error> {
        self.call("validateaddress", &[json!(address)])
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    result: Option<Box<RawValue>>,
    #[serde(default)]
    error: Value,
    #[serde(default)]
    id: Value,
}

fn base_url(host: &str, port: u16) -> String {
    format!("http://{host}:{port}")
}

fn non_finite_amount(amount: f64) -> Error {
    let msg = format!("amount must be a finite number, got {amount}");
    Error::Request(serde::ser::Error::custom(msg))
}
