//! Error types for the staking wallet RPC client.

use std::{fmt, io};

use serde_json::{Map, Value};

/// Result type alias for the RPC client.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using the staking wallet RPC client.
#[derive(Debug)]
pub enum Error {
    /// Missing authentication credentials.
    MissingAuthentication,

    /// Invalid or corrupted cookie file.
    InvalidCookieFile,

    /// The request payload could not be serialized.
    Request(serde_json::Error),

    /// The HTTP exchange itself failed (DNS, connection refused, timeout).
    Transport(minreq::Error),

    /// The daemon answered with a status other than 200.
    Http { status: i32, body: String },

    /// JSON deserialization error, either of the envelope or of its `result`.
    Json(serde_json::Error),

    /// The daemon reported an error in the response envelope.
    Rpc(RpcError),

    /// The response id did not echo the request id.
    IdMismatch { expected: Value, received: Value },

    /// I/O error (e.g., reading cookie file).
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingAuthentication => {
                write!(f, "authentication is required but none was provided")
            }
            Error::InvalidCookieFile => write!(f, "invalid cookie file"),
            Error::Request(e) => write!(f, "failed to build request: {e}"),
            Error::Transport(e) => write!(f, "failed to send request: {e}"),
            Error::Http { status, body } => {
                write!(f, "request failed with status {status}: {body}")
            }
            Error::Json(e) => write!(f, "JSON error: {e}"),
            Error::Rpc(e) => write!(f, "JSON-RPC error: {e}"),
            Error::IdMismatch { expected, received } => {
                write!(f, "mismatched response id {received}, expected {expected}")
            }
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Request(e) => Some(e),
            Error::Transport(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<minreq::Error> for Error {
    fn from(e: minreq::Error) -> Self {
        Error::Transport(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<RpcError> for Error {
    fn from(e: RpcError) -> Self {
        Error::Rpc(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

/// Error payload reported by the daemon, kept verbatim.
///
/// Older daemons send a flat map of strings (`{"message": "..."}`), newer ones the
/// structured `{"code": -5, "message": "...", "data": ...}` object. Both are held as-is.
#[derive(Clone, Debug, PartialEq)]
pub struct RpcError(Map<String, Value>);

impl RpcError {
    /// Interprets the envelope's `error` field. `null` and `{}` mean no error.
    pub(crate) fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Object(map) if map.is_empty() => None,
            Value::Object(map) => Some(RpcError(map)),
            other => {
                let mut map = Map::new();
                map.insert("message".to_owned(), other);
                Some(RpcError(map))
            }
        }
    }

    /// Numeric error code, if the daemon supplied one.
    pub fn code(&self) -> Option<i64> {
        match self.0.get("code")? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Human readable message, if the daemon supplied one.
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    /// The raw error object.
    pub fn payload(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Converts into the structured JSON-RPC error, when both code and message are present.
    pub fn to_jsonrpc(&self) -> Option<jsonrpc::error::RpcError> {
        let code = i32::try_from(self.code()?).ok()?;
        let message = self.message()?.to_owned();
        let data = match self.0.get("data") {
            Some(data) => serde_json::value::to_raw_value(data).ok(),
            None => None,
        };
        Some(jsonrpc::error::RpcError {
            code,
            message,
            data,
        })
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", Value::Object(self.0.clone()))
    }
}

impl std::error::Error for RpcError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_empty_errors_are_ignored() {
        assert!(RpcError::from_value(Value::Null).is_none());
        assert!(RpcError::from_value(json!({})).is_none());
    }

    #[test]
    fn flat_string_map_is_kept_verbatim() {
        let value = json!({"message": "boom"});
        let err = RpcError::from_value(value).unwrap();
        assert_eq!(err.message(), Some("boom"));
        assert_eq!(err.code(), None);
        assert!(err.to_jsonrpc().is_none());
        assert!(Error::Rpc(err).to_string().contains("boom"));
    }

    #[test]
    fn structured_error_converts_to_jsonrpc() {
        let value = json!({
            "code": -5,
            "message": "Invalid or non-wallet transaction id",
        });
        let err = RpcError::from_value(value).unwrap();

        let rpc = err.to_jsonrpc().expect("structured error");
        assert_eq!(rpc.code, -5);
        assert_eq!(rpc.message, "Invalid or non-wallet transaction id");
        assert!(rpc.data.is_none());
    }

    #[test]
    fn string_code_is_parsed() {
        let value = json!({"code": "-32601", "message": "Method not found"});
        let err = RpcError::from_value(value).unwrap();
        assert_eq!(err.code(), Some(-32601));
    }

    #[test]
    fn bare_string_error_becomes_message() {
        let err = RpcError::from_value(json!("wallet locked")).unwrap();
        assert_eq!(err.message(), Some("wallet locked"));
    }

    #[test]
    fn http_error_display_has_status_and_body() {
        let err = Error::Http {
            status: 500,
            body: "internal error".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("internal error"));
    }
}
