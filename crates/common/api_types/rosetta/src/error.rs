use std::fmt::Display;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A Rosetta error object. Every error the API returns is one of the [`ErrorKind`]s, optionally
/// carrying the underlying cause under `details.context`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("Rosetta error {code}: {message}")]
pub struct Error {
    pub code: u32,
    pub message: String,
    pub retriable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, Value>>,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unimplemented,
    UnavailableOffline,
    Beacon,
    UnableToDecompressPubkey,
    UnclearIntent,
    UnableToParseIntermediateResult,
    SignatureInvalid,
    BroadcastFailed,
    CallParametersInvalid,
    CallOutputMarshal,
    CallMethodInvalid,
    BlockOrphaned,
    InvalidAddress,
    BeaconNotReady,
    InvalidNetwork,
    InvalidBlockQuery,
    ParentUnresolved,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 17] = [
        ErrorKind::Unimplemented,
        ErrorKind::UnavailableOffline,
        ErrorKind::Beacon,
        ErrorKind::UnableToDecompressPubkey,
        ErrorKind::UnclearIntent,
        ErrorKind::UnableToParseIntermediateResult,
        ErrorKind::SignatureInvalid,
        ErrorKind::BroadcastFailed,
        ErrorKind::CallParametersInvalid,
        ErrorKind::CallOutputMarshal,
        ErrorKind::CallMethodInvalid,
        ErrorKind::BlockOrphaned,
        ErrorKind::InvalidAddress,
        ErrorKind::BeaconNotReady,
        ErrorKind::InvalidNetwork,
        ErrorKind::InvalidBlockQuery,
        ErrorKind::ParentUnresolved,
    ];

    pub fn code(self) -> u32 {
        match self {
            ErrorKind::Unimplemented => 0,
            ErrorKind::UnavailableOffline => 1,
            ErrorKind::Beacon => 2,
            ErrorKind::UnableToDecompressPubkey => 3,
            ErrorKind::UnclearIntent => 4,
            ErrorKind::UnableToParseIntermediateResult => 5,
            ErrorKind::SignatureInvalid => 6,
            ErrorKind::BroadcastFailed => 7,
            ErrorKind::CallParametersInvalid => 8,
            ErrorKind::CallOutputMarshal => 9,
            ErrorKind::CallMethodInvalid => 10,
            ErrorKind::BlockOrphaned => 11,
            ErrorKind::InvalidAddress => 12,
            ErrorKind::BeaconNotReady => 13,
            ErrorKind::InvalidNetwork => 14,
            ErrorKind::InvalidBlockQuery => 15,
            ErrorKind::ParentUnresolved => 16,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::Unimplemented => "Endpoint not implemented",
            ErrorKind::UnavailableOffline => "Endpoint unavailable offline",
            ErrorKind::Beacon => "beacon error",
            ErrorKind::UnableToDecompressPubkey => "unable to decompress public key",
            ErrorKind::UnclearIntent => "Unable to parse intent",
            ErrorKind::UnableToParseIntermediateResult => "Unable to parse intermediate result",
            ErrorKind::SignatureInvalid => "Signature invalid",
            ErrorKind::BroadcastFailed => "Unable to broadcast transaction",
            ErrorKind::CallParametersInvalid => "Call parameters invalid",
            ErrorKind::CallOutputMarshal => "Call output marshal failed",
            ErrorKind::CallMethodInvalid => "Call method invalid",
            ErrorKind::BlockOrphaned => "Block orphaned",
            ErrorKind::InvalidAddress => "Invalid address",
            ErrorKind::BeaconNotReady => "Beacon not ready",
            ErrorKind::InvalidNetwork => "Network identifier not supported",
            ErrorKind::InvalidBlockQuery => "Invalid block identifier",
            ErrorKind::ParentUnresolved => "Parent block not resolvable",
        }
    }

    /// Retriable errors may succeed on a later attempt, e.g. once the node has caught up.
    pub fn retriable(self) -> bool {
        matches!(
            self,
            ErrorKind::BlockOrphaned | ErrorKind::BeaconNotReady | ErrorKind::ParentUnresolved
        )
    }

    pub fn error(self) -> Error {
        Error {
            code: self.code(),
            message: self.message().to_string(),
            retriable: self.retriable(),
            details: None,
        }
    }

    /// Same as [`ErrorKind::error`], recording `context` under `details.context`.
    pub fn wrap(self, context: impl Display) -> Error {
        let mut details = Map::new();
        details.insert("context".to_string(), Value::String(context.to_string()));
        Error {
            details: Some(details),
            ..self.error()
        }
    }
}

/// Every error this implementation can return, as advertised by `/network/options`.
pub fn all_errors() -> Vec<Error> {
    ErrorKind::ALL.into_iter().map(ErrorKind::error).collect()
}
