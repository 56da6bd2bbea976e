//! Possible errors thrown by the allowance client, and the classification
//! of raw failure shapes into them
//!
//! Classification happens exactly once, at the mutation boundary: the rest
//! of the engine and its consumers only ever see the typed taxonomy below,
//! never a transport library's error shape.

use std::{error::Error, fmt::Display};

use alloy::providers::{PendingTransactionError, WatchTxError};
use constants::NON_STANDARD_APPROVAL_ERROR_CODE;

/// The error type returned by the allowance client configuration interface
#[derive(Clone, Debug)]
pub enum AllowanceClientConfigError {
    /// Error thrown when the RPC client fails to initialize
    RpcClientInitialization(String),
    /// Error thrown when a contract address can't be parsed
    AddressParsing(String),
}

impl Display for AllowanceClientConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
impl Error for AllowanceClientConfigError {}

/// The error type returned by the allowance client interface
#[derive(Clone, Debug)]
pub enum AllowanceClientError {
    /// Error thrown when the allowance client configuration fails
    Config(AllowanceClientConfigError),
    /// An error interacting with the token contract
    ContractInteraction(String),
    /// An error querying or decoding approval events
    EventQuerying(String),
    /// A user-entered amount failed to parse
    ///
    /// Raised before any network call is made
    InvalidAmount(String),
    /// The client was built without a signing identity, so it cannot submit
    /// mutating calls
    ///
    /// Raised before any network call is made
    NoSigner,
    /// The token contract rejects direct nonzero-to-nonzero approval changes
    ///
    /// Recoverable by user action: revoke the allowance first, then set the
    /// new value
    NonStandardApproval,
    /// An error performing a JSON-RPC request
    Rpc(String),
    /// The transaction was rejected at submission or reverted on-chain
    TxRejected(String),
    /// The confirmation wait exceeded its timeout
    TxTimeout,
}

impl AllowanceClientError {
    /// Create a contract interaction error from an error message
    pub fn contract_interaction<T: ToString>(msg: T) -> Self {
        Self::ContractInteraction(msg.to_string())
    }

    /// Create an event querying error from an error message
    pub fn event_querying<T: ToString>(msg: T) -> Self {
        Self::EventQuerying(msg.to_string())
    }

    /// Create an RPC error from an error message
    pub fn rpc<T: ToString>(msg: T) -> Self {
        Self::Rpc(msg.to_string())
    }

    /// Create a transaction rejection error from an error message
    pub fn tx_rejected<T: ToString>(msg: T) -> Self {
        Self::TxRejected(msg.to_string())
    }

    /// The message shown to the holder for this error
    ///
    /// Only the non-standard-approval case carries an actionable
    /// instruction; other failures surface generically without internal
    /// detail
    pub fn user_message(&self) -> String {
        match self {
            Self::NonStandardApproval => {
                "This token does not support updating allowances, please revoke instead"
                    .to_string()
            },
            Self::InvalidAmount(msg) => format!("Invalid amount: {msg}"),
            Self::NoSigner => "No signing account is connected".to_string(),
            _ => "The transaction could not be completed".to_string(),
        }
    }
}

impl Display for AllowanceClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
impl Error for AllowanceClientError {}

impl From<AllowanceClientConfigError> for AllowanceClientError {
    fn from(e: AllowanceClientConfigError) -> Self {
        Self::Config(e)
    }
}

// ------------------
// | Classification |
// ------------------

/// Classify a submission failure into the client's error taxonomy
///
/// Recognizes the rejection emitted by tokens that refuse a direct
/// nonzero-to-nonzero approval change; every other failure is a plain
/// rejection
pub fn classify_submission_error(err: alloy_contract::Error) -> AllowanceClientError {
    if let alloy_contract::Error::TransportError(transport_err) = &err
        && let Some(payload) = transport_err.as_error_resp()
    {
        return classify_rpc_code(payload.code, err.to_string());
    }

    AllowanceClientError::tx_rejected(err)
}

/// Classify a JSON-RPC error code returned for an approval submission
fn classify_rpc_code(code: i64, message: String) -> AllowanceClientError {
    if code == NON_STANDARD_APPROVAL_ERROR_CODE {
        AllowanceClientError::NonStandardApproval
    } else {
        AllowanceClientError::TxRejected(message)
    }
}

/// Classify a confirmation-wait failure into the client's error taxonomy
pub fn classify_receipt_error(err: PendingTransactionError) -> AllowanceClientError {
    match err {
        PendingTransactionError::TxWatcher(WatchTxError::Timeout) => {
            AllowanceClientError::TxTimeout
        },
        other => AllowanceClientError::tx_rejected(other),
    }
}

#[cfg(test)]
mod test {
    use alloy::providers::{PendingTransactionError, WatchTxError};
    use constants::NON_STANDARD_APPROVAL_ERROR_CODE;

    use super::{classify_receipt_error, classify_rpc_code, AllowanceClientError};

    /// Tests that the non-standard approval rejection code maps to its
    /// distinguished error kind
    #[test]
    fn test_classify_non_standard_approval() {
        let err =
            classify_rpc_code(NON_STANDARD_APPROVAL_ERROR_CODE, "execution reverted".to_string());
        assert!(matches!(err, AllowanceClientError::NonStandardApproval));
    }

    /// Tests that any other RPC code maps to a generic rejection
    #[test]
    fn test_classify_other_codes() {
        for code in [-32603, -32602, 3, 0] {
            let err = classify_rpc_code(code, "some failure".to_string());
            assert!(matches!(err, AllowanceClientError::TxRejected(_)));
        }
    }

    /// Tests that a confirmation-wait timeout maps to the timeout kind
    #[test]
    fn test_classify_receipt_timeout() {
        let err = classify_receipt_error(PendingTransactionError::TxWatcher(WatchTxError::Timeout));
        assert!(matches!(err, AllowanceClientError::TxTimeout));
    }

    /// Tests that the actionable notice is attached to the non-standard
    /// approval error only
    #[test]
    fn test_user_messages() {
        let actionable = AllowanceClientError::NonStandardApproval.user_message();
        assert!(actionable.contains("revoke"));

        let generic = AllowanceClientError::tx_rejected("nonce too low").user_message();
        assert!(!generic.contains("nonce"));
    }
}
