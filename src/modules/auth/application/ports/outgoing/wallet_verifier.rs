use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    MalformedAddress,
    MalformedSignature,
    RecoveryFailed,
    AddressMismatch,
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureError::MalformedAddress => write!(f, "Malformed wallet address"),
            SignatureError::MalformedSignature => write!(f, "Malformed signature"),
            SignatureError::RecoveryFailed => write!(f, "Could not recover signer"),
            SignatureError::AddressMismatch => {
                write!(f, "Signature was not produced by the claimed address")
            }
        }
    }
}

/// Ownership proof for wallet linkage: the caller must have signed the
/// server-issued challenge with the key behind the claimed address.
pub trait WalletSignatureVerifier: Send + Sync {
    fn verify(
        &self,
        address: &str,
        message: &str,
        signature_hex: &str,
    ) -> Result<(), SignatureError>;
}
