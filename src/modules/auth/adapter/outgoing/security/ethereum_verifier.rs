use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};

use crate::auth::application::ports::outgoing::wallet_verifier::{
    SignatureError, WalletSignatureVerifier,
};

/// Checks `personal_sign` style signatures: the wallet signs the
/// Keccak-256 digest of the prefixed challenge message, and the signer
/// address recovered from the 65-byte signature must equal the claimed one.
#[derive(Clone, Default)]
pub struct EthereumSignatureVerifier;

impl EthereumSignatureVerifier {
    pub fn new() -> Self {
        Self
    }
}

fn signed_message_digest(message: &str) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(format!("\x19Ethereum Signed Message:\n{}", message.len()));
    hasher.update(message.as_bytes());
    hasher.finalize().into()
}

fn address_of(key: &VerifyingKey) -> String {
    let point = key.to_encoded_point(false);
    // Skip the 0x04 SEC1 tag; the address is the last 20 bytes of the digest.
    let digest = Keccak256::digest(&point.as_bytes()[1..]);
    format!("0x{}", hex::encode(&digest[12..]))
}

impl WalletSignatureVerifier for EthereumSignatureVerifier {
    fn verify(
        &self,
        address: &str,
        message: &str,
        signature_hex: &str,
    ) -> Result<(), SignatureError> {
        let claimed = address.to_lowercase();
        if !claimed.starts_with("0x") || claimed.len() != 42 {
            return Err(SignatureError::MalformedAddress);
        }

        let raw = signature_hex.strip_prefix("0x").unwrap_or(signature_hex);
        let bytes = hex::decode(raw).map_err(|_| SignatureError::MalformedSignature)?;
        if bytes.len() != 65 {
            return Err(SignatureError::MalformedSignature);
        }

        let signature =
            Signature::from_slice(&bytes[..64]).map_err(|_| SignatureError::MalformedSignature)?;

        // Wallets emit v as 27/28; raw recovery ids 0/1 are accepted too.
        let v = bytes[64];
        let recovery_byte = if v >= 27 { v - 27 } else { v };
        let recovery_id =
            RecoveryId::from_byte(recovery_byte).ok_or(SignatureError::MalformedSignature)?;

        let digest = signed_message_digest(message);
        let recovered = VerifyingKey::recover_from_prehash(&digest, &signature, recovery_id)
            .map_err(|_| SignatureError::RecoveryFailed)?;

        if address_of(&recovered) == claimed {
            Ok(())
        } else {
            Err(SignatureError::AddressMismatch)
        }
    }
}
