use crate::Error;
use ed25519_dalek::{PublicKey, Signature, Verifier, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use tracing::warn;

/// Checks the `X-Signature-Ed25519` header against `timestamp || body` using the
/// application's public key.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    public_key: PublicKey,
}

impl SignatureVerifier {
    pub fn new(public_key: PublicKey) -> SignatureVerifier {
        SignatureVerifier { public_key }
    }

    pub fn from_hex(public_key: &str) -> Result<SignatureVerifier, Error> {
        let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
        hex::decode_to_slice(public_key.trim(), &mut bytes)
            .map_err(|e| Error::InvalidPublicKey(e.to_string().into_boxed_str()))?;

        let public_key = PublicKey::from_bytes(&bytes)
            .map_err(|e| Error::InvalidPublicKey(e.to_string().into_boxed_str()))?;

        Ok(SignatureVerifier::new(public_key))
    }

    /// Returns false on any failure, including malformed hex. Failures are logged, never
    /// returned.
    pub fn verify(&self, body: &[u8], signature: &str, timestamp: &str) -> bool {
        match self.try_verify(body, signature, timestamp) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "rejected interaction signature");
                false
            }
        }
    }

    fn try_verify(&self, body: &[u8], signature: &str, timestamp: &str) -> Result<(), Error> {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        hex::decode_to_slice(signature, &mut bytes).map_err(Error::InvalidSignatureFormat)?;
        let signature = Signature::try_from(&bytes[..]).map_err(Error::InvalidSignature)?;

        let body_with_timestamp: Vec<u8> = timestamp
            .as_bytes()
            .iter()
            .copied()
            .chain(body.iter().copied())
            .collect();

        self.public_key
            .verify(&body_with_timestamp[..], &signature)
            .map_err(Error::InvalidSignature)
    }
}

/// One-shot form of [`SignatureVerifier::verify`] taking the public key as hex.
pub fn verify(public_key: &str, body: &[u8], signature: &str, timestamp: &str) -> bool {
    match SignatureVerifier::from_hex(public_key) {
        Ok(verifier) => verifier.verify(body, signature, timestamp),
        Err(e) => {
            warn!(error = %e, "could not load public key");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sign, test_keypair};

    const TIMESTAMP: &str = "1625603592";
    const BODY: &[u8] = br#"{"type":1}"#;

    fn public_key_hex() -> String {
        hex::encode(test_keypair().public.as_bytes())
    }

    #[test]
    fn test_valid_signature() {
        let signature = sign(TIMESTAMP, BODY);
        assert!(verify(&public_key_hex(), BODY, &signature, TIMESTAMP));
    }

    #[test]
    fn test_mutated_body() {
        let signature = sign(TIMESTAMP, BODY);

        for i in 0..BODY.len() {
            let mut body = BODY.to_vec();
            body[i] ^= 0x01;
            assert!(!verify(&public_key_hex(), &body, &signature, TIMESTAMP));
        }
    }

    #[test]
    fn test_mutated_timestamp() {
        let signature = sign(TIMESTAMP, BODY);
        assert!(!verify(&public_key_hex(), BODY, &signature, "1625603593"));
        assert!(!verify(&public_key_hex(), BODY, &signature, ""));
    }

    #[test]
    fn test_malformed_hex() {
        let signature = sign(TIMESTAMP, BODY);
        assert!(!verify(&public_key_hex(), BODY, "zz", TIMESTAMP));
        assert!(!verify(&public_key_hex(), BODY, &signature[2..], TIMESTAMP));
        assert!(!verify("not a key", BODY, &signature, TIMESTAMP));
    }

    #[test]
    fn test_wrong_key() {
        let signature = sign(TIMESTAMP, BODY);
        let other = SignatureVerifier::from_hex(&"11".repeat(32));

        // not every 32 byte string is a valid point; either outcome must reject
        match other {
            Ok(verifier) => assert!(!verifier.verify(BODY, &signature, TIMESTAMP)),
            Err(e) => assert!(matches!(e, Error::InvalidPublicKey(_))),
        }
    }
}
