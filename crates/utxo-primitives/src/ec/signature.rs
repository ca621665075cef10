//! ECDSA signature with DER serialization.

use crate::PrimitivesError;

/// A low-S normalized secp256k1 ECDSA signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    inner: k256::ecdsa::Signature,
}

impl Signature {
    pub(crate) fn from_k256(sig: k256::ecdsa::Signature) -> Self {
        Signature {
            inner: sig.normalize_s().unwrap_or(sig),
        }
    }

    pub(crate) fn as_k256(&self) -> &k256::ecdsa::Signature {
        &self.inner
    }

    /// Parse a strict DER-encoded signature.
    pub fn from_der(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let sig = k256::ecdsa::Signature::from_der(bytes)?;
        Ok(Self::from_k256(sig))
    }

    /// Serialize as DER: `0x30 <len> 0x02 <r_len> <r> 0x02 <s_len> <s>`.
    ///
    /// At most 72 bytes.
    pub fn to_der(&self) -> Vec<u8> {
        self.inner.to_der().as_bytes().to_vec()
    }
}
