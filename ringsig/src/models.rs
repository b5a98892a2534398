use crate::domain::common_domain_bits;
use crate::params::SchemeParams;
use crate::ring::RingSignature;
use crate::rsa::PublicKey;
use crate::serialization::{biguint_to_hex, biguint_to_padded_hex, hex_to_biguint};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Structure for ring signature input/output via JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignaturePayload {
    /// Ring member moduli in signature order (hex strings)
    pub public_keys: Vec<String>,
    /// Ring signature glue value (fixed-width hex string)
    pub glue: String,
    /// Ring signature contribution values (fixed-width hex strings)
    pub x_values: Vec<String>,
}

impl RingSignature {
    /// Encodes the signature with glue and x values padded to the common domain width.
    pub fn to_payload(&self, params: &SchemeParams) -> Result<SignaturePayload> {
        let width = common_domain_bits(&self.public_keys, params)? / 8;
        Ok(SignaturePayload {
            public_keys: self
                .public_keys
                .iter()
                .map(|pk| biguint_to_hex(&pk.n))
                .collect(),
            glue: biguint_to_padded_hex(&self.glue, width)?,
            x_values: self
                .x_values
                .iter()
                .map(|x| biguint_to_padded_hex(x, width))
                .collect::<Result<_>>()?,
        })
    }

    pub fn from_payload(payload: &SignaturePayload) -> Result<Self> {
        Ok(RingSignature {
            public_keys: payload
                .public_keys
                .iter()
                .map(|n| hex_to_biguint(n).map(PublicKey::new))
                .collect::<Result<_>>()?,
            glue: hex_to_biguint(&payload.glue)?,
            x_values: payload
                .x_values
                .iter()
                .map(|x| hex_to_biguint(x))
                .collect::<Result<_>>()?,
        })
    }

    pub fn to_json(&self, params: &SchemeParams) -> Result<String> {
        Ok(serde_json::to_string(&self.to_payload(params)?)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let payload: SignaturePayload = serde_json::from_str(json)?;
        Self::from_payload(&payload)
    }
}
