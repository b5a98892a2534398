use crate::error::EncodingError;
use anyhow::Result;
use num_bigint::BigUint;
use num_traits::Zero;

/// Converts a BigUint to a hexadecimal string.
pub fn biguint_to_hex(n: &BigUint) -> String {
    hex::encode(n.to_bytes_be())
}

/// Converts a BigUint to a hexadecimal string of exactly `len` bytes.
pub fn biguint_to_padded_hex(n: &BigUint, len: usize) -> Result<String> {
    Ok(hex::encode(to_padded_bytes(n, len)?))
}

/// Converts a hexadecimal string to a BigUint.
pub fn hex_to_biguint(hex: &str) -> Result<BigUint> {
    let decoded = hex::decode(hex).map_err(|e| EncodingError::Hex(e.to_string()))?;
    Ok(BigUint::from_bytes_be(&decoded))
}

/// Big-endian bytes of `n`, left-padded with zeros to exactly `len` bytes.
pub fn to_padded_bytes(n: &BigUint, len: usize) -> Result<Vec<u8>> {
    // to_bytes_be() returns [0] for zero
    let bytes = if n.is_zero() {
        Vec::new()
    } else {
        n.to_bytes_be()
    };
    if bytes.len() > len {
        return Err(EncodingError::TooWide {
            needed: bytes.len(),
            available: len,
        }
        .into());
    }
    let mut padded = vec![0u8; len - bytes.len()];
    padded.extend_from_slice(&bytes);
    Ok(padded)
}
