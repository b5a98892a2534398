use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RsaError {
    #[error("e and phi are not coprime")]
    NotCoprime,
    #[error("p and q must be distinct primes")]
    IdenticalPrimes,
    #[error("key generation gave up after {0} attempts")]
    KeyGenerationExhausted(usize),
    #[error("prime bit length must be at least {min}, got {0}", min = crate::constants::MIN_PRIME_BITS)]
    InvalidBitLength(usize),
    #[error("message is not smaller than the modulus")]
    MessageTooLarge,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RingError {
    #[error("ring is empty")]
    EmptyRing,
    #[error("ring needs at least 2 members, got {0}")]
    RingTooSmall(usize),
    #[error("duplicate public key in ring")]
    DuplicateKey,
    #[error("modulus must be at least 3, got {0}")]
    InvalidModulus(String),
    #[error("signer's public key is not part of the ring")]
    SignerNotInRing,
    #[error("signer's secret key does not match its public key")]
    SignerKeyMismatch,
    #[error("ring equation needs exactly one unknown slot, got {0}")]
    UnknownSlotCount(usize),
    #[error("malformed signature: {keys} public keys but {values} x values")]
    MalformedSignature { keys: usize, values: usize },
    #[error("value exceeds the {0}-bit common domain")]
    ValueOutOfDomain(usize),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParamsError {
    #[error("public exponent must be odd and greater than 1, got {0}")]
    InvalidExponent(u32),
    #[error("security margin must be positive")]
    ZeroSecurityMargin,
    #[error("max keygen attempts must be positive")]
    ZeroKeygenAttempts,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EncodingError {
    #[error("value needs {needed} bytes but only {available} are available")]
    TooWide { needed: usize, available: usize },
    #[error("failed to decode hex string: {0}")]
    Hex(String),
    #[error("block cipher failure: {0}")]
    Cipher(String),
}
