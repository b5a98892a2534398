use crate::constants::{COMMON_DOMAIN_BIT_LENGTH_ADDITION, E, FIXED_IV, MAX_KEYGEN_ATTEMPTS};
use crate::error::ParamsError;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// 署名内の公開鍵の並べ方
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyOrdering {
    /// モジュラス n の昇順
    Canonical,
    /// 暗号論的乱数によるシャッフル (Fisher-Yates)
    Shuffled,
}

/// スキーム全体で共有するパラメータ
///
/// 署名者と検証者は同じ値を使う必要がある。`public_exponent`・`security_margin_bits`・`iv`
/// のいずれかが異なると検証は必ず失敗する。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeParams {
    // RSA公開指数 e
    pub public_exponent: u32,
    // 共通ドメインのビット長に加えるマージン
    pub security_margin_bits: usize,
    // 結合関数で使う CBC の固定 IV
    pub iv: [u8; 16],
    pub key_ordering: KeyOrdering,
    // 鍵生成で素数を引き直す上限
    pub max_keygen_attempts: usize,
}

impl Default for SchemeParams {
    fn default() -> Self {
        SchemeParams {
            public_exponent: E,
            security_margin_bits: COMMON_DOMAIN_BIT_LENGTH_ADDITION,
            iv: FIXED_IV,
            key_ordering: KeyOrdering::Canonical,
            max_keygen_attempts: MAX_KEYGEN_ATTEMPTS,
        }
    }
}

impl SchemeParams {
    pub fn with_public_exponent(mut self, e: u32) -> Self {
        self.public_exponent = e;
        self
    }

    pub fn with_key_ordering(mut self, ordering: KeyOrdering) -> Self {
        self.key_ordering = ordering;
        self
    }

    pub fn with_max_keygen_attempts(mut self, attempts: usize) -> Self {
        self.max_keygen_attempts = attempts;
        self
    }

    /// 公開指数を BigUint として返す
    pub fn e(&self) -> BigUint {
        BigUint::from(self.public_exponent)
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.public_exponent < 3 || self.public_exponent % 2 == 0 {
            return Err(ParamsError::InvalidExponent(self.public_exponent));
        }
        if self.security_margin_bits == 0 {
            return Err(ParamsError::ZeroSecurityMargin);
        }
        if self.max_keygen_attempts == 0 {
            return Err(ParamsError::ZeroKeygenAttempts);
        }
        Ok(())
    }
}
