// 共通ドメインの選択
// リングメンバーはそれぞれ異なるモジュラス n_i を持つが、リング方程式は単一のドメイン [0, 2^b) 上で計算する。
// b は最大のモジュラスのビット長にマージンを加え、暗号ブロック長の倍数に切り上げた値。
// 署名者と検証者は同じ鍵集合から同じ b を導く必要があるため、この丸め規則は署名形式の一部。

use crate::constants::CIPHER_BLOCK_BITS;
use crate::error::RingError;
use crate::params::SchemeParams;
use crate::rsa::PublicKey;
use anyhow::Result;
use log::debug;

/// 共通ドメインのビット長 b を計算する
pub fn common_domain_bits(keys: &[PublicKey], params: &SchemeParams) -> Result<usize> {
    let n_max_bits = keys
        .iter()
        .map(|pk| pk.n.bits() as usize)
        .max()
        .ok_or(RingError::EmptyRing)?;
    let b = round_up_to_block(n_max_bits + params.security_margin_bits);
    debug!("common_domain_bits: n_max bits = {}, b = {}", n_max_bits, b);
    Ok(b)
}

fn round_up_to_block(bits: usize) -> usize {
    bits.div_ceil(CIPHER_BLOCK_BITS) * CIPHER_BLOCK_BITS
}
