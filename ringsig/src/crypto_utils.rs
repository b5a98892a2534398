// AES-256 (CBC モード) 関連
use aes::Aes256;
use block_padding::NoPadding;
use cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use log::{debug, trace};
use num_bigint::BigUint;
// ハッシュ関数 (SHA3-256)
use sha3::{Digest, Sha3_256};

use crate::constants::CIPHER_BLOCK_BITS;
use crate::error::EncodingError;
use crate::params::SchemeParams;
use crate::serialization::to_padded_bytes;
use anyhow::Result;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

// AES-256 の鍵長 (バイト)
const KEY_BYTES: usize = 32;

/// メッセージの SHA3-256 ハッシュ値を整数として解釈したもの (対称鍵 k)
pub fn message_key(m: &[u8]) -> BigUint {
    let hash = Sha3_256::digest(m);
    trace!("message_key: hash = {:?}", hash);
    BigUint::from_bytes_be(&hash)
}

// 値 x を b ビットのドメインに対応するバイト列へ変換する
fn domain_bytes(x: &BigUint, b: usize) -> Result<Vec<u8>> {
    if b == 0 || b % CIPHER_BLOCK_BITS != 0 {
        return Err(EncodingError::Cipher(format!(
            "domain of {} bits is not a multiple of the {}-bit block",
            b, CIPHER_BLOCK_BITS
        ))
        .into());
    }
    to_padded_bytes(x, b / 8)
}

/// 対称鍵暗号関数 e_k (AES-256-CBC, 固定 IV, パディングなし)
/// k: 対称鍵 (256 ビット以下の BigUint)
/// x: 平文 (b ビット未満)
/// b: 共通ドメインのビット長 (128 の倍数)
pub fn e_k(k: &BigUint, x: &BigUint, b: usize, params: &SchemeParams) -> Result<BigUint> {
    trace!("e_k: x = {}, b = {}", x, b);
    let mut buffer = domain_bytes(x, b)?;
    let len = buffer.len();
    let key = to_padded_bytes(k, KEY_BYTES)?;

    let cipher = Aes256CbcEnc::new_from_slices(&key, &params.iv)
        .map_err(|e| EncodingError::Cipher(e.to_string()))?;
    let encrypted = cipher
        .encrypt_padded_mut::<NoPadding>(&mut buffer, len)
        .map_err(|e| EncodingError::Cipher(e.to_string()))?;
    debug!("e_k: encrypted {} bytes", encrypted.len());

    let result = BigUint::from_bytes_be(encrypted);
    trace!("e_k: result = {}", result);
    Ok(result)
}

/// 対称鍵暗号関数 d_k (e_k の逆関数)
pub fn d_k(k: &BigUint, y: &BigUint, b: usize, params: &SchemeParams) -> Result<BigUint> {
    trace!("d_k: y = {}, b = {}", y, b);
    let mut buffer = domain_bytes(y, b)?;
    let key = to_padded_bytes(k, KEY_BYTES)?;

    let cipher = Aes256CbcDec::new_from_slices(&key, &params.iv)
        .map_err(|e| EncodingError::Cipher(e.to_string()))?;
    let decrypted = cipher
        .decrypt_padded_mut::<NoPadding>(&mut buffer)
        .map_err(|e| EncodingError::Cipher(e.to_string()))?;
    debug!("d_k: decrypted {} bytes", decrypted.len());

    let result = BigUint::from_bytes_be(decrypted);
    trace!("d_k: result = {}", result);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use num_bigint::RandBigInt;
    use num_traits::One;
    use proptest::prelude::*;
    use rand::thread_rng;

    // SHA3-256("Hello, World!") の既知の値
    #[test]
    fn test_message_key_fixture() {
        let expected = hex!("1af17a664e3fa8e419b8ba05c2a173169df76162a5a286e0c405b460d478f7ef");
        assert_eq!(
            message_key(b"Hello, World!"),
            BigUint::from_bytes_be(&expected)
        );
    }

    // 対称鍵暗号化・復号の基本的なテスト
    #[test]
    fn test_symmetric_encryption() -> Result<()> {
        let mut rng = thread_rng();
        let params = SchemeParams::default();
        let k = message_key(b"key material");
        for b in [128usize, 256, 1280] {
            for _ in 0..10 {
                let x = rng.gen_biguint(b as u64);
                let encrypted = e_k(&k, &x, b, &params)?;
                assert!(encrypted < (BigUint::one() << b));
                let decrypted = d_k(&k, &encrypted, b, &params)?;
                assert_eq!(decrypted, x, "b={}で失敗", b);
            }
        }
        Ok(())
    }

    // CBC モードなので先頭ブロックの変化は後続ブロックへ伝搬する
    #[test]
    fn test_e_k_chains_blocks() -> Result<()> {
        let params = SchemeParams::default();
        let k = message_key(b"chain");
        let b = 256;
        let x1 = BigUint::one() << 200;
        let x2 = (BigUint::one() << 200) + (BigUint::one() << 255);
        let low_mask = (BigUint::one() << 128) - BigUint::one();
        let y1 = e_k(&k, &x1, b, &params)?;
        let y2 = e_k(&k, &x2, b, &params)?;
        assert_ne!(&y1 & &low_mask, &y2 & &low_mask);
        Ok(())
    }

    // IV が異なれば暗号文も異なる
    #[test]
    fn test_e_k_depends_on_iv() -> Result<()> {
        let params = SchemeParams::default();
        let mut other = SchemeParams::default();
        other.iv = [0u8; 16];
        let k = message_key(b"iv");
        let x = BigUint::from(42u32);
        assert_ne!(e_k(&k, &x, 128, &params)?, e_k(&k, &x, 128, &other)?);
        Ok(())
    }

    // ブロック長の倍数でないドメインはエラー
    #[test]
    fn test_e_k_rejects_unaligned_domain() {
        let params = SchemeParams::default();
        let k = message_key(b"unaligned");
        let err = e_k(&k, &BigUint::one(), 200, &params).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EncodingError>(),
            Some(EncodingError::Cipher(_))
        ));
    }

    // ドメインに収まらない値はエラー
    #[test]
    fn test_e_k_rejects_oversized_value() {
        let params = SchemeParams::default();
        let k = message_key(b"oversized");
        let x = BigUint::one() << 128;
        let err = d_k(&k, &x, 128, &params).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EncodingError>(),
            Some(EncodingError::TooWide { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_d_k_inverts_e_k(
            key in proptest::collection::vec(any::<u8>(), 32),
            data in proptest::collection::vec(any::<u8>(), 48),
        ) {
            let params = SchemeParams::default();
            let k = BigUint::from_bytes_be(&key);
            let x = BigUint::from_bytes_be(&data);
            let y = e_k(&k, &x, 384, &params).unwrap();
            prop_assert_eq!(d_k(&k, &y, 384, &params).unwrap(), x);
        }
    }
}
