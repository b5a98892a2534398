// エラーハンドリング
pub mod error;
// RSA暗号関連 (拡張トラップドア関数を含む)
pub mod rsa;
// 共通ドメインの選択
pub mod domain;
// 結合関数とリング方程式の解法
pub mod combine;
// リング署名関連
pub mod ring;
// 暗号ユーティリティ
pub mod crypto_utils;
// 定数
pub mod constants;
// スキームパラメータ
pub mod params;
// 署名のJSONモデル
pub mod models;
// シリアライゼーションヘルパー
pub mod serialization;

pub use combine::{combine, solve, Slot};
pub use domain::common_domain_bits;
pub use error::{EncodingError, ParamsError, RingError, RsaError};
pub use models::SignaturePayload;
pub use params::{KeyOrdering, SchemeParams};
pub use ring::{ring_sign, ring_verify, RingSignature};
pub use rsa::{generate_keypair, g, g_inverse, rsa_sign, rsa_verify, KeyPair, PublicKey, SecretKey};
pub use serialization::{biguint_to_hex, hex_to_biguint};
