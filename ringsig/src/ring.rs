use crate::combine::{combine, solve, Slot};
use crate::crypto_utils::message_key;
use crate::domain::common_domain_bits;
use crate::error::RingError;
use crate::params::{KeyOrdering, SchemeParams};
use crate::rsa::{g, g_inverse, KeyPair, PublicKey};
use anyhow::Result;
use log::{debug, error, info, warn};
use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};
use std::vec::Vec;

// リング署名を表す構造体
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingSignature {
    // リングメンバーの公開鍵 (署名者と無関係な順序)
    pub public_keys: Vec<PublicKey>,
    // グルー値 (検証の起点となる値)
    pub glue: BigUint,
    // 各リングメンバーの寄与値 (public_keys と同じ順序)
    pub x_values: Vec<BigUint>,
}

// g は n で割るため、モジュラスが小さすぎる公開鍵は先に弾く
pub(crate) fn check_moduli(keys: &[PublicKey]) -> Result<()> {
    if let Some(pk) = keys.iter().find(|pk| pk.n < BigUint::from(3u32)) {
        error!("不正なモジュラスの公開鍵があります: n = {}", pk.n);
        return Err(RingError::InvalidModulus(pk.n.to_string()).into());
    }
    Ok(())
}

// 公開鍵を署名者に依存しない順序に並べる
// まずモジュラス順に並べて重複を検出し、Shuffled の場合はその後シャッフルする
fn order_ring<R: Rng + CryptoRng>(
    ring: &mut [PublicKey],
    ordering: KeyOrdering,
    rng: &mut R,
) -> Result<()> {
    ring.sort();
    if ring.windows(2).any(|w| w[0] == w[1]) {
        error!("リング内に重複した公開鍵があります。");
        return Err(RingError::DuplicateKey.into());
    }
    if ordering == KeyOrdering::Shuffled {
        ring.shuffle(rng);
    }
    Ok(())
}

/// リング署名生成
/// m: 署名対象のメッセージ
/// non_signers: 署名者以外のリングメンバーの公開鍵 (順序は問わない)
/// signer: 署名者の鍵ペア
/// rng: 暗号論的に安全な乱数生成器
pub fn ring_sign<R: Rng + CryptoRng>(
    m: &[u8],
    non_signers: &[PublicKey],
    signer: &KeyPair,
    params: &SchemeParams,
    rng: &mut R,
) -> Result<RingSignature> {
    // infoには主要パラメータのみ、詳細はdebugで出力
    info!(
        "リング署名生成開始: ring_size = {}, m_len = {}",
        non_signers.len() + 1,
        m.len()
    );
    params.validate()?;
    if !signer.is_consistent(params) {
        error!("署名者の秘密鍵が公開鍵と対応していません。");
        return Err(RingError::SignerKeyMismatch.into());
    }

    // 署名者の公開鍵を加えてリングを構成
    let mut ring: Vec<PublicKey> = non_signers.to_vec();
    ring.push(signer.public.clone());
    if ring.len() < 2 {
        error!("リングのメンバーが足りません: {}", ring.len());
        return Err(RingError::RingTooSmall(ring.len()).into());
    }
    check_moduli(&ring)?;
    order_ring(&mut ring, params.key_ordering, rng)?;
    // 署名者の公開鍵は必ず ring に含まれ、重複も排除済みなので None にはならない
    let signer_index = ring
        .iter()
        .position(|pk| *pk == signer.public)
        .ok_or(RingError::SignerNotInRing)?;

    let b = common_domain_bits(&ring, params)?;
    // メッセージのハッシュ値を対称鍵 k として使用
    let k = message_key(m);
    debug!("ring_sign: b = {}", b);

    // グルー値 v をランダムに生成 (b ビット)
    let glue = rng.gen_biguint(b as u64);

    // 署名者以外のメンバーは x_i をランダムに選び y_i = g(x_i) を計算
    let mut x_values: Vec<Option<BigUint>> = vec![None; ring.len()];
    let mut slots: Vec<Slot> = Vec::with_capacity(ring.len());
    for (i, pk) in ring.iter().enumerate() {
        if i == signer_index {
            slots.push(Slot::Unknown);
            continue;
        }
        let x = rng.gen_biguint(b as u64);
        slots.push(Slot::Known(g(pk, &x, b, params)));
        x_values[i] = Some(x);
    }

    // リング方程式を解いて署名者の y_s を求め、秘密鍵で x_s = g⁻¹(y_s) を計算
    let y_s = solve(&slots, &k, &glue, b, params)?;
    x_values[signer_index] = Some(g_inverse(signer, &y_s, b));

    let ring_signature = RingSignature {
        public_keys: ring,
        glue,
        x_values: x_values.into_iter().flatten().collect(),
    };
    info!(
        "リング署名生成完了: glue bits = {}, x_values_len = {}",
        ring_signature.glue.bits(),
        ring_signature.x_values.len()
    );
    Ok(ring_signature)
}

/// リング署名検証
/// m: 検証対象のメッセージ
/// sig: 検証対象のリング署名
pub fn ring_verify(m: &[u8], sig: &RingSignature, params: &SchemeParams) -> Result<bool> {
    info!(
        "リング署名検証開始: ring_size = {}, x_values_len = {}, m_len = {}",
        sig.public_keys.len(),
        sig.x_values.len(),
        m.len()
    );
    params.validate()?;
    if sig.public_keys.len() != sig.x_values.len() {
        error!("公開鍵と寄与値の数が一致しません。");
        return Err(RingError::MalformedSignature {
            keys: sig.public_keys.len(),
            values: sig.x_values.len(),
        }
        .into());
    }
    if sig.public_keys.len() < 2 {
        return Err(RingError::RingTooSmall(sig.public_keys.len()).into());
    }

    check_moduli(&sig.public_keys)?;

    let b = common_domain_bits(&sig.public_keys, params)?;
    let bound = BigUint::one() << b;
    if sig.glue >= bound || sig.x_values.iter().any(|x| *x >= bound) {
        warn!("署名の値が {} ビットの共通ドメインを超えています。", b);
        return Err(RingError::ValueOutOfDomain(b).into());
    }

    let k = message_key(m);
    let ys: Vec<BigUint> = sig
        .public_keys
        .iter()
        .zip(&sig.x_values)
        .map(|(pk, x)| g(pk, x, b, params))
        .collect();

    // 結合関数の結果がグルー値 v と一致するかどうかで検証
    let verification = combine(&ys, &k, &sig.glue, b, params)? == sig.glue;
    info!("リング署名検証結果: {}", verification);
    Ok(verification)
}
