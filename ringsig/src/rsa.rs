use crate::constants::MIN_PRIME_BITS;
use crate::error::RsaError;
use crate::params::SchemeParams;
use anyhow::Result;
use log::{debug, info, trace, warn};
use num_bigint::BigUint;
use num_integer::Integer;
use num_prime::RandPrime;
use num_traits::{One, Zero};
use rand::{CryptoRng, Rng};
use std::fmt;

// RSA公開鍵を表す構造体 (公開指数 e は SchemeParams 側で保持する)
// 等価性と順序はモジュラス n のみで決まる
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PublicKey {
    // モジュラス (法)
    pub n: BigUint,
}

impl PublicKey {
    pub fn new(n: BigUint) -> Self {
        PublicKey { n }
    }
}

// RSA秘密鍵を表す構造体
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey {
    // 秘密指数
    pub d: BigUint,
}

// 秘密指数をログに出さないため Debug は手書き
impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey").field("d", &"<redacted>").finish()
    }
}

// RSA鍵ペア (公開鍵と秘密鍵) を表す構造体
#[derive(Clone, Debug)]
pub struct KeyPair {
    pub public: PublicKey,
    pub secret: SecretKey,
}

impl KeyPair {
    /// 素数 p, q から鍵ペアを構築する
    pub fn from_primes(
        p: &BigUint,
        q: &BigUint,
        params: &SchemeParams,
    ) -> std::result::Result<KeyPair, RsaError> {
        if p == q {
            return Err(RsaError::IdenticalPrimes);
        }
        // モジュラス n = p * q
        let n = p * q;
        // オイラーのトーシェント関数 φ(n) = (p-1)*(q-1)
        let phi = (p - BigUint::one()) * (q - BigUint::one());
        trace!("from_primes: n = {}, phi = {}", n, phi);

        // e と φ(n) が互いに素でない場合は逆元が存在しない
        let d = params.e().modinv(&phi).ok_or(RsaError::NotCoprime)?;
        Ok(KeyPair {
            public: PublicKey { n },
            secret: SecretKey { d },
        })
    }

    /// 秘密指数が公開指数の逆元になっているかを固定の証人 2 で確認する
    pub fn is_consistent(&self, params: &SchemeParams) -> bool {
        let n = &self.public.n;
        if *n <= BigUint::from(2u32) || self.secret.d.is_zero() {
            return false;
        }
        let witness = BigUint::from(2u32);
        witness.modpow(&params.e(), n).modpow(&self.secret.d, n) == witness
    }
}

/// RSA鍵ペア生成
/// prime_bits: 素数 p, q それぞれのビット長 (n はおよそ 2 * prime_bits ビット)
/// rng: 暗号論的に安全な乱数生成器
pub fn generate_keypair<R: Rng + CryptoRng>(
    prime_bits: usize,
    params: &SchemeParams,
    rng: &mut R,
) -> Result<KeyPair> {
    info!("RSA鍵ペア生成開始: prime_bits = {}", prime_bits);
    if prime_bits < MIN_PRIME_BITS {
        return Err(RsaError::InvalidBitLength(prime_bits).into());
    }
    let keypair = generate_keypair_from_source(params, || rng.gen_prime_exact(prime_bits, None))?;
    info!("RSA鍵ペア生成完了: n bits = {}", keypair.public.n.bits());
    Ok(keypair)
}

// 素数の供給源を差し替えられるようにした鍵生成ループ
// e が φ(n) と互いに素でない場合や p == q の場合は素数を引き直す
fn generate_keypair_from_source(
    params: &SchemeParams,
    mut next_prime: impl FnMut() -> BigUint,
) -> Result<KeyPair> {
    params.validate()?;
    for attempt in 1..=params.max_keygen_attempts {
        let p = next_prime();
        let q = next_prime();
        match KeyPair::from_primes(&p, &q, params) {
            Ok(keypair) => {
                debug!("generate_keypair: succeeded on attempt {}", attempt);
                return Ok(keypair);
            }
            Err(e @ (RsaError::NotCoprime | RsaError::IdenticalPrimes)) => {
                warn!("generate_keypair: attempt {} rejected ({}), resampling", attempt, e);
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(RsaError::KeyGenerationExhausted(params.max_keygen_attempts).into())
}

/// RSA署名生成 s = m^d mod n
/// m: 署名対象 (m < n)
pub fn rsa_sign(m: &BigUint, secret: &SecretKey, public: &PublicKey) -> Result<BigUint> {
    info!(
        "RSA署名生成開始: n bits = {}, m bits = {}",
        public.n.bits(),
        m.bits()
    );
    if *m >= public.n {
        return Err(RsaError::MessageTooLarge.into());
    }
    let signature = m.modpow(&secret.d, &public.n);
    debug!("RSA署名生成完了: signature = {}", signature);
    Ok(signature)
}

/// RSA署名検証 s^e mod n == m
pub fn rsa_verify(
    m: &BigUint,
    signature: &BigUint,
    public: &PublicKey,
    params: &SchemeParams,
) -> bool {
    if *signature >= public.n {
        warn!("RSA署名検証: 署名がモジュラス以上です");
        return false;
    }
    let verification = signature.modpow(&params.e(), &public.n) == *m;
    info!("RSA署名検証結果: {}", verification);
    verification
}

// (q+1)*n <= 2^b のとき x は n ごとのブロックに完全に収まっている
fn fits_full_block(q: &BigUint, n: &BigUint, b: usize) -> bool {
    (q + BigUint::one()) * n <= BigUint::one() << b
}

/// 拡張RSAトラップドア関数
/// g(x) = q*n + (r^e mod n)  ((q+1)*n <= 2^b の場合)
/// g(x) = x                  (それ以外: 最後の不完全なブロック)
/// x: 入力値 (0 <= x < 2^b)
/// b: 共通ドメインのビット長
pub fn g(pubkey: &PublicKey, x: &BigUint, b: usize, params: &SchemeParams) -> BigUint {
    // 内部不変条件: n > 0
    assert!(!pubkey.n.is_zero(), "RSA公開鍵nが0です");
    trace!("g: x = {}, b = {}", x, b);
    // x を n で割った商 q と剰余 r を計算
    let (q, r) = x.div_rem(&pubkey.n);
    if !fits_full_block(&q, &pubkey.n, b) {
        trace!("g: 最後の不完全なブロックなので恒等写像");
        return x.clone();
    }
    let r_exp = r.modpow(&params.e(), &pubkey.n);
    let result = &q * &pubkey.n + r_exp;
    trace!("g: result = {}", result);
    result
}

/// 拡張RSAトラップドア関数の逆関数 (秘密指数 d を使う)
/// y: 入力値 (0 <= y < 2^b)
/// b: 共通ドメインのビット長
pub fn g_inverse(keypair: &KeyPair, y: &BigUint, b: usize) -> BigUint {
    let n = &keypair.public.n;
    // 内部不変条件: n > 0
    assert!(!n.is_zero(), "RSA公開鍵nが0です");
    trace!("g_inverse: y = {}, b = {}", y, b);
    let (q, r) = y.div_rem(n);
    if !fits_full_block(&q, n, b) {
        return y.clone();
    }
    let r_dec = r.modpow(&keypair.secret.d, n);
    let result = &q * n + r_dec;
    trace!("g_inverse: result = {}", result);
    result
}
