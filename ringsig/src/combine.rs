use crate::crypto_utils::{d_k, e_k};
use crate::error::RingError;
use crate::params::SchemeParams;
use anyhow::Result;
use log::{debug, trace};
use num_bigint::BigUint;

/// リング方程式の各スロット (署名者のスロットだけが Unknown)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    Known(BigUint),
    Unknown,
}

/// 結合関数 C_{k,v}(y_1, ..., y_r)
/// t = v から始めて、各 y_i について t = E_k(t XOR y_i) を繰り返す
/// ys: リング順に並んだ y_i
/// k: 対称鍵
/// glue: グルー値 v
/// b: 共通ドメインのビット長
pub fn combine(
    ys: &[BigUint],
    k: &BigUint,
    glue: &BigUint,
    b: usize,
    params: &SchemeParams,
) -> Result<BigUint> {
    let mut t = glue.clone();
    for (i, y) in ys.iter().enumerate() {
        t = e_k(k, &(y ^ &t), b, params)?;
        trace!("combine: t[{}] = {}", i, t);
    }
    Ok(t)
}

/// リング方程式 C_{k,v}(y_1, ..., y_r) = v を唯一の Unknown スロットについて解く
///
/// 前方向には Unknown の直前まで結合関数を進め、後方向には v から D_k と XOR で
/// Unknown の直後まで戻る。両者の間を埋める値が y_s = D_k(後方向の値) XOR 前方向の値。
pub fn solve(
    slots: &[Slot],
    k: &BigUint,
    glue: &BigUint,
    b: usize,
    params: &SchemeParams,
) -> Result<BigUint> {
    let unknowns: Vec<usize> = slots
        .iter()
        .enumerate()
        .filter(|(_, slot)| matches!(slot, Slot::Unknown))
        .map(|(i, _)| i)
        .collect();
    if unknowns.len() != 1 {
        return Err(RingError::UnknownSlotCount(unknowns.len()).into());
    }
    let s = unknowns[0];
    debug!("solve: ring_size = {}, unknown slot = {}", slots.len(), s);

    let known = |slot: &Slot| match slot {
        Slot::Known(y) => y.clone(),
        Slot::Unknown => unreachable!("only slot {} is unknown", s),
    };

    // 前方向: v から s の直前まで
    let before: Vec<BigUint> = slots[..s].iter().map(known).collect();
    let forward = combine(&before, k, glue, b, params)?;
    trace!("solve: forward = {}", forward);

    // 後方向: v から末尾側を逆にたどり s の直後まで
    let mut backward = glue.clone();
    for slot in slots[s + 1..].iter().rev() {
        backward = d_k(k, &backward, b, params)? ^ known(slot);
    }
    trace!("solve: backward = {}", backward);

    let y_s = d_k(k, &backward, b, params)? ^ forward;
    trace!("solve: y_s = {}", y_s);
    Ok(y_s)
}
