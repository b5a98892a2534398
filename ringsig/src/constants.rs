// RSA公開指数 (一般的に使用される65537)
pub const E: u32 = 65537;
// リング署名における共通ドメインのビット長に追加するビット数
pub const COMMON_DOMAIN_BIT_LENGTH_ADDITION: usize = 160;
// AES のブロック長 (ビット)。共通ドメインのビット長はこの倍数に切り上げる
pub const CIPHER_BLOCK_BITS: usize = 128;
// 結合関数の CBC モードで使用する固定 IV (16バイト)
pub const FIXED_IV: [u8; 16] = [0x24u8; 16];
// 鍵ペア生成で受け付ける素数の最小ビット長
pub const MIN_PRIME_BITS: usize = 16;
// 鍵ペア生成で素数を引き直す最大回数
pub const MAX_KEYGEN_ATTEMPTS: usize = 64;
