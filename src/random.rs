//! 安全随机数生成模块
//!
//! 提供密码学安全的盐值生成和常量时间比较。

use rand::{TryRngCore, rngs::OsRng};

use crate::error::{CryptoError, Error, Result};

/// 默认盐值长度（字节）
pub const SALT_LENGTH: usize = 16;

/// 生成一个 16 字节的随机盐值
pub fn generate_salt() -> Result<[u8; SALT_LENGTH]> {
    let mut salt = [0u8; SALT_LENGTH];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| Error::Crypto(CryptoError::RngFailed(format!("{:?}", e))))?;
    Ok(salt)
}

/// 常量时间比较两个字节切片
///
/// 用于防止时序攻击
///
/// # Example
///
/// ```rust
/// use passlab::random::constant_time_compare;
///
/// assert!(constant_time_compare(b"digest", b"digest"));
/// assert!(!constant_time_compare(b"digest", b"digesT"));
/// ```
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    use subtle::ConstantTimeEq;
    a.ct_eq(b).into()
}
