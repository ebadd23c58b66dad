//! 密码哈希模块
//!
//! 把多种密码哈希算法统一在 [`HashEngine`] 之后，并提供基于模拟吞吐量的暴力破解耗时估算。
//!
//! ## 支持的算法
//!
//! - **Argon2id** (推荐): 内存硬哈希算法，盐值内嵌在 PHC 编码输出中
//! - **scrypt**: 内存硬算法，显式 16 字节盐值，输出十六进制
//! - **PBKDF2-SHA256 / PBKDF2-SHA512**: 迭代型 KDF，显式 16 字节盐值，输出十六进制
//! - **bcrypt**: 经典算法，盐值内嵌在 `$2b$` 编码输出中
//!
//! ## 示例
//!
//! ### 哈希与验证
//!
//! ```rust
//! use passlab::hash::{HashAlgorithm, HashEngine, HashParams};
//!
//! let engine = HashEngine::new();
//! let params = HashParams::new().with_iterations(1_000);
//! let result = engine
//!     .hash("my_password", HashAlgorithm::Pbkdf2Sha256, Some(&params))
//!     .unwrap();
//!
//! assert!(result.salt.is_some());
//! assert!(engine.verify_result("my_password", &result));
//! assert!(!engine.verify_result("wrong", &result));
//! ```
//!
//! ### 破解耗时估算
//!
//! ```rust
//! use passlab::hash::{HashAlgorithm, HashEngine};
//!
//! let engine = HashEngine::new();
//! let estimate = engine.estimate_crack_time(4, 10, HashAlgorithm::Pbkdf2Sha256, true);
//! assert_eq!(estimate.human_readable, "0.50 milliseconds");
//! ```

mod engine;
pub mod estimate;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error};

pub use engine::{
    Argon2Settings, BCRYPT_DEFAULT_COST, HashEngine, HashParams, HashResult,
    MAX_VERIFY_ARGON2_TIME_COST, MAX_VERIFY_BCRYPT_COST, MAX_VERIFY_MEMORY_BYTES,
    MAX_VERIFY_PBKDF2_ITERATIONS, OUTPUT_LENGTH, PBKDF2_DEFAULT_ITERATIONS, SCRYPT_DEFAULT_N,
    SCRYPT_DEFAULT_P, SCRYPT_DEFAULT_R,
};
pub use estimate::{CrackEstimate, GpuTier, format_duration, keyspace};

/// 支持的哈希算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// Argon2id - 推荐的默认算法
    /// 结合了 Argon2i（抵抗侧信道攻击）和 Argon2d（抵抗 GPU 攻击）的优点
    Argon2id,
    /// scrypt - 内存硬，抵抗 GPU 攻击
    Scrypt,
    /// PBKDF2-HMAC-SHA256
    Pbkdf2Sha256,
    /// PBKDF2-HMAC-SHA512
    Pbkdf2Sha512,
    /// bcrypt - 经典算法，广泛支持
    Bcrypt,
}

impl HashAlgorithm {
    /// 所有算法，按声明顺序
    pub const ALL: [HashAlgorithm; 5] = [
        HashAlgorithm::Argon2id,
        HashAlgorithm::Scrypt,
        HashAlgorithm::Pbkdf2Sha256,
        HashAlgorithm::Pbkdf2Sha512,
        HashAlgorithm::Bcrypt,
    ];

    /// 机器可读名称（与 serde 表示一致）
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Argon2id => "argon2id",
            HashAlgorithm::Scrypt => "scrypt",
            HashAlgorithm::Pbkdf2Sha256 => "pbkdf2_sha256",
            HashAlgorithm::Pbkdf2Sha512 => "pbkdf2_sha512",
            HashAlgorithm::Bcrypt => "bcrypt",
        }
    }

    /// 展示用名称
    pub fn display_name(&self) -> &'static str {
        match self {
            HashAlgorithm::Argon2id => "Argon2id",
            HashAlgorithm::Scrypt => "scrypt",
            HashAlgorithm::Pbkdf2Sha256 => "PBKDF2-SHA256",
            HashAlgorithm::Pbkdf2Sha512 => "PBKDF2-SHA512",
            HashAlgorithm::Bcrypt => "bcrypt",
        }
    }

    /// 是否为内存硬算法
    pub fn is_memory_hard(&self) -> bool {
        matches!(self, HashAlgorithm::Argon2id | HashAlgorithm::Scrypt)
    }

    /// 盐值是否内嵌在算法自身的编码输出中
    pub fn embeds_salt(&self) -> bool {
        matches!(self, HashAlgorithm::Argon2id | HashAlgorithm::Bcrypt)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        HashAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.as_str() == normalized)
            .ok_or_else(|| {
                Error::Config(ConfigError::UnsupportedValue {
                    kind: "hash algorithm",
                    value: s.to_string(),
                })
            })
    }
}
