//! 暴力破解耗时估算
//!
//! 吞吐量均为模拟校准常量（hashes/second），不是实际测量值。
//! 平均情况假设攻击者尝试完一半密钥空间即可命中：
//!
//! ```text
//! seconds = (charset_size ^ length / 2) / hashes_per_second
//! ```
//!
//! 密钥空间使用任意精度整数计算，只在生成秒数时转换为浮点数。

use std::fmt;

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::{HashAlgorithm, HashEngine};

/// 一年的秒数（365 天）
pub const SECONDS_PER_YEAR: f64 = 31_536_000.0;

/// 校准表缺少条目时使用的吞吐量
pub const FALLBACK_HASHES_PER_SECOND: u64 = 1_000;

/// 破解耗时估算结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrackEstimate {
    /// 平均情况所需秒数
    pub seconds: f64,
    /// 人类可读的耗时
    pub human_readable: String,
    /// 平均情况下需要计算的哈希次数
    pub hashes_required: BigUint,
    /// 估算针对的算法
    pub algorithm: HashAlgorithm,
}

/// 模拟的硬件档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GpuTier {
    /// 高端 GPU
    Rtx4090,
    /// 中端 GPU
    Rtx3080,
    /// 仅 CPU
    CpuOnly,
}

impl GpuTier {
    /// 所有档位
    pub const ALL: [GpuTier; 3] = [GpuTier::Rtx4090, GpuTier::Rtx3080, GpuTier::CpuOnly];

    /// 展示名称
    pub fn label(&self) -> &'static str {
        match self {
            GpuTier::Rtx4090 => "RTX 4090",
            GpuTier::Rtx3080 => "RTX 3080",
            GpuTier::CpuOnly => "CPU only",
        }
    }

    /// 校准表中的吞吐量，未收录时为 `None`
    pub fn rated_hashes_per_second(&self, algorithm: HashAlgorithm) -> Option<u64> {
        use HashAlgorithm::*;

        match (self, algorithm) {
            (GpuTier::Rtx4090, Argon2id) => Some(50_000),
            (GpuTier::Rtx4090, Scrypt) => Some(100_000),
            (GpuTier::Rtx4090, Pbkdf2Sha256) => Some(10_000_000),
            (GpuTier::Rtx4090, Pbkdf2Sha512) => Some(5_000_000),
            (GpuTier::Rtx4090, Bcrypt) => Some(500_000),

            (GpuTier::Rtx3080, Argon2id) => Some(30_000),
            (GpuTier::Rtx3080, Scrypt) => Some(60_000),
            (GpuTier::Rtx3080, Pbkdf2Sha256) => Some(6_000_000),
            (GpuTier::Rtx3080, Bcrypt) => Some(300_000),

            (GpuTier::CpuOnly, Argon2id) => Some(1_000),
            (GpuTier::CpuOnly, Scrypt) => Some(2_000),
            (GpuTier::CpuOnly, Pbkdf2Sha256) => Some(100_000),
            (GpuTier::CpuOnly, Bcrypt) => Some(10_000),

            (GpuTier::Rtx3080 | GpuTier::CpuOnly, Pbkdf2Sha512) => None,
        }
    }

    /// 吞吐量（未收录时回退到 [`FALLBACK_HASHES_PER_SECOND`]）
    pub fn hashes_per_second(&self, algorithm: HashAlgorithm) -> u64 {
        self.rated_hashes_per_second(algorithm)
            .unwrap_or(FALLBACK_HASHES_PER_SECOND)
    }

    /// 所有档位、所有算法的吞吐量对比表
    pub fn performance_table() -> Vec<(GpuTier, Vec<(HashAlgorithm, u64)>)> {
        GpuTier::ALL
            .into_iter()
            .map(|tier| {
                let row = HashAlgorithm::ALL
                    .into_iter()
                    .map(|alg| (alg, tier.hashes_per_second(alg)))
                    .collect();
                (tier, row)
            })
            .collect()
    }
}

impl fmt::Display for GpuTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl HashAlgorithm {
    /// 估算使用的吞吐量：GPU 对应 RTX 4090 档，CPU 对应纯 CPU 档
    pub fn hashes_per_second(&self, use_gpu: bool) -> u64 {
        let tier = if use_gpu {
            GpuTier::Rtx4090
        } else {
            GpuTier::CpuOnly
        };
        tier.hashes_per_second(*self)
    }
}

impl HashEngine {
    /// 估算暴力破解耗时
    ///
    /// # Example
    ///
    /// ```rust
    /// use passlab::hash::{HashAlgorithm, HashEngine};
    ///
    /// let engine = HashEngine::new();
    /// let estimate = engine.estimate_crack_time(4, 10, HashAlgorithm::Pbkdf2Sha256, true);
    /// assert_eq!(estimate.hashes_required, 5000u32.into());
    /// assert!((estimate.seconds - 0.0005).abs() < 1e-12);
    /// ```
    pub fn estimate_crack_time(
        &self,
        password_length: usize,
        charset_size: u64,
        algorithm: HashAlgorithm,
        use_gpu: bool,
    ) -> CrackEstimate {
        estimate(
            password_length,
            charset_size,
            algorithm,
            algorithm.hashes_per_second(use_gpu),
        )
    }

    /// 针对指定硬件档位估算暴力破解耗时
    pub fn estimate_crack_time_on(
        &self,
        password_length: usize,
        charset_size: u64,
        algorithm: HashAlgorithm,
        tier: GpuTier,
    ) -> CrackEstimate {
        estimate(
            password_length,
            charset_size,
            algorithm,
            tier.hashes_per_second(algorithm),
        )
    }
}

/// 密钥空间大小 `charset_size ^ length`
pub fn keyspace(charset_size: u64, length: usize) -> BigUint {
    let exponent = u32::try_from(length).unwrap_or(u32::MAX);
    BigUint::from(charset_size).pow(exponent)
}

fn estimate(
    password_length: usize,
    charset_size: u64,
    algorithm: HashAlgorithm,
    hashes_per_second: u64,
) -> CrackEstimate {
    let average: BigUint = keyspace(charset_size, password_length) / 2u32;

    let seconds = average.to_f64().unwrap_or(f64::MAX) / hashes_per_second.max(1) as f64;
    // 超出 f64 范围时饱和，保证格式化结果仍是有限数字
    let seconds = if seconds.is_finite() { seconds } else { f64::MAX };

    CrackEstimate {
        seconds,
        human_readable: format_duration(seconds),
        hashes_required: average,
        algorithm,
    }
}

/// 把秒数格式化为分段的人类可读耗时
///
/// # Example
///
/// ```rust
/// use passlab::hash::format_duration;
///
/// assert_eq!(format_duration(0.0005), "0.50 milliseconds");
/// assert_eq!(format_duration(90.0), "1.50 minutes");
/// ```
pub fn format_duration(seconds: f64) -> String {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 3_600.0;
    const DAY: f64 = 86_400.0;

    if seconds < 1.0 {
        return format!("{:.2} milliseconds", seconds * 1000.0);
    }
    if seconds < MINUTE {
        return format!("{:.2} seconds", seconds);
    }
    if seconds < HOUR {
        return format!("{:.2} minutes", seconds / MINUTE);
    }
    if seconds < DAY {
        return format!("{:.2} hours", seconds / HOUR);
    }
    if seconds < SECONDS_PER_YEAR {
        return format!("{:.2} days", seconds / DAY);
    }

    let years = seconds / SECONDS_PER_YEAR;
    if years < 100.0 {
        format!("{:.2} years", years)
    } else if years < 1_000.0 {
        format!("{:.0} years", years)
    } else if years < 1_000_000.0 {
        format!("{:.0} thousand years", years / 1_000.0)
    } else if years < 1_000_000_000.0 {
        format!("{:.0} million years", years / 1_000_000.0)
    } else {
        format!("{:.0} billion years", years / 1_000_000_000.0)
    }
}
