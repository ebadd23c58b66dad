//! 攻击模拟模块
//!
//! 完全离线的密码破解演示：候选密码生成器按攻击模式惰性产生猜测，
//! 模拟器在尝试次数、速率和时间的限制下把猜测与明文目标比较。
//!
//! ## 攻击模式
//!
//! - **Dictionary**: 逐行读取字典文件，不可用时回退到内置常见密码
//! - **BruteForce**: 按长度递增枚举字符集上的所有字符串
//! - **Hybrid**: 字典词加大小写、数字后缀、leet 等变形
//! - **Mask**: 按 `?l?u?d?s?a` 掩码枚举
//! - **CredentialStuffing**: 伪造的撞库凭据列表
//!
//! ## 示例
//!
//! ```rust
//! use std::time::Duration;
//! use passlab::attack::{AttackConfig, AttackMode, AttackSimulator};
//!
//! let config = AttackConfig::builder(AttackMode::Hybrid)
//!     .throttle_pause(Duration::ZERO)
//!     .build()
//!     .unwrap();
//!
//! let result = AttackSimulator::new().simulate_attack(&config, "Dragon2024");
//! assert!(result.success);
//! ```

mod config;
mod generator;
mod mask;
mod product;
mod simulator;
mod wordlist;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error};

pub use config::{
    AttackConfig, AttackConfigBuilder, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_LENGTH,
    DEFAULT_MIN_LENGTH, DEFAULT_PROGRESS_INTERVAL, DEFAULT_SPEED_LIMIT, DEFAULT_THROTTLE_PAUSE,
};
pub use generator::{
    CandidateGenerator, Candidates, DEMO_CREDENTIALS, HYBRID_SUFFIXES, capitalize, leet_speak,
    mutations,
};
pub use mask::{DIGITS, LOWERCASE, PUNCTUATION, SYMBOLS, UPPERCASE, parse_mask};
pub use product::CartesianProduct;
pub use simulator::{AttackOutcome, AttackResult, AttackSimulator, ProgressSink, StopHandle};
pub use wordlist::{DEFAULT_WORDLIST, WordlistReader};

/// 攻击模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackMode {
    /// 字典攻击
    Dictionary,
    /// 暴力破解
    BruteForce,
    /// 字典 + 变形
    Hybrid,
    /// 掩码攻击
    Mask,
    /// 撞库（演示数据）
    CredentialStuffing,
}

impl AttackMode {
    /// 所有模式
    pub const ALL: [AttackMode; 5] = [
        AttackMode::Dictionary,
        AttackMode::BruteForce,
        AttackMode::Hybrid,
        AttackMode::Mask,
        AttackMode::CredentialStuffing,
    ];

    /// 机器可读名称（与 serde 表示一致）
    pub fn as_str(&self) -> &'static str {
        match self {
            AttackMode::Dictionary => "dictionary",
            AttackMode::BruteForce => "brute_force",
            AttackMode::Hybrid => "hybrid",
            AttackMode::Mask => "mask",
            AttackMode::CredentialStuffing => "credential_stuffing",
        }
    }
}

impl fmt::Display for AttackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttackMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        AttackMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| {
                Error::Config(ConfigError::UnsupportedValue {
                    kind: "attack mode",
                    value: s.to_string(),
                })
            })
    }
}
