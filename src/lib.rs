//! # passlab
//!
//! 面向安全教育的密码实验库：密码强度分析、多算法哈希以及完全离线的破解模拟。
//!
//! ## 功能特性
//!
//! - **密码哈希**: Argon2id、scrypt、PBKDF2-SHA256/512、bcrypt 统一在一个引擎之后
//! - **破解耗时估算**: 基于模拟吞吐量表，使用任意精度整数计算密钥空间
//! - **候选生成**: 字典、暴力破解、混合变形、掩码、撞库演示，全部惰性生成
//! - **攻击模拟**: 尝试次数、速率、时间上限，可从其他线程协作式取消
//! - **强度分析**: 熵、弱点模式、0-100 评分、强度等级和改进建议
//!
//! 本库不会访问网络，也不会保存任何凭据。模拟攻击只与明文目标比较。
//!
//! ## 密码哈希示例
//!
//! ```rust
//! use passlab::{HashAlgorithm, HashEngine, HashParams};
//!
//! let engine = HashEngine::new();
//! let result = engine
//!     .hash("my_password", HashAlgorithm::Bcrypt, Some(&HashParams::new().with_rounds(4)))
//!     .unwrap();
//!
//! assert!(engine.verify("my_password", &result.hash_value, HashAlgorithm::Bcrypt));
//! ```
//!
//! ## 密码强度分析
//!
//! ```rust
//! use passlab::{PasswordAnalyzer, PasswordStrength};
//!
//! let analysis = PasswordAnalyzer::new().analyze("Tr0ub4dor&3");
//! assert!(analysis.score <= 100);
//! assert!(analysis.strength < PasswordStrength::VeryStrong);
//! ```
//!
//! ## 攻击模拟示例
//!
//! ```rust
//! use std::time::Duration;
//! use passlab::{AttackConfig, AttackMode, AttackOutcome, AttackSimulator};
//!
//! let config = AttackConfig::builder(AttackMode::Mask)
//!     .mask("pin?d?d")
//!     .throttle_pause(Duration::ZERO)
//!     .build()
//!     .unwrap();
//!
//! let result = AttackSimulator::new().simulate_attack(&config, "pin42");
//! assert_eq!(result.outcome, AttackOutcome::Found);
//! assert_eq!(result.attempts, 42);
//! ```

pub mod analyzer;
pub mod attack;
pub mod error;
pub mod hash;
pub mod random;

pub use error::{Error, Result};

// ============================================================================
// 哈希相关导出
// ============================================================================

pub use hash::{
    Argon2Settings, CrackEstimate, GpuTier, HashAlgorithm, HashEngine, HashParams, HashResult,
};

// ============================================================================
// 攻击模拟相关导出
// ============================================================================

pub use attack::{
    AttackConfig, AttackConfigBuilder, AttackMode, AttackOutcome, AttackResult, AttackSimulator,
    CandidateGenerator, ProgressSink, StopHandle,
};

// ============================================================================
// 强度分析相关导出
// ============================================================================

pub use analyzer::{
    PasswordAnalysis, PasswordAnalyzer, PasswordStrength, PatternMatch, PatternType, Severity,
};

// ============================================================================
// 随机数生成函数导出
// ============================================================================

pub use random::{constant_time_compare, generate_salt};
