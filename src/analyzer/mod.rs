//! 密码强度分析模块
//!
//! 计算熵、检测常见弱点模式、给出 0-100 评分和强度等级，
//! 并借助 [`HashEngine`] 的耗时估算生成各算法的破解时间表。
//!
//! ## 评分规则
//!
//! 1. 基础分 `min(100, floor(entropy / 128 * 100))`
//! 2. 每个模式按严重程度扣分：高 25、中 15、低 5（累计）
//! 3. 长度 ≥16 加 10 分，否则长度 ≥12 加 5 分
//! 4. 最终结果限制在 `[0, 100]`
//!
//! ## 示例
//!
//! ```rust
//! use passlab::analyzer::{PasswordAnalyzer, PasswordStrength, PatternType};
//!
//! let analysis = PasswordAnalyzer::new().analyze("password");
//! assert!(analysis.has_pattern(PatternType::CommonPassword));
//! assert_eq!(analysis.strength, PasswordStrength::VeryWeak);
//! ```

mod patterns;
mod strength;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::hash::{HashAlgorithm, HashEngine};

pub use patterns::{
    COMMON_PASSWORDS, KEYBOARD_PATTERNS, LEET_CHARS, PatternMatch, PatternType, SEQUENCES,
    Severity, detect_patterns,
};
pub use strength::{
    MAX_SCORED_ENTROPY, PasswordStrength, calculate_score, charset_size, entropy_bits,
};

/// 破解时间表中包含的算法
pub const CRACK_TABLE_ALGORITHMS: [HashAlgorithm; 3] = [
    HashAlgorithm::Argon2id,
    HashAlgorithm::Bcrypt,
    HashAlgorithm::Pbkdf2Sha256,
];

/// 破解时间表中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrackTimeEntry {
    /// 算法
    pub algorithm: HashAlgorithm,
    /// 展示名称
    pub label: String,
    /// 纯 CPU 的平均破解耗时
    pub cpu: String,
    /// GPU 的平均破解耗时
    pub gpu: String,
}

/// 密码分析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordAnalysis {
    /// 原始密码
    pub password: String,
    /// 长度（字符数）
    pub length: usize,
    /// 字符集大小
    pub charset_size: u64,
    /// 熵（比特）
    pub entropy_bits: f64,
    /// 强度等级
    pub strength: PasswordStrength,
    /// 命中的模式
    pub patterns: Vec<PatternMatch>,
    /// 各算法的破解时间
    pub crack_times: Vec<CrackTimeEntry>,
    /// 评分 (0-100)
    pub score: u8,
    /// 改进建议
    pub recommendations: Vec<String>,
}

impl PasswordAnalysis {
    /// 是否命中指定类型的模式
    pub fn has_pattern(&self, pattern_type: PatternType) -> bool {
        self.patterns.iter().any(|p| p.pattern_type == pattern_type)
    }

    /// 查找指定算法的破解时间
    pub fn crack_time(&self, algorithm: HashAlgorithm) -> Option<&CrackTimeEntry> {
        self.crack_times.iter().find(|e| e.algorithm == algorithm)
    }
}

/// 密码分析器
#[derive(Debug, Clone, Default)]
pub struct PasswordAnalyzer {
    engine: HashEngine,
}

impl PasswordAnalyzer {
    /// 使用默认哈希引擎创建分析器
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定的哈希引擎
    pub fn with_engine(engine: HashEngine) -> Self {
        Self { engine }
    }

    /// 分析密码
    ///
    /// 不依赖任何外部状态，对同一密码重复调用得到相同结果。
    pub fn analyze(&self, password: &str) -> PasswordAnalysis {
        let length = password.chars().count();
        let charset_size = charset_size(password);
        let entropy_bits = entropy_bits(length, charset_size);

        let patterns = detect_patterns(password);
        trace!(patterns = patterns.len(), length, "pattern detection finished");

        let crack_times = self.crack_times(length, charset_size);
        let score = calculate_score(length, entropy_bits, &patterns);
        let strength = PasswordStrength::from_score(score, entropy_bits);
        let recommendations = recommendations(length, charset_size, &patterns, strength);

        PasswordAnalysis {
            password: password.to_string(),
            length,
            charset_size,
            entropy_bits,
            strength,
            patterns,
            crack_times,
            score,
            recommendations,
        }
    }

    fn crack_times(&self, length: usize, charset_size: u64) -> Vec<CrackTimeEntry> {
        CRACK_TABLE_ALGORITHMS
            .into_iter()
            .map(|algorithm| {
                let cpu = self
                    .engine
                    .estimate_crack_time(length, charset_size, algorithm, false);
                let gpu = self
                    .engine
                    .estimate_crack_time(length, charset_size, algorithm, true);
                CrackTimeEntry {
                    algorithm,
                    label: algorithm.display_name().to_string(),
                    cpu: cpu.human_readable,
                    gpu: gpu.human_readable,
                }
            })
            .collect()
    }
}

// ============================================================================
// 改进建议
// ============================================================================

fn recommendations(
    length: usize,
    charset_size: u64,
    patterns: &[PatternMatch],
    strength: PasswordStrength,
) -> Vec<String> {
    let has = |t: PatternType| patterns.iter().any(|p| p.pattern_type == t);
    let mut out = Vec::new();

    if length < 12 {
        out.push(format!(
            "Increase length to at least 12 characters (current: {}). \
             Each additional character exponentially increases security.",
            length
        ));
    } else if length < 16 {
        out.push("Consider using 16+ characters for maximum security.".to_string());
    }

    if charset_size < 62 {
        out.push("Use a mix of uppercase, lowercase, numbers, and special characters.".to_string());
    }

    if has(PatternType::CommonPassword) {
        out.push("CRITICAL: This is a commonly used password. Change it immediately!".to_string());
    }

    if has(PatternType::KeyboardPattern) {
        out.push(
            "Avoid keyboard patterns (qwerty, asdf, etc.). Use random characters instead."
                .to_string(),
        );
    }

    if has(PatternType::DateYear) {
        out.push(
            "Avoid using dates or years. This information can be easily guessed.".to_string(),
        );
    }

    if strength.is_weak() {
        out.push(
            "Use a password manager to generate and store strong, unique passwords.".to_string(),
        );
        out.push("Enable Multi-Factor Authentication (MFA) for critical accounts.".to_string());
    }

    if out.is_empty() {
        out.push(
            "Password is strong! Remember to use unique passwords for each account.".to_string(),
        );
        out.push("Enable MFA for additional security layer.".to_string());
    }

    out
}
