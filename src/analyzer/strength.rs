//! 强度度量：字符集大小、熵、评分和强度等级

use std::fmt;

use serde::{Deserialize, Serialize};

use super::patterns::PatternMatch;

/// 熵达到此值时基础分为满分
pub const MAX_SCORED_ENTROPY: f64 = 128.0;

/// 密码强度等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordStrength {
    /// 非常弱 - 容易被破解
    VeryWeak = 0,
    /// 弱 - 不推荐使用
    Weak = 1,
    /// 中等 - 最低可接受
    Moderate = 2,
    /// 强 - 推荐使用
    Strong = 3,
    /// 非常强 - 高度安全
    VeryStrong = 4,
}

impl PasswordStrength {
    /// 获取强度的描述
    pub fn description(&self) -> &'static str {
        match self {
            PasswordStrength::VeryWeak => "Very weak - easily cracked",
            PasswordStrength::Weak => "Weak - not recommended",
            PasswordStrength::Moderate => "Moderate - minimum acceptable",
            PasswordStrength::Strong => "Strong - recommended",
            PasswordStrength::VeryStrong => "Very strong - highly secure",
        }
    }

    /// 根据分数和熵确定强度等级，第一个满足的等级生效
    pub fn from_score(score: u8, entropy_bits: f64) -> Self {
        if score >= 80 && entropy_bits >= 80.0 {
            PasswordStrength::VeryStrong
        } else if score >= 60 && entropy_bits >= 60.0 {
            PasswordStrength::Strong
        } else if score >= 40 && entropy_bits >= 40.0 {
            PasswordStrength::Moderate
        } else if score >= 20 {
            PasswordStrength::Weak
        } else {
            PasswordStrength::VeryWeak
        }
    }

    /// 是否属于弱密码（VeryWeak 或 Weak）
    pub fn is_weak(&self) -> bool {
        *self <= PasswordStrength::Weak
    }
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PasswordStrength::VeryWeak => "VERY WEAK",
            PasswordStrength::Weak => "WEAK",
            PasswordStrength::Moderate => "MODERATE",
            PasswordStrength::Strong => "STRONG",
            PasswordStrength::VeryStrong => "VERY STRONG",
        };
        f.write_str(s)
    }
}

/// 按出现的字符类别求和：小写 26、大写 26、数字 10、ASCII 标点 32、空格 1
///
/// 结果最小为 1，保证熵有定义。
pub fn charset_size(password: &str) -> u64 {
    let mut lower = false;
    let mut upper = false;
    let mut digit = false;
    let mut punct = false;
    let mut space = false;

    for c in password.chars() {
        match c {
            'a'..='z' => lower = true,
            'A'..='Z' => upper = true,
            '0'..='9' => digit = true,
            ' ' => space = true,
            c if c.is_ascii_punctuation() => punct = true,
            _ => {}
        }
    }

    let size: u64 = [(lower, 26), (upper, 26), (digit, 10), (punct, 32), (space, 1)]
        .into_iter()
        .filter(|(present, _)| *present)
        .map(|(_, n)| n)
        .sum();
    size.max(1)
}

/// 熵 `log2(charset_size ^ length)`，按 `length * log2(charset_size)` 计算
pub fn entropy_bits(length: usize, charset_size: u64) -> f64 {
    if length == 0 {
        return 0.0;
    }
    length as f64 * (charset_size.max(1) as f64).log2()
}

/// 计算 0-100 的评分
///
/// 基础分来自熵，每个模式按严重程度扣分，长度 ≥16 加 10 分、≥12 加 5 分。
pub fn calculate_score(length: usize, entropy_bits: f64, patterns: &[PatternMatch]) -> u8 {
    let mut score = ((entropy_bits / MAX_SCORED_ENTROPY * 100.0).floor() as i64).min(100);

    score -= patterns
        .iter()
        .map(|p| p.severity.penalty())
        .sum::<i64>();

    if length >= 16 {
        score += 10;
    } else if length >= 12 {
        score += 5;
    }

    score.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{PatternType, Severity};

    fn pattern(severity: Severity) -> PatternMatch {
        PatternMatch {
            pattern_type: PatternType::CharacterSequence,
            description: String::new(),
            severity,
            span: (0, 0),
        }
    }

    #[test]
    fn test_charset_size() {
        assert_eq!(charset_size(""), 1);
        assert_eq!(charset_size("abc"), 26);
        assert_eq!(charset_size("aB"), 52);
        assert_eq!(charset_size("aB3"), 62);
        assert_eq!(charset_size("aB3!"), 94);
        assert_eq!(charset_size("aB3! "), 95);
        assert_eq!(charset_size("日本"), 1);
    }

    #[test]
    fn test_entropy() {
        assert_eq!(entropy_bits(0, 94), 0.0);
        assert_eq!(entropy_bits(4, 1), 0.0);
        assert!((entropy_bits(8, 26) - 8.0 * 26f64.log2()).abs() < 1e-9);
        assert!((entropy_bits(4, 16) - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_base_is_capped() {
        assert_eq!(calculate_score(8, 200.0, &[]), 100);
        assert_eq!(calculate_score(8, 64.0, &[]), 50);
    }

    #[test]
    fn test_score_penalties_compound() {
        let patterns = vec![
            pattern(Severity::High),
            pattern(Severity::Medium),
            pattern(Severity::Low),
        ];
        // 50 - 25 - 15 - 5
        assert_eq!(calculate_score(8, 64.0, &patterns), 5);
    }

    #[test]
    fn test_score_length_bonus_tiers() {
        assert_eq!(calculate_score(12, 64.0, &[]), 55);
        assert_eq!(calculate_score(16, 64.0, &[]), 60);
        assert_eq!(calculate_score(20, 200.0, &[]), 100);
    }

    #[test]
    fn test_score_clamped_at_zero() {
        let patterns = vec![pattern(Severity::High); 6];
        assert_eq!(calculate_score(4, 20.0, &patterns), 0);
    }

    #[test]
    fn test_strength_tiers() {
        assert_eq!(PasswordStrength::from_score(85, 90.0), PasswordStrength::VeryStrong);
        // 分数足够但熵不足
        assert_eq!(PasswordStrength::from_score(85, 70.0), PasswordStrength::Strong);
        assert_eq!(PasswordStrength::from_score(65, 45.0), PasswordStrength::Moderate);
        assert_eq!(PasswordStrength::from_score(45, 10.0), PasswordStrength::Weak);
        assert_eq!(PasswordStrength::from_score(19, 200.0), PasswordStrength::VeryWeak);
    }

    #[test]
    fn test_strength_ordering() {
        assert!(PasswordStrength::VeryWeak < PasswordStrength::Weak);
        assert!(PasswordStrength::Strong < PasswordStrength::VeryStrong);
        assert!(PasswordStrength::Weak.is_weak());
        assert!(!PasswordStrength::Moderate.is_weak());
        assert_eq!(PasswordStrength::VeryStrong.to_string(), "VERY STRONG");
    }
}
