//! 弱密码模式检测
//!
//! 每项检查相互独立，一个密码可以同时命中多种模式。
//! 子串类检查在小写形式上进行，字面字符检查（重复、leet）区分大小写。
//! 位置 `span` 为字符下标的半开区间。

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// 常见弱密码（精确匹配，不区分大小写）
pub const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "123456",
    "12345678",
    "qwerty",
    "abc123",
    "password123",
    "admin",
    "letmein",
    "welcome",
    "monkey",
    "dragon",
    "master",
    "sunshine",
    "princess",
    "football",
    "iloveyou",
    "shadow",
    "michael",
    "superman",
    "trustno1",
    "passw0rd",
    "admin123",
    "root",
    "toor",
    "password1",
];

/// 键盘相邻按键模式
pub const KEYBOARD_PATTERNS: &[&str] = &[
    "qwerty",
    "asdfgh",
    "zxcvbn",
    "12345",
    "qwertyuiop",
    "asdfghjkl",
    "zxcvbnm",
    "qazwsx",
    "1qaz2wsx",
];

/// 常见字符序列
pub const SEQUENCES: &[&str] = &["abc", "123", "xyz", "rst"];

/// leet 替换中常见的字符
pub const LEET_CHARS: &[char] = &['@', '3', '1', '0', '$', '7'];

static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(19|20)\d{2}").expect("year pattern is a valid regex"));

/// 模式类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    /// 常见密码
    CommonPassword,
    /// 键盘模式
    KeyboardPattern,
    /// 字符序列
    CharacterSequence,
    /// 字符重复
    CharacterRepetition,
    /// 日期/年份
    DateYear,
    /// leet 替换
    LeetSpeak,
}

impl PatternType {
    /// 展示名称
    pub fn label(&self) -> &'static str {
        match self {
            PatternType::CommonPassword => "Common Password",
            PatternType::KeyboardPattern => "Keyboard Pattern",
            PatternType::CharacterSequence => "Character Sequence",
            PatternType::CharacterRepetition => "Character Repetition",
            PatternType::DateYear => "Date/Year",
            PatternType::LeetSpeak => "L33t Speak",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// 评分扣分
    pub fn penalty(&self) -> i64 {
        match self {
            Severity::Low => 5,
            Severity::Medium => 15,
            Severity::High => 25,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.write_str(s)
    }
}

/// 一次模式命中
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMatch {
    /// 类别
    pub pattern_type: PatternType,
    /// 描述
    pub description: String,
    /// 严重程度
    pub severity: Severity,
    /// 字符下标区间 `[start, end)`
    pub span: (usize, usize),
}

impl PatternMatch {
    fn new(
        pattern_type: PatternType,
        description: impl Into<String>,
        severity: Severity,
        span: (usize, usize),
    ) -> Self {
        Self {
            pattern_type,
            description: description.into(),
            severity,
            span,
        }
    }
}

/// 检测密码中的全部弱点模式，按检查顺序返回
pub fn detect_patterns(password: &str) -> Vec<PatternMatch> {
    let mut found = Vec::new();
    let lower = password.to_lowercase();
    let chars: Vec<char> = password.chars().collect();
    let length = chars.len();
    // 逐字符折叠大小写，下标与原密码一一对应
    let folded: Vec<char> = chars.iter().map(char::to_ascii_lowercase).collect();

    if COMMON_PASSWORDS.contains(&lower.as_str()) {
        found.push(PatternMatch::new(
            PatternType::CommonPassword,
            "This is a commonly used password",
            Severity::High,
            (0, length),
        ));
    }

    for pattern in KEYBOARD_PATTERNS {
        if let Some(span) = find_chars(&folded, pattern) {
            found.push(PatternMatch::new(
                PatternType::KeyboardPattern,
                format!("Contains keyboard pattern: {}", pattern),
                Severity::High,
                span,
            ));
        }
    }

    for seq in SEQUENCES {
        if let Some(span) = find_chars(&folded, seq) {
            found.push(PatternMatch::new(
                PatternType::CharacterSequence,
                format!("Contains character sequence: {}", seq),
                Severity::Medium,
                span,
            ));
        }
    }

    // 只报告第一处重复
    if let Some(i) = chars.windows(3).position(|w| w[0] == w[1] && w[1] == w[2]) {
        found.push(PatternMatch::new(
            PatternType::CharacterRepetition,
            format!("Repeated character: {}", chars[i]),
            Severity::Medium,
            (i, i + 3),
        ));
    }

    if let Some(m) = YEAR_PATTERN.find(password) {
        let start = password[..m.start()].chars().count();
        found.push(PatternMatch::new(
            PatternType::DateYear,
            format!("Contains year: {}", m.as_str()),
            Severity::Medium,
            (start, start + m.as_str().chars().count()),
        ));
    }

    if password.contains(LEET_CHARS) {
        found.push(PatternMatch::new(
            PatternType::LeetSpeak,
            "Uses common character substitutions (easily defeated)",
            Severity::Low,
            (0, length),
        ));
    }

    found
}

// 第一次出现位置的字符下标区间
fn find_chars(haystack: &[char], needle: &str) -> Option<(usize, usize)> {
    let needle: Vec<char> = needle.chars().collect();
    let start = haystack
        .windows(needle.len())
        .position(|w| w == needle.as_slice())?;
    Some((start, start + needle.len()))
}
