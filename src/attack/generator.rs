//! 候选密码生成器
//!
//! 每种攻击模式对应 [`Candidates`] 的一个变体，所有序列都是惰性的：
//! 暴力破解和掩码模式只保存当前位置的索引向量，字典模式逐行读取文件。

use std::collections::VecDeque;
use std::slice;

use num_bigint::BigUint;
use tracing::warn;

use super::AttackMode;
use super::config::AttackConfig;
use super::mask::parse_mask;
use super::product::CartesianProduct;
use super::wordlist::{DEFAULT_WORDLIST, WordlistReader};
use crate::hash::keyspace;

/// 混合模式追加的后缀，按顺序尝试
pub const HYBRID_SUFFIXES: [&str; 5] = ["1", "123", "2024", "2025", "!"];

/// 撞库演示用的伪造凭据（邮箱，密码），不是真实数据
pub static DEMO_CREDENTIALS: [(&str, &str); 4] = [
    ("user1@example.com", "Password123!"),
    ("testuser@demo.com", "Welcome2024"),
    ("admin@test.local", "Admin@123"),
    ("demo@email.com", "Summer2024!"),
];

/// 根据攻击配置生成候选密码
///
/// 每次调用 [`candidates`](Self::candidates) 都得到一个从头开始的新序列。
///
/// # Example
///
/// ```rust
/// use passlab::attack::{AttackConfig, AttackMode, CandidateGenerator};
///
/// let config = AttackConfig::builder(AttackMode::BruteForce)
///     .charset("ab")
///     .min_length(1)
///     .max_length(2)
///     .build()
///     .unwrap();
/// let generator = CandidateGenerator::new(&config);
///
/// let all: Vec<String> = generator.candidates().collect();
/// assert_eq!(all, ["a", "b", "aa", "ab", "ba", "bb"]);
/// ```
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    config: AttackConfig,
}

impl CandidateGenerator {
    /// 从已校验的配置创建生成器
    pub fn new(config: &AttackConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// 攻击模式
    pub fn mode(&self) -> AttackMode {
        self.config.mode()
    }

    /// 创建一个新的惰性候选序列
    pub fn candidates(&self) -> Candidates {
        let inner = match self.config.mode() {
            AttackMode::Dictionary => Inner::Dictionary(self.word_source()),
            AttackMode::BruteForce => Inner::BruteForce(self.brute_force()),
            AttackMode::Hybrid => Inner::Hybrid(Hybrid::new(self.word_source())),
            AttackMode::Mask => match self.config.mask() {
                Some(mask) => Inner::Mask(CartesianProduct::new(parse_mask(mask))),
                None => Inner::BruteForce(self.brute_force()),
            },
            AttackMode::CredentialStuffing => Inner::CredentialStuffing(DEMO_CREDENTIALS.iter()),
        };
        Candidates { inner }
    }

    /// 候选总数
    ///
    /// 暴力破解和掩码模式返回精确值；读取外部字典时无法预知，返回 `None`。
    pub fn keyspace(&self) -> Option<BigUint> {
        match self.config.mode() {
            AttackMode::Dictionary | AttackMode::Hybrid => match self.config.wordlist() {
                Some(_) => None,
                None => Some(BigUint::from(self.candidates().count())),
            },
            AttackMode::BruteForce => Some(self.brute_force_keyspace()),
            AttackMode::Mask => match self.config.mask() {
                Some(mask) => Some(CartesianProduct::new(parse_mask(mask)).len_exact()),
                None => Some(self.brute_force_keyspace()),
            },
            AttackMode::CredentialStuffing => Some(BigUint::from(DEMO_CREDENTIALS.len())),
        }
    }

    fn brute_force(&self) -> BruteForce {
        BruteForce::new(
            self.config.charset().to_vec(),
            self.config.min_length(),
            self.config.max_length(),
        )
    }

    fn brute_force_keyspace(&self) -> BigUint {
        let size = self.config.charset().len() as u64;
        (self.config.min_length()..=self.config.max_length())
            .map(|len| keyspace(size, len))
            .sum()
    }

    // 字典不可用时记录告警并回退到内置列表
    fn word_source(&self) -> WordSource {
        let Some(path) = self.config.wordlist() else {
            return WordSource::Builtin(DEFAULT_WORDLIST.iter());
        };

        match WordlistReader::open(path) {
            Ok(reader) => WordSource::File(reader),
            Err(e) => {
                warn!(error = %e, "falling back to built-in wordlist");
                WordSource::Builtin(DEFAULT_WORDLIST.iter())
            }
        }
    }
}

/// 惰性候选密码序列
#[derive(Debug)]
pub struct Candidates {
    inner: Inner,
}

#[derive(Debug)]
enum Inner {
    Dictionary(WordSource),
    BruteForce(BruteForce),
    Hybrid(Hybrid),
    Mask(CartesianProduct),
    CredentialStuffing(slice::Iter<'static, (&'static str, &'static str)>),
}

impl Iterator for Candidates {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Dictionary(words) => words.next(),
            Inner::BruteForce(brute) => brute.next(),
            Inner::Hybrid(hybrid) => hybrid.next(),
            Inner::Mask(product) => product.next(),
            Inner::CredentialStuffing(pairs) => pairs.next().map(|(_, pw)| pw.to_string()),
        }
    }
}

// ===== 字典来源 =====

#[derive(Debug)]
enum WordSource {
    File(WordlistReader),
    Builtin(slice::Iter<'static, &'static str>),
}

impl Iterator for WordSource {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            WordSource::File(reader) => reader.next(),
            WordSource::Builtin(words) => words.next().map(|w| w.to_string()),
        }
    }
}

// ===== 暴力破解 =====

/// 按长度递增，每个长度内按笛卡尔积顺序枚举
#[derive(Debug)]
struct BruteForce {
    charset: Vec<char>,
    length: usize,
    max_length: usize,
    current: Option<CartesianProduct>,
}

impl BruteForce {
    fn new(charset: Vec<char>, min_length: usize, max_length: usize) -> Self {
        let current =
            (min_length <= max_length).then(|| CartesianProduct::repeat(&charset, min_length));
        Self {
            charset,
            length: min_length,
            max_length,
            current,
        }
    }
}

impl Iterator for BruteForce {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let product = self.current.as_mut()?;
            if let Some(candidate) = product.next() {
                return Some(candidate);
            }

            if self.length >= self.max_length {
                self.current = None;
                return None;
            }
            self.length += 1;
            self.current = Some(CartesianProduct::repeat(&self.charset, self.length));
        }
    }
}

// ===== 混合模式 =====

/// 对每个字典词依次产生变形
#[derive(Debug)]
struct Hybrid {
    words: WordSource,
    pending: VecDeque<String>,
}

impl Hybrid {
    fn new(words: WordSource) -> Self {
        Self {
            words,
            pending: VecDeque::new(),
        }
    }
}

impl Iterator for Hybrid {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending.is_empty() {
            let word = self.words.next()?;
            self.pending.extend(mutations(&word));
        }
        self.pending.pop_front()
    }
}

/// 单个词的全部变形，按尝试顺序排列
pub fn mutations(word: &str) -> Vec<String> {
    let capitalized = capitalize(word);
    let mut out = Vec::with_capacity(5 + HYBRID_SUFFIXES.len() * 2);

    out.push(word.to_string());
    out.push(capitalized.clone());
    out.push(word.to_uppercase());
    out.push(word.to_lowercase());

    for suffix in HYBRID_SUFFIXES {
        out.push(format!("{}{}", word, suffix));
        out.push(format!("{}{}", capitalized, suffix));
    }

    let leet = leet_speak(word);
    if leet != word {
        out.push(leet);
    }

    out
}

/// 首字母大写，其余小写
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

/// 常见的 leet 替换（不区分大小写匹配）
pub fn leet_speak(word: &str) -> String {
    word.chars()
        .map(|c| match c.to_ascii_lowercase() {
            'a' => '4',
            'e' => '3',
            'i' => '1',
            'o' => '0',
            's' => '5',
            't' => '7',
            _ => c,
        })
        .collect()
}
