//! 攻击配置
//!
//! [`AttackConfig`] 通过 [`AttackConfigBuilder`] 构建，`build()` 时一次性校验，
//! 之后在整个模拟过程中保持不变。

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::AttackMode;
use super::mask::{DIGITS, LOWERCASE, parse_mask};
use crate::error::{ConfigError, Error, Result};
use crate::hash::HashAlgorithm;

/// 默认最大尝试次数
pub const DEFAULT_MAX_ATTEMPTS: u64 = 1_000_000;
/// 默认每秒尝试次数
pub const DEFAULT_SPEED_LIMIT: u64 = 10_000;
/// 默认最小长度
pub const DEFAULT_MIN_LENGTH: usize = 1;
/// 默认最大长度
pub const DEFAULT_MAX_LENGTH: usize = 8;
/// 默认进度回调间隔
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1_000;
/// 默认节流暂停时长
pub const DEFAULT_THROTTLE_PAUSE: Duration = Duration::from_secs(1);

/// 攻击模拟配置
#[derive(Debug, Clone, PartialEq)]
pub struct AttackConfig {
    mode: AttackMode,
    algorithm: HashAlgorithm,
    max_attempts: u64,
    speed_limit: u64,
    charset: Vec<char>,
    min_length: usize,
    max_length: usize,
    wordlist: Option<PathBuf>,
    mask: Option<String>,
    throttle_pause: Duration,
    time_limit: Option<Duration>,
    progress_interval: u64,
}

impl AttackConfig {
    /// 创建指定模式的构建器
    ///
    /// # Example
    ///
    /// ```rust
    /// use passlab::attack::{AttackConfig, AttackMode};
    ///
    /// let config = AttackConfig::builder(AttackMode::Mask)
    ///     .mask("?u?l?l?d")
    ///     .max_attempts(500)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.mask(), Some("?u?l?l?d"));
    /// ```
    pub fn builder(mode: AttackMode) -> AttackConfigBuilder {
        AttackConfigBuilder::new(mode)
    }

    /// 使用内置字典的快速字典攻击预设
    pub fn quick_dictionary() -> Self {
        Self {
            max_attempts: 10_000,
            ..AttackConfigBuilder::new(AttackMode::Dictionary).into_unchecked()
        }
    }

    /// 纯数字 PIN 的暴力破解预设，尝试上限恰好覆盖整个密钥空间
    pub fn pin_brute_force(length: usize) -> Result<Self> {
        AttackConfigBuilder::new(AttackMode::BruteForce)
            .charset(DIGITS)
            .min_length(length)
            .max_length(length)
            .max_attempts(10u64.saturating_pow(length.min(19) as u32))
            .build()
    }

    /// 攻击模式
    pub fn mode(&self) -> AttackMode {
        self.mode
    }

    /// 目标哈希算法（仅用于标识）
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// 最大尝试次数
    pub fn max_attempts(&self) -> u64 {
        self.max_attempts
    }

    /// 每秒尝试次数（每达到这么多次暂停一次）
    pub fn speed_limit(&self) -> u64 {
        self.speed_limit
    }

    /// 暴力破解字符集（有序、去重）
    pub fn charset(&self) -> &[char] {
        &self.charset
    }

    /// 最小长度
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// 最大长度
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// 字典文件路径
    pub fn wordlist(&self) -> Option<&Path> {
        self.wordlist.as_deref()
    }

    /// 掩码
    pub fn mask(&self) -> Option<&str> {
        self.mask.as_deref()
    }

    /// 节流暂停时长
    pub fn throttle_pause(&self) -> Duration {
        self.throttle_pause
    }

    /// 墙钟时间上限
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// 进度回调间隔
    pub fn progress_interval(&self) -> u64 {
        self.progress_interval
    }
}

/// [`AttackConfig`] 构建器
#[derive(Debug, Clone)]
pub struct AttackConfigBuilder {
    mode: AttackMode,
    algorithm: HashAlgorithm,
    max_attempts: u64,
    speed_limit: u64,
    charset: String,
    min_length: usize,
    max_length: usize,
    wordlist: Option<PathBuf>,
    mask: Option<String>,
    throttle_pause: Duration,
    time_limit: Option<Duration>,
    progress_interval: u64,
}

impl AttackConfigBuilder {
    /// 使用默认值创建构建器
    pub fn new(mode: AttackMode) -> Self {
        Self {
            mode,
            algorithm: HashAlgorithm::Argon2id,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            speed_limit: DEFAULT_SPEED_LIMIT,
            charset: format!("{}{}", LOWERCASE, DIGITS),
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            wordlist: None,
            mask: None,
            throttle_pause: DEFAULT_THROTTLE_PAUSE,
            time_limit: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// 设置目标算法
    pub fn algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// 设置最大尝试次数
    pub fn max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// 设置每秒尝试次数
    pub fn speed_limit(mut self, speed_limit: u64) -> Self {
        self.speed_limit = speed_limit;
        self
    }

    /// 设置暴力破解字符集
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    /// 设置最小长度
    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// 设置最大长度
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// 设置字典文件
    pub fn wordlist(mut self, path: impl Into<PathBuf>) -> Self {
        self.wordlist = Some(path.into());
        self
    }

    /// 设置掩码
    pub fn mask(mut self, mask: impl Into<String>) -> Self {
        self.mask = Some(mask.into());
        self
    }

    /// 设置节流暂停时长（`Duration::ZERO` 关闭暂停）
    pub fn throttle_pause(mut self, pause: Duration) -> Self {
        self.throttle_pause = pause;
        self
    }

    /// 设置墙钟时间上限
    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// 设置进度回调间隔
    pub fn progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// 校验并生成配置
    pub fn build(self) -> Result<AttackConfig> {
        if self.max_attempts == 0 {
            return Err(Error::config("max_attempts", "must be greater than 0"));
        }
        if self.speed_limit == 0 {
            return Err(Error::config("speed_limit", "must be greater than 0"));
        }
        if self.progress_interval == 0 {
            return Err(Error::config("progress_interval", "must be greater than 0"));
        }

        if matches!(self.mode, AttackMode::BruteForce | AttackMode::Mask) {
            if self.charset.is_empty() {
                return Err(ConfigError::EmptyCharset.into());
            }
            if self.min_length > self.max_length {
                return Err(ConfigError::InvalidLengthRange {
                    min: self.min_length,
                    max: self.max_length,
                }
                .into());
            }
        }

        if self.mode == AttackMode::Mask
            && let Some(mask) = &self.mask
            && parse_mask(mask).is_empty()
        {
            return Err(ConfigError::EmptyMask.into());
        }

        Ok(self.into_unchecked())
    }

    fn into_unchecked(self) -> AttackConfig {
        let mut charset: Vec<char> = Vec::with_capacity(self.charset.len());
        for c in self.charset.chars() {
            if !charset.contains(&c) {
                charset.push(c);
            }
        }

        AttackConfig {
            mode: self.mode,
            algorithm: self.algorithm,
            max_attempts: self.max_attempts,
            speed_limit: self.speed_limit,
            charset,
            min_length: self.min_length,
            max_length: self.max_length,
            wordlist: self.wordlist,
            mask: self.mask,
            throttle_pause: self.throttle_pause,
            time_limit: self.time_limit,
            progress_interval: self.progress_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AttackConfig::builder(AttackMode::BruteForce).build().unwrap();
        assert_eq!(config.max_attempts(), DEFAULT_MAX_ATTEMPTS);
        assert_eq!(config.speed_limit(), DEFAULT_SPEED_LIMIT);
        assert_eq!(config.charset().len(), 36);
        assert_eq!(config.min_length(), 1);
        assert_eq!(config.max_length(), 8);
        assert_eq!(config.throttle_pause(), Duration::from_secs(1));
        assert_eq!(config.time_limit(), None);
        assert_eq!(config.algorithm(), HashAlgorithm::Argon2id);
    }

    #[test]
    fn test_charset_is_deduplicated_in_order() {
        let config = AttackConfig::builder(AttackMode::BruteForce)
            .charset("abca")
            .build()
            .unwrap();
        assert_eq!(config.charset(), &['a', 'b', 'c']);
    }

    #[test]
    fn test_empty_charset_rejected() {
        let err = AttackConfig::builder(AttackMode::BruteForce)
            .charset("")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::EmptyCharset)));
    }

    #[test]
    fn test_empty_charset_ignored_for_dictionary() {
        assert!(
            AttackConfig::builder(AttackMode::Dictionary)
                .charset("")
                .build()
                .is_ok()
        );
    }

    #[test]
    fn test_invalid_length_range() {
        let err = AttackConfig::builder(AttackMode::Mask)
            .min_length(5)
            .max_length(2)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidLengthRange { min: 5, max: 2 })
        ));
    }

    #[test]
    fn test_empty_mask_rejected() {
        let err = AttackConfig::builder(AttackMode::Mask)
            .mask("")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::EmptyMask)));
    }

    #[test]
    fn test_zero_limits_rejected() {
        assert!(
            AttackConfig::builder(AttackMode::Dictionary)
                .max_attempts(0)
                .build()
                .unwrap_err()
                .is_config()
        );
        assert!(
            AttackConfig::builder(AttackMode::Dictionary)
                .speed_limit(0)
                .build()
                .unwrap_err()
                .is_config()
        );
    }

    #[test]
    fn test_presets() {
        let quick = AttackConfig::quick_dictionary();
        assert_eq!(quick.mode(), AttackMode::Dictionary);
        assert_eq!(quick.max_attempts(), 10_000);

        let pin = AttackConfig::pin_brute_force(4).unwrap();
        assert_eq!(pin.charset().len(), 10);
        assert_eq!(pin.min_length(), 4);
        assert_eq!(pin.max_length(), 4);
        assert_eq!(pin.max_attempts(), 10_000);

        assert!(AttackConfig::pin_brute_force(0).is_ok());
    }
}
