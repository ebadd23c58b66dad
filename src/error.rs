//! 统一错误类型模块
//!
//! 提供 passlab 库中所有操作的错误类型定义。
//!
//! 注意：密码验证失败永远不会以错误的形式出现，所有 `verify*` 函数只返回 `bool`；
//! 攻击模拟被取消也不是错误，而是 [`AttackOutcome::Cancelled`](crate::attack::AttackOutcome)。

use std::fmt;
use std::path::PathBuf;

/// passlab 库的统一结果类型
pub type Result<T> = std::result::Result<T, Error>;

/// passlab 库的错误类型
#[derive(Debug)]
pub enum Error {
    /// 密码哈希错误
    PasswordHash(PasswordHashError),

    /// 配置错误（无效的攻击配置、不支持的枚举值等）
    Config(ConfigError),

    /// 外部资源不可用（例如字典文件）
    Resource(ResourceError),

    /// 加密错误
    Crypto(CryptoError),
}

impl Error {
    /// 创建一个配置值错误
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config(ConfigError::InvalidValue {
            key: key.into(),
            message: message.into(),
        })
    }

    /// 是否为配置错误
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// 密码哈希相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordHashError {
    /// 哈希生成失败
    HashFailed(String),
    /// 无效的哈希编码
    InvalidFormat(String),
    /// 无效的算法参数
    InvalidParameter { name: String, message: String },
}

/// 配置相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// 字符集为空
    EmptyCharset,
    /// 最小长度大于最大长度
    InvalidLengthRange { min: usize, max: usize },
    /// 掩码没有产生任何位置
    EmptyMask,
    /// 无效的配置值
    InvalidValue { key: String, message: String },
    /// 不支持的枚举值
    UnsupportedValue { kind: &'static str, value: String },
}

/// 资源相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// 资源不可读或不存在
    Unavailable { path: PathBuf, message: String },
}

/// 加密相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// 随机数生成失败
    RngFailed(String),
}

// ============================================================================
// Display 实现
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PasswordHash(e) => write!(f, "Password hash error: {}", e),
            Error::Config(e) => write!(f, "Config error: {}", e),
            Error::Resource(e) => write!(f, "Resource error: {}", e),
            Error::Crypto(e) => write!(f, "Crypto error: {}", e),
        }
    }
}

impl fmt::Display for PasswordHashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordHashError::HashFailed(msg) => write!(f, "hash generation failed: {}", msg),
            PasswordHashError::InvalidFormat(msg) => write!(f, "invalid hash format: {}", msg),
            PasswordHashError::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{}': {}", name, message)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyCharset => write!(f, "charset must not be empty"),
            ConfigError::InvalidLengthRange { min, max } => {
                write!(
                    f,
                    "min_length ({}) must not exceed max_length ({})",
                    min, max
                )
            }
            ConfigError::EmptyMask => write!(f, "mask does not describe any position"),
            ConfigError::InvalidValue { key, message } => {
                write!(f, "invalid configuration value for '{}': {}", key, message)
            }
            ConfigError::UnsupportedValue { kind, value } => {
                write!(f, "unsupported {}: {}", kind, value)
            }
        }
    }
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::Unavailable { path, message } => {
                write!(f, "resource '{}' unavailable: {}", path.display(), message)
            }
        }
    }
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::RngFailed(msg) => write!(f, "random number generation failed: {}", msg),
        }
    }
}

// ============================================================================
// std::error::Error 实现
// ============================================================================

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::PasswordHash(e) => Some(e),
            Error::Config(e) => Some(e),
            Error::Resource(e) => Some(e),
            Error::Crypto(e) => Some(e),
        }
    }
}

impl std::error::Error for PasswordHashError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for ResourceError {}
impl std::error::Error for CryptoError {}

// ============================================================================
// From 实现 - 方便错误转换
// ============================================================================

impl From<PasswordHashError> for Error {
    fn from(err: PasswordHashError) -> Self {
        Error::PasswordHash(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<ResourceError> for Error {
    fn from(err: ResourceError) -> Self {
        Error::Resource(err)
    }
}

impl From<CryptoError> for Error {
    fn from(err: CryptoError) -> Self {
        Error::Crypto(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config(ConfigError::EmptyCharset);
        assert_eq!(err.to_string(), "Config error: charset must not be empty");
    }

    #[test]
    fn test_error_from_password_hash() {
        let hash_err = PasswordHashError::HashFailed("test".to_string());
        let err: Error = hash_err.into();
        assert!(matches!(err, Error::PasswordHash(_)));
    }

    #[test]
    fn test_invalid_format_display() {
        let err: Error = PasswordHashError::InvalidFormat("missing salt".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Password hash error: invalid hash format: missing salt"
        );
    }

    #[test]
    fn test_length_range_display() {
        let err = ConfigError::InvalidLengthRange { min: 5, max: 2 };
        assert_eq!(
            err.to_string(),
            "min_length (5) must not exceed max_length (2)"
        );
    }

    #[test]
    fn test_unsupported_value_display() {
        let err = ConfigError::UnsupportedValue {
            kind: "attack mode",
            value: "rainbow".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported attack mode: rainbow");
    }

    #[test]
    fn test_config_helper() {
        let err = Error::config("speed_limit", "must be greater than 0");
        assert!(err.is_config());
        assert!(err.to_string().contains("speed_limit"));
    }

    #[test]
    fn test_error_source() {
        use std::error::Error as _;

        let err = Error::Resource(ResourceError::Unavailable {
            path: PathBuf::from("/missing.txt"),
            message: "not found".to_string(),
        });
        assert!(err.source().is_some());
    }
}
