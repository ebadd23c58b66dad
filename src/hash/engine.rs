//! 哈希引擎实现
//!
//! 提供密码哈希和验证的核心功能。

use std::collections::BTreeMap;
use std::time::Instant;

use argon2::{Algorithm as Argon2Variant, Argon2, Params as Argon2Params, Version};
use password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString};
use pbkdf2::pbkdf2_hmac;
use scrypt::{Params as ScryptParams, scrypt};
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Sha512};
use tracing::debug;

use super::HashAlgorithm;
use crate::error::{Error, PasswordHashError, Result};
use crate::random::{constant_time_compare, generate_salt};

/// 派生输出长度（字节）
pub const OUTPUT_LENGTH: usize = 32;
/// PBKDF2 默认迭代次数
pub const PBKDF2_DEFAULT_ITERATIONS: u32 = 600_000;
/// scrypt 默认 CPU/内存开销 N
pub const SCRYPT_DEFAULT_N: u64 = 16_384;
/// scrypt 默认块大小 r
pub const SCRYPT_DEFAULT_R: u32 = 8;
/// scrypt 默认并行度 p
pub const SCRYPT_DEFAULT_P: u32 = 1;
/// bcrypt 默认 cost
pub const BCRYPT_DEFAULT_COST: u32 = 12;

/// 验证时接受的最大 PBKDF2 迭代次数
pub const MAX_VERIFY_PBKDF2_ITERATIONS: u32 = 10_000_000;
/// 验证时接受的最大内存开销（字节），约束 scrypt 的 `128 * N * r * p` 与 Argon2id 的 `m`
pub const MAX_VERIFY_MEMORY_BYTES: u64 = 1 << 30;
/// 验证时接受的最大 Argon2id 迭代次数
pub const MAX_VERIFY_ARGON2_TIME_COST: u32 = 64;
/// 验证时接受的最大 bcrypt cost
pub const MAX_VERIFY_BCRYPT_COST: u32 = 16;

// 重新派生时允许的最大摘要长度
const MAX_DERIVED_LENGTH: usize = 1024;

/// Argon2id 引擎级参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argon2Settings {
    /// 迭代次数
    pub time_cost: u32,
    /// 内存开销（KiB）
    pub memory_cost: u32,
    /// 并行度
    pub parallelism: u32,
    /// 输出长度（字节）
    pub output_len: usize,
}

impl Default for Argon2Settings {
    fn default() -> Self {
        Self {
            time_cost: 3,
            memory_cost: 65_536,
            parallelism: 4,
            output_len: OUTPUT_LENGTH,
        }
    }
}

impl Argon2Settings {
    /// 创建默认参数（time_cost=3, memory_cost=64 MiB, parallelism=4）
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置迭代次数
    pub fn with_time_cost(mut self, time_cost: u32) -> Self {
        self.time_cost = time_cost;
        self
    }

    /// 设置内存开销（KiB）
    pub fn with_memory_cost(mut self, memory_cost: u32) -> Self {
        self.memory_cost = memory_cost;
        self
    }

    /// 设置并行度
    pub fn with_parallelism(mut self, parallelism: u32) -> Self {
        self.parallelism = parallelism;
        self
    }

    fn hasher(&self) -> Result<Argon2<'static>> {
        let params = Argon2Params::new(
            self.memory_cost,
            self.time_cost,
            self.parallelism,
            Some(self.output_len),
        )
        .map_err(|e| invalid_parameter("argon2", e.to_string()))?;
        Ok(Argon2::new(Argon2Variant::Argon2id, Version::V0x13, params))
    }

    fn parameters(&self) -> BTreeMap<String, u64> {
        BTreeMap::from([
            ("time_cost".to_string(), u64::from(self.time_cost)),
            ("memory_cost".to_string(), u64::from(self.memory_cost)),
            ("parallelism".to_string(), u64::from(self.parallelism)),
        ])
    }
}

/// 调用方可覆盖的算法参数
///
/// 未设置的字段使用各算法的默认值；与当前算法无关的字段会被忽略。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashParams {
    /// PBKDF2 迭代次数
    pub iterations: Option<u32>,
    /// scrypt N（必须是大于 1 的 2 的幂）
    pub n: Option<u64>,
    /// scrypt r
    pub r: Option<u32>,
    /// scrypt p
    pub p: Option<u32>,
    /// bcrypt cost (4-31)
    pub rounds: Option<u32>,
}

impl HashParams {
    /// 创建空参数集
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置 PBKDF2 迭代次数
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// 设置 scrypt 的 N、r、p
    pub fn with_scrypt(mut self, n: u64, r: u32, p: u32) -> Self {
        self.n = Some(n);
        self.r = Some(r);
        self.p = Some(p);
        self
    }

    /// 设置 bcrypt cost
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = Some(rounds);
        self
    }
}

/// 一次哈希操作的结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashResult {
    /// 使用的算法
    pub algorithm: HashAlgorithm,
    /// 哈希值（Argon2id/bcrypt 为算法自身的编码串，其余为十六进制）
    pub hash_value: String,
    /// 十六进制盐值；盐值内嵌在编码中的算法为 `None`
    pub salt: Option<String>,
    /// 哈希计算耗时（毫秒）
    pub time_ms: f64,
    /// 算法参数
    pub parameters: BTreeMap<String, u64>,
}

impl HashResult {
    /// 读取一个参数值
    pub fn parameter(&self, name: &str) -> Option<u64> {
        self.parameters.get(name).copied()
    }

    /// 自描述编码
    ///
    /// Argon2id 与 bcrypt 直接返回算法自身的编码；PBKDF2 与 scrypt 返回
    /// `$pbkdf2-sha256$i=<iter>$<salt>$<hash>` 或 `$scrypt$ln=<log n>,r=<r>,p=<p>$<salt>$<hash>`
    /// 形式的字符串，可直接交给 [`HashEngine::verify`]。
    pub fn encoded(&self) -> String {
        let salt = self.salt.as_deref().unwrap_or_default();
        match self.algorithm {
            HashAlgorithm::Argon2id | HashAlgorithm::Bcrypt => self.hash_value.clone(),
            HashAlgorithm::Pbkdf2Sha256 | HashAlgorithm::Pbkdf2Sha512 => format!(
                "${}$i={}${}${}",
                pbkdf2_ident(self.algorithm),
                self.parameter("iterations").unwrap_or_default(),
                salt,
                self.hash_value
            ),
            HashAlgorithm::Scrypt => format!(
                "$scrypt$ln={},r={},p={}${}${}",
                self.parameter("n").unwrap_or_default().trailing_zeros(),
                self.parameter("r").unwrap_or_default(),
                self.parameter("p").unwrap_or_default(),
                salt,
                self.hash_value
            ),
        }
    }
}

/// 多算法密码哈希引擎
///
/// 引擎本身不保存任何密码或哈希状态，仅持有 Argon2id 的参数。
///
/// # Example
///
/// ```rust
/// use passlab::hash::{HashAlgorithm, HashEngine, HashParams};
///
/// let engine = HashEngine::new();
/// let result = engine
///     .hash("hunter2", HashAlgorithm::Bcrypt, Some(&HashParams::new().with_rounds(4)))
///     .unwrap();
/// assert!(result.hash_value.starts_with("$2"));
/// assert!(engine.verify("hunter2", &result.hash_value, HashAlgorithm::Bcrypt));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HashEngine {
    argon2: Argon2Settings,
}

impl HashEngine {
    /// 使用默认参数创建引擎
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用自定义 Argon2id 参数
    pub fn with_argon2_settings(mut self, settings: Argon2Settings) -> Self {
        self.argon2 = settings;
        self
    }

    /// 当前的 Argon2id 参数
    pub fn argon2_settings(&self) -> &Argon2Settings {
        &self.argon2
    }

    /// 哈希密码
    ///
    /// `time_ms` 只覆盖哈希计算本身，使用单调时钟测量。
    ///
    /// # Errors
    ///
    /// - 参数无效（bcrypt cost 超出 4-31、scrypt N 不是 2 的幂、迭代次数为 0 等）
    /// - 随机数生成失败
    pub fn hash(
        &self,
        password: &str,
        algorithm: HashAlgorithm,
        params: Option<&HashParams>,
    ) -> Result<HashResult> {
        let params = params.copied().unwrap_or_default();

        let start = Instant::now();
        let (hash_value, salt, parameters) = match algorithm {
            HashAlgorithm::Argon2id => self.hash_argon2(password)?,
            HashAlgorithm::Scrypt => hash_scrypt(password, &params)?,
            HashAlgorithm::Pbkdf2Sha256 | HashAlgorithm::Pbkdf2Sha512 => {
                hash_pbkdf2(password, algorithm, &params)?
            }
            HashAlgorithm::Bcrypt => hash_bcrypt(password, &params)?,
        };
        let time_ms = start.elapsed().as_secs_f64() * 1000.0;

        debug!(algorithm = algorithm.as_str(), time_ms, "password hashed");

        Ok(HashResult {
            algorithm,
            hash_value,
            salt,
            time_ms,
            parameters,
        })
    }

    /// 验证密码
    ///
    /// `hash_value` 为 Argon2id/bcrypt 的编码串，或 [`HashResult::encoded`] 生成的
    /// PBKDF2/scrypt 编码。格式错误、参数错误和密码错误一律返回 `false`。
    ///
    /// 编码中的开销参数超过 `MAX_VERIFY_*` 上限时不会重新派生，直接返回 `false`。
    pub fn verify(&self, password: &str, hash_value: &str, algorithm: HashAlgorithm) -> bool {
        let checked = match algorithm {
            HashAlgorithm::Argon2id => verify_argon2(password, hash_value),
            HashAlgorithm::Bcrypt => verify_bcrypt(password, hash_value),
            HashAlgorithm::Pbkdf2Sha256 | HashAlgorithm::Pbkdf2Sha512 => {
                verify_pbkdf2(password, hash_value, algorithm)
            }
            HashAlgorithm::Scrypt => verify_scrypt(password, hash_value),
        };

        checked.unwrap_or_else(|e| {
            debug!(algorithm = algorithm.as_str(), error = %e, "hash rejected");
            false
        })
    }

    /// 直接根据 [`HashResult`] 验证密码
    pub fn verify_result(&self, password: &str, result: &HashResult) -> bool {
        self.verify(password, &result.encoded(), result.algorithm)
    }

    // ========================================================================
    // Argon2 实现
    // ========================================================================

    fn hash_argon2(&self, password: &str) -> Result<Derived> {
        let salt_bytes = generate_salt()?;
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| {
            Error::PasswordHash(PasswordHashError::HashFailed(format!(
                "Failed to encode salt: {}",
                e
            )))
        })?;

        let hash = self
            .argon2
            .hasher()?
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| {
                Error::PasswordHash(PasswordHashError::HashFailed(format!(
                    "Argon2 hash failed: {}",
                    e
                )))
            })?;

        Ok((hash, None, self.argon2.parameters()))
    }
}

/// (hash_value, salt, parameters)
type Derived = (String, Option<String>, BTreeMap<String, u64>);

/// 验证结果：`Ok(匹配与否)`，编码或参数无效时为 `Err`
type Verified = std::result::Result<bool, PasswordHashError>;

fn invalid_parameter(name: &str, message: impl Into<String>) -> PasswordHashError {
    PasswordHashError::InvalidParameter {
        name: name.to_string(),
        message: message.into(),
    }
}

fn invalid_format(message: impl Into<String>) -> PasswordHashError {
    PasswordHashError::InvalidFormat(message.into())
}

fn check_limit(name: &str, value: u64, limit: u64) -> std::result::Result<(), PasswordHashError> {
    if value > limit {
        return Err(invalid_parameter(
            name,
            format!("{} exceeds the verification limit of {}", value, limit),
        ));
    }
    Ok(())
}

fn verify_argon2(password: &str, hash: &str) -> Verified {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| invalid_format(e.to_string()))?;
    if parsed_hash.algorithm.as_str() != "argon2id" {
        return Err(invalid_format(format!(
            "expected argon2id, got {}",
            parsed_hash.algorithm
        )));
    }

    let params = Argon2Params::try_from(&parsed_hash)
        .map_err(|e| invalid_parameter("argon2", e.to_string()))?;
    check_limit(
        "memory_cost",
        u64::from(params.m_cost()) * 1024,
        MAX_VERIFY_MEMORY_BYTES,
    )?;
    check_limit(
        "time_cost",
        u64::from(params.t_cost()),
        u64::from(MAX_VERIFY_ARGON2_TIME_COST),
    )?;

    // 参数从编码中读取，与引擎当前设置无关
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

// ============================================================================
// scrypt 实现
// ============================================================================

fn scrypt_params(
    n: u64,
    r: u32,
    p: u32,
    len: usize,
) -> std::result::Result<ScryptParams, PasswordHashError> {
    if n <= 1 || !n.is_power_of_two() {
        return Err(invalid_parameter(
            "n",
            format!("must be a power of two greater than 1, got {}", n),
        ));
    }
    let log_n = n.trailing_zeros() as u8;
    ScryptParams::new(log_n, r, p, len).map_err(|e| invalid_parameter("scrypt", e.to_string()))
}

fn hash_scrypt(password: &str, params: &HashParams) -> Result<Derived> {
    let n = params.n.unwrap_or(SCRYPT_DEFAULT_N);
    let r = params.r.unwrap_or(SCRYPT_DEFAULT_R);
    let p = params.p.unwrap_or(SCRYPT_DEFAULT_P);
    let scrypt_params = scrypt_params(n, r, p, OUTPUT_LENGTH)?;

    let salt = generate_salt()?;
    let mut output = [0u8; OUTPUT_LENGTH];
    scrypt(password.as_bytes(), &salt, &scrypt_params, &mut output).map_err(|e| {
        Error::PasswordHash(PasswordHashError::HashFailed(format!(
            "scrypt hash failed: {}",
            e
        )))
    })?;

    let parameters = BTreeMap::from([
        ("n".to_string(), n),
        ("r".to_string(), u64::from(r)),
        ("p".to_string(), u64::from(p)),
    ]);
    Ok((hex::encode(output), Some(hex::encode(salt)), parameters))
}

fn verify_scrypt(password: &str, encoded: &str) -> Verified {
    // $scrypt$ln=14,r=8,p=1$<salt>$<hash>
    let Some(["", "scrypt", params, salt, expected]) = split_encoded(encoded) else {
        return Err(invalid_format("expected $scrypt$ln=<ln>,r=<r>,p=<p>$<salt>$<hash>"));
    };

    let mut log_n = None;
    let mut r = None;
    let mut p = None;
    for pair in params.split(',') {
        match pair.split_once('=') {
            Some(("ln", v)) => log_n = v.parse::<u32>().ok(),
            Some(("r", v)) => r = v.parse::<u32>().ok(),
            Some(("p", v)) => p = v.parse::<u32>().ok(),
            _ => return Err(invalid_format(format!("unexpected scrypt parameter '{}'", pair))),
        }
    }
    let (Some(log_n), Some(r), Some(p)) = (log_n, r, p) else {
        return Err(invalid_format("scrypt parameters ln, r and p are required"));
    };
    let n = 1u64
        .checked_shl(log_n)
        .ok_or_else(|| invalid_parameter("ln", format!("{} is out of range", log_n)))?;

    // 128 * N * r 字节的工作区，p 个通道依次计算
    let work = 128u64
        .checked_mul(n)
        .and_then(|v| v.checked_mul(u64::from(r)))
        .and_then(|v| v.checked_mul(u64::from(p)))
        .unwrap_or(u64::MAX);
    check_limit("scrypt memory", work, MAX_VERIFY_MEMORY_BYTES)?;

    let (salt, expected) = decode_salt_and_digest(salt, expected)?;
    let scrypt_params = scrypt_params(n, r, p, expected.len())?;

    let mut derived = vec![0u8; expected.len()];
    scrypt(password.as_bytes(), &salt, &scrypt_params, &mut derived)
        .map_err(|e| invalid_parameter("scrypt", e.to_string()))?;
    Ok(constant_time_compare(&derived, &expected))
}

// ============================================================================
// PBKDF2 实现
// ============================================================================

fn pbkdf2_ident(algorithm: HashAlgorithm) -> &'static str {
    match algorithm {
        HashAlgorithm::Pbkdf2Sha512 => "pbkdf2-sha512",
        _ => "pbkdf2-sha256",
    }
}

fn derive_pbkdf2(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    algorithm: HashAlgorithm,
    out: &mut [u8],
) {
    match algorithm {
        HashAlgorithm::Pbkdf2Sha512 => pbkdf2_hmac::<Sha512>(password, salt, iterations, out),
        _ => pbkdf2_hmac::<Sha256>(password, salt, iterations, out),
    }
}

fn hash_pbkdf2(password: &str, algorithm: HashAlgorithm, params: &HashParams) -> Result<Derived> {
    let iterations = params.iterations.unwrap_or(PBKDF2_DEFAULT_ITERATIONS);
    if iterations == 0 {
        return Err(invalid_parameter("iterations", "must be greater than 0").into());
    }

    let salt = generate_salt()?;
    let mut output = [0u8; OUTPUT_LENGTH];
    derive_pbkdf2(password.as_bytes(), &salt, iterations, algorithm, &mut output);

    let parameters = BTreeMap::from([("iterations".to_string(), u64::from(iterations))]);
    Ok((hex::encode(output), Some(hex::encode(salt)), parameters))
}

fn verify_pbkdf2(password: &str, encoded: &str, algorithm: HashAlgorithm) -> Verified {
    // $pbkdf2-sha256$i=600000$<salt>$<hash>
    let Some(["", ident, iterations, salt, expected]) = split_encoded(encoded) else {
        return Err(invalid_format("expected $<ident>$i=<iterations>$<salt>$<hash>"));
    };
    if ident != pbkdf2_ident(algorithm) {
        return Err(invalid_format(format!(
            "expected {}, got {}",
            pbkdf2_ident(algorithm),
            ident
        )));
    }
    let iterations = iterations
        .strip_prefix("i=")
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|i| *i > 0)
        .ok_or_else(|| invalid_format("iterations must be a positive integer"))?;
    check_limit(
        "iterations",
        u64::from(iterations),
        u64::from(MAX_VERIFY_PBKDF2_ITERATIONS),
    )?;

    let (salt, expected) = decode_salt_and_digest(salt, expected)?;

    let mut derived = vec![0u8; expected.len()];
    derive_pbkdf2(password.as_bytes(), &salt, iterations, algorithm, &mut derived);
    Ok(constant_time_compare(&derived, &expected))
}

// ============================================================================
// bcrypt 实现
// ============================================================================

fn hash_bcrypt(password: &str, params: &HashParams) -> Result<Derived> {
    let rounds = params.rounds.unwrap_or(BCRYPT_DEFAULT_COST);
    if !(4..=31).contains(&rounds) {
        return Err(invalid_parameter(
            "rounds",
            format!("bcrypt cost must be between 4 and 31, got {}", rounds),
        )
        .into());
    }

    let hash = bcrypt::hash(password, rounds).map_err(|e| {
        Error::PasswordHash(PasswordHashError::HashFailed(format!(
            "bcrypt hash failed: {}",
            e
        )))
    })?;

    let parameters = BTreeMap::from([("rounds".to_string(), u64::from(rounds))]);
    Ok((hash, None, parameters))
}

fn verify_bcrypt(password: &str, hash: &str) -> Verified {
    // $2b$12$<salt><hash>
    let cost = hash
        .split('$')
        .nth(2)
        .and_then(|c| c.parse::<u32>().ok())
        .ok_or_else(|| invalid_format("missing bcrypt cost"))?;
    check_limit("rounds", u64::from(cost), u64::from(MAX_VERIFY_BCRYPT_COST))?;

    bcrypt::verify(password, hash).map_err(|e| invalid_format(e.to_string()))
}

// ============================================================================
// 编码辅助函数
// ============================================================================

fn split_encoded(encoded: &str) -> Option<[&str; 5]> {
    let parts: Vec<&str> = encoded.split('$').collect();
    parts.try_into().ok()
}

fn decode_salt_and_digest(
    salt: &str,
    digest: &str,
) -> std::result::Result<(Vec<u8>, Vec<u8>), PasswordHashError> {
    let salt = hex::decode(salt).map_err(|e| invalid_format(format!("salt: {}", e)))?;
    let digest = hex::decode(digest).map_err(|e| invalid_format(format!("digest: {}", e)))?;
    if salt.is_empty() || digest.is_empty() {
        return Err(invalid_format("salt and digest must not be empty"));
    }
    if digest.len() > MAX_DERIVED_LENGTH {
        return Err(invalid_format(format!(
            "digest longer than {} bytes",
            MAX_DERIVED_LENGTH
        )));
    }
    Ok((salt, digest))
}
