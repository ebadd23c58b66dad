//! 哈希引擎集成测试
//!
//! 覆盖全部算法的哈希、验证、编码格式以及破解耗时估算。

use std::time::{Duration, Instant};

use num_bigint::BigUint;
use passlab::hash::{
    Argon2Settings, GpuTier, HashAlgorithm, HashEngine, HashParams, MAX_VERIFY_PBKDF2_ITERATIONS,
    format_duration,
};
use passlab::{Error, error::PasswordHashError};

fn light_engine() -> HashEngine {
    HashEngine::new().with_argon2_settings(
        Argon2Settings::new()
            .with_memory_cost(1024)
            .with_time_cost(1)
            .with_parallelism(1),
    )
}

fn fast_params() -> HashParams {
    HashParams::new()
        .with_iterations(1_000)
        .with_scrypt(1024, 8, 1)
        .with_rounds(4)
}

/// 测试所有算法的哈希与验证
#[test]
fn test_every_algorithm_hashes_and_verifies() {
    let engine = light_engine();
    let params = fast_params();

    for algorithm in HashAlgorithm::ALL {
        let result = engine
            .hash("correct horse", algorithm, Some(&params))
            .unwrap();

        assert_eq!(result.algorithm, algorithm);
        assert!(result.time_ms >= 0.0);
        assert!(engine.verify_result("correct horse", &result), "{algorithm}");
        assert!(!engine.verify_result("battery staple", &result), "{algorithm}");
    }
}

/// 测试盐值只在显式盐值算法中返回
#[test]
fn test_salt_presence_matches_algorithm() {
    let engine = light_engine();
    let params = fast_params();

    for algorithm in HashAlgorithm::ALL {
        let result = engine.hash("pw", algorithm, Some(&params)).unwrap();
        assert_eq!(result.salt.is_none(), algorithm.embeds_salt(), "{algorithm}");

        if let Some(salt) = &result.salt {
            // 16 字节，十六进制
            assert_eq!(salt.len(), 32);
            assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}

/// 测试相同密码两次哈希得到不同结果
#[test]
fn test_hashes_are_salted() {
    let engine = light_engine();
    let params = fast_params();

    for algorithm in HashAlgorithm::ALL {
        let a = engine.hash("same", algorithm, Some(&params)).unwrap();
        let b = engine.hash("same", algorithm, Some(&params)).unwrap();
        assert_ne!(a.hash_value, b.hash_value, "{algorithm}");
    }
}

/// 测试参数被记录在结果中
#[test]
fn test_parameters_recorded() {
    let engine = light_engine();
    let params = fast_params();

    let pbkdf2 = engine
        .hash("pw", HashAlgorithm::Pbkdf2Sha512, Some(&params))
        .unwrap();
    assert_eq!(pbkdf2.parameter("iterations"), Some(1_000));
    assert_eq!(pbkdf2.hash_value.len(), 64);

    let scrypt = engine.hash("pw", HashAlgorithm::Scrypt, Some(&params)).unwrap();
    assert_eq!(scrypt.parameter("n"), Some(1024));
    assert_eq!(scrypt.parameter("r"), Some(8));
    assert_eq!(scrypt.parameter("p"), Some(1));

    let bcrypt = engine.hash("pw", HashAlgorithm::Bcrypt, Some(&params)).unwrap();
    assert_eq!(bcrypt.parameter("rounds"), Some(4));

    let argon2 = engine.hash("pw", HashAlgorithm::Argon2id, None).unwrap();
    assert_eq!(argon2.parameter("memory_cost"), Some(1024));
    assert!(argon2.hash_value.starts_with("$argon2id$"));
}

/// 测试自描述编码可直接用于验证
#[test]
fn test_encoded_verification() {
    let engine = light_engine();
    let params = fast_params();

    let pbkdf2 = engine
        .hash("secret", HashAlgorithm::Pbkdf2Sha256, Some(&params))
        .unwrap();
    let encoded = pbkdf2.encoded();
    assert!(encoded.starts_with("$pbkdf2-sha256$i=1000$"));
    assert!(engine.verify("secret", &encoded, HashAlgorithm::Pbkdf2Sha256));
    // 编码与算法不匹配
    assert!(!engine.verify("secret", &encoded, HashAlgorithm::Pbkdf2Sha512));

    let scrypt = engine.hash("secret", HashAlgorithm::Scrypt, Some(&params)).unwrap();
    let encoded = scrypt.encoded();
    assert!(encoded.starts_with("$scrypt$ln=10,r=8,p=1$"));
    assert!(engine.verify("secret", &encoded, HashAlgorithm::Scrypt));
}

/// 测试格式错误的哈希返回 false 而不是报错
#[test]
fn test_malformed_hashes_never_verify() {
    let engine = light_engine();

    for algorithm in HashAlgorithm::ALL {
        assert!(!engine.verify("pw", "", algorithm));
        assert!(!engine.verify("pw", "not-a-hash", algorithm));
        assert!(!engine.verify("pw", "$pbkdf2-sha256$i=x$zz$zz", algorithm));
        assert!(!engine.verify("pw", "$scrypt$ln=99,r=8,p=1$00$00", algorithm));
    }
}

/// 测试超出上限的开销参数在派生之前就被拒绝
#[test]
fn test_excessive_work_factors_rejected_quickly() {
    let engine = light_engine();
    let salt = "00".repeat(16);
    let digest = "00".repeat(32);

    let start = Instant::now();
    assert!(!engine.verify(
        "x",
        &format!("$pbkdf2-sha256$i=4294967295${}${}", salt, digest),
        HashAlgorithm::Pbkdf2Sha256
    ));
    assert!(!engine.verify(
        "x",
        &format!("$scrypt$ln=24,r=64,p=1${}${}", salt, digest),
        HashAlgorithm::Scrypt
    ));
    assert!(start.elapsed() < Duration::from_secs(1));
}

/// 测试上限以内的编码仍能验证
#[test]
fn test_reasonable_work_factors_still_verify() {
    let engine = light_engine();
    let params = HashParams::new().with_iterations(MAX_VERIFY_PBKDF2_ITERATIONS / 1_000);
    let result = engine
        .hash("within limits", HashAlgorithm::Pbkdf2Sha256, Some(&params))
        .unwrap();
    assert!(engine.verify_result("within limits", &result));
}

/// 测试无效参数
#[test]
fn test_invalid_parameters() {
    let engine = light_engine();

    let err = engine
        .hash("pw", HashAlgorithm::Bcrypt, Some(&HashParams::new().with_rounds(3)))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::PasswordHash(PasswordHashError::InvalidParameter { .. })
    ));

    let err = engine
        .hash(
            "pw",
            HashAlgorithm::Scrypt,
            Some(&HashParams::new().with_scrypt(1000, 8, 1)),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        Error::PasswordHash(PasswordHashError::InvalidParameter { .. })
    ));

    let err = engine
        .hash(
            "pw",
            HashAlgorithm::Pbkdf2Sha256,
            Some(&HashParams::new().with_iterations(0)),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        Error::PasswordHash(PasswordHashError::InvalidParameter { .. })
    ));
}

/// 测试 4 位 PIN 的 GPU 估算
#[test]
fn test_pin_estimate() {
    let estimate =
        HashEngine::new().estimate_crack_time(4, 10, HashAlgorithm::Pbkdf2Sha256, true);

    assert_eq!(estimate.hashes_required, BigUint::from(5_000u32));
    assert!((estimate.seconds - 0.0005).abs() < 1e-12);
    assert_eq!(estimate.human_readable, "0.50 milliseconds");
}

/// 测试 GPU 总是比 CPU 快
#[test]
fn test_gpu_faster_than_cpu() {
    let engine = HashEngine::new();
    for algorithm in HashAlgorithm::ALL {
        let cpu = engine.estimate_crack_time(10, 62, algorithm, false);
        let gpu = engine.estimate_crack_time(10, 62, algorithm, true);
        assert!(gpu.seconds < cpu.seconds, "{algorithm}");
    }
}

/// 测试超大密钥空间不会溢出
#[test]
fn test_large_keyspace_estimate() {
    let estimate =
        HashEngine::new().estimate_crack_time(20, 94, HashAlgorithm::Bcrypt, true);

    assert!(estimate.seconds.is_finite());
    assert_eq!(
        estimate.hashes_required,
        BigUint::from(94u32).pow(20) / 2u32
    );
    assert!(estimate.human_readable.ends_with("billion years"));
}

/// 测试硬件档位对比表
#[test]
fn test_tier_comparison() {
    let engine = HashEngine::new();
    let high = engine.estimate_crack_time_on(8, 62, HashAlgorithm::Argon2id, GpuTier::Rtx4090);
    let mid = engine.estimate_crack_time_on(8, 62, HashAlgorithm::Argon2id, GpuTier::Rtx3080);
    let cpu = engine.estimate_crack_time_on(8, 62, HashAlgorithm::Argon2id, GpuTier::CpuOnly);

    assert!(high.seconds < mid.seconds);
    assert!(mid.seconds < cpu.seconds);

    for (tier, row) in GpuTier::performance_table() {
        for (algorithm, rate) in row {
            assert_eq!(rate, tier.hashes_per_second(algorithm));
        }
    }
}

/// 测试耗时格式分段
#[test]
fn test_duration_formatting() {
    assert_eq!(format_duration(0.0005), "0.50 milliseconds");
    assert_eq!(format_duration(30.0), "30.00 seconds");
    assert_eq!(format_duration(5_400.0), "1.50 hours");
    assert_eq!(format_duration(31_536_000.0 * 500.0), "500 years");
}
