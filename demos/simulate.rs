//! 攻击模拟演示
//!
//! 运行: `RUST_LOG=passlab=debug cargo run --example simulate -- brute_force abc1`

use std::env;
use std::time::Duration;

use passlab::{
    AttackConfig, AttackMode, AttackSimulator, CandidateGenerator, HashAlgorithm, HashEngine,
    HashParams,
};

fn main() -> passlab::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("passlab=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let mode: AttackMode = args.get(1).map(String::as_str).unwrap_or("mask").parse()?;
    let target = args.get(2).cloned().unwrap_or_else(|| "Pass7".to_string());

    let config = AttackConfig::builder(mode)
        .algorithm(HashAlgorithm::Bcrypt)
        .charset("abcdefghijklmnopqrstuvwxyz0123456789")
        .min_length(1)
        .max_length(4)
        .mask("?u?l?l?l?d")
        .max_attempts(5_000_000)
        .speed_limit(1_000_000)
        .throttle_pause(Duration::from_millis(100))
        .time_limit(Duration::from_secs(60))
        .progress_interval(250_000)
        .build()?;

    // 演示：目标以 bcrypt 存储，模拟本身只比较明文
    let engine = HashEngine::new();
    let params = HashParams::new().with_rounds(4);
    let stored = engine.hash(&target, config.algorithm(), Some(&params))?;
    println!("stored {} hash: {}", config.algorithm(), stored.hash_value);

    let generator = CandidateGenerator::new(&config);
    match generator.keyspace() {
        Some(size) => println!("keyspace: {} candidates", size),
        None => println!("keyspace: unknown (streamed wordlist)"),
    }

    let simulator = AttackSimulator::with_engine(engine)
        .with_progress(|attempts: u64| println!("  ... {} attempts", attempts));
    let result = simulator.simulate_attack(&config, &target);

    println!("outcome:  {}", result.outcome);
    println!("attempts: {}", result.attempts);
    println!("time:     {:.3}s", result.time_seconds);
    println!("rate:     {:.0} attempts/s", result.attempts_per_second());
    if let Some(found) = &result.password_found {
        let verified = simulator.engine().verify(found, &stored.hash_value, result.algorithm);
        println!("found:    {} (hash verifies: {})", found, verified);
    }

    let estimate = simulator.engine().estimate_crack_time(
        target.chars().count(),
        62,
        config.algorithm(),
        true,
    );
    println!(
        "real-world {} brute force on GPU: ~{}",
        config.algorithm(),
        estimate.human_readable
    );

    Ok(())
}
