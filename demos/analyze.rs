//! 密码强度分析演示
//!
//! 运行: `cargo run --example analyze -- "Tr0ub4dor&3" password`

use std::env;

use passlab::{GpuTier, HashAlgorithm, PasswordAnalyzer};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("passlab=info".parse().unwrap()),
        )
        .init();

    let mut passwords: Vec<String> = env::args().skip(1).collect();
    if passwords.is_empty() {
        passwords = vec![
            "password".to_string(),
            "Summer2024!".to_string(),
            "Gx9#mKv2%pLw8&Rt5!Yq".to_string(),
        ];
    }

    let analyzer = PasswordAnalyzer::new();
    for password in &passwords {
        let analysis = analyzer.analyze(password);

        println!("=== {} ===", analysis.password);
        println!("  length:       {}", analysis.length);
        println!("  charset size: {}", analysis.charset_size);
        println!("  entropy:      {:.2} bits", analysis.entropy_bits);
        println!("  score:        {}/100", analysis.score);
        println!(
            "  strength:     {} ({})",
            analysis.strength,
            analysis.strength.description()
        );

        if !analysis.patterns.is_empty() {
            println!("  patterns:");
            for pattern in &analysis.patterns {
                println!(
                    "    [{}] {} at {:?}",
                    pattern.severity, pattern.description, pattern.span
                );
            }
        }

        println!("  crack time (cpu / gpu):");
        for entry in &analysis.crack_times {
            println!("    {:<14} {} / {}", entry.label, entry.cpu, entry.gpu);
        }

        println!("  recommendations:");
        for rec in &analysis.recommendations {
            println!("    - {}", rec);
        }
        println!();
    }

    println!("=== hardware tiers (hashes/second) ===");
    print!("  {:<10}", "");
    for algorithm in HashAlgorithm::ALL {
        print!("{:>15}", algorithm.display_name());
    }
    println!();
    for (tier, row) in GpuTier::performance_table() {
        print!("  {:<10}", tier.label());
        for (_, rate) in row {
            print!("{:>15}", rate);
        }
        println!();
    }
}
