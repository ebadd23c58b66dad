//! 攻击模拟器
//!
//! 驱动 [`CandidateGenerator`] 与已知的明文目标比较。模拟从不计算哈希，
//! 算法只用于标识，保证整个过程离线且结果确定。
//!
//! 状态流转：Idle → Running → {Found, Exhausted, LimitReached, Cancelled}

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::AttackMode;
use super::config::AttackConfig;
use super::generator::CandidateGenerator;
use crate::hash::{HashAlgorithm, HashEngine};

// ============================================================================
// 结果
// ============================================================================

/// 模拟结束的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackOutcome {
    /// 找到目标密码
    Found,
    /// 候选序列耗尽
    Exhausted,
    /// 达到尝试次数或时间上限
    LimitReached,
    /// 外部请求停止
    Cancelled,
}

impl fmt::Display for AttackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AttackOutcome::Found => "found",
            AttackOutcome::Exhausted => "exhausted",
            AttackOutcome::LimitReached => "limit reached",
            AttackOutcome::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// 单次模拟的结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackResult {
    /// 是否找到目标
    pub success: bool,
    /// 找到的密码（仅成功时）
    pub password_found: Option<String>,
    /// 命中之前消耗的尝试次数
    pub attempts: u64,
    /// 整个调用的墙钟耗时（秒）
    pub time_seconds: f64,
    /// 攻击模式
    pub mode: AttackMode,
    /// 目标算法
    pub algorithm: HashAlgorithm,
    /// 是否因上限而停止
    pub stopped_by_limit: bool,
    /// 结束原因
    pub outcome: AttackOutcome,
}

impl AttackResult {
    /// 平均每秒尝试次数
    pub fn attempts_per_second(&self) -> f64 {
        if self.time_seconds > 0.0 {
            self.attempts as f64 / self.time_seconds
        } else {
            0.0
        }
    }
}

// ============================================================================
// 取消与进度
// ============================================================================

/// 协作式停止信号
///
/// 可以克隆后交给其他线程。模拟器每处理一个候选检查一次，
/// 所以停止请求最多晚一个候选生效。停止请求只作用于正在运行的模拟：
/// 每次模拟开始时会丢弃此前遗留的请求。
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// 创建新的停止信号
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求停止
    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// 是否有未处理的停止请求
    pub fn is_stop_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    // 读取并清除停止请求
    fn take(&self) -> bool {
        self.flag.swap(false, Ordering::SeqCst)
    }
}

/// 进度接收器
///
/// 仅供展示，不保证回调时机的精度。
pub trait ProgressSink: Send + Sync {
    /// 报告当前已消耗的尝试次数
    fn on_progress(&self, attempts: u64);
}

impl<F> ProgressSink for F
where
    F: Fn(u64) + Send + Sync,
{
    fn on_progress(&self, attempts: u64) {
        self(attempts)
    }
}

// ============================================================================
// 模拟器
// ============================================================================

/// 攻击模拟器
///
/// # Example
///
/// ```rust
/// use passlab::attack::{AttackConfig, AttackMode, AttackOutcome, AttackSimulator};
///
/// let config = AttackConfig::builder(AttackMode::BruteForce)
///     .charset("az")
///     .min_length(1)
///     .max_length(2)
///     .build()
///     .unwrap();
///
/// let result = AttackSimulator::new().simulate_attack(&config, "zz");
/// assert_eq!(result.outcome, AttackOutcome::Found);
/// assert_eq!(result.attempts, 5);
/// ```
pub struct AttackSimulator {
    engine: HashEngine,
    stop: StopHandle,
    progress: Option<Box<dyn ProgressSink>>,
}

impl Default for AttackSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AttackSimulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttackSimulator")
            .field("engine", &self.engine)
            .field("stop", &self.stop)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl AttackSimulator {
    /// 使用默认哈希引擎创建模拟器
    pub fn new() -> Self {
        Self::with_engine(HashEngine::new())
    }

    /// 使用指定的哈希引擎创建模拟器
    pub fn with_engine(engine: HashEngine) -> Self {
        Self {
            engine,
            stop: StopHandle::new(),
            progress: None,
        }
    }

    /// 安装进度接收器
    pub fn with_progress(mut self, sink: impl ProgressSink + 'static) -> Self {
        self.progress = Some(Box::new(sink));
        self
    }

    /// 关联的哈希引擎
    pub fn engine(&self) -> &HashEngine {
        &self.engine
    }

    /// 获取可跨线程使用的停止信号
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// 请求停止当前正在运行的模拟
    ///
    /// 没有模拟在运行时调用不会影响之后的模拟。
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// 运行一次攻击模拟
    ///
    /// `attempts` 统计命中之前的候选数量；命中时不计入。
    pub fn simulate_attack(&self, config: &AttackConfig, target_password: &str) -> AttackResult {
        let generator = CandidateGenerator::new(config);
        let pause = config.throttle_pause();

        if self.stop.take() {
            debug!("discarding stop request raised before the run");
        }

        info!(
            mode = %config.mode(),
            algorithm = %config.algorithm(),
            max_attempts = config.max_attempts(),
            "starting attack simulation"
        );

        let start = Instant::now();
        let mut attempts: u64 = 0;
        let mut found = None;
        let mut outcome = AttackOutcome::Exhausted;

        for candidate in generator.candidates() {
            if attempts > 0 && attempts % config.speed_limit() == 0 && !pause.is_zero() {
                debug!(attempts, pause_ms = pause.as_millis() as u64, "throttling");
                thread::sleep(pause);
            }

            if candidate == target_password {
                found = Some(candidate);
                outcome = AttackOutcome::Found;
                break;
            }

            attempts += 1;
            if attempts % config.progress_interval() == 0 {
                self.report(attempts);
            }

            if attempts >= config.max_attempts() {
                outcome = AttackOutcome::LimitReached;
                break;
            }

            if let Some(limit) = config.time_limit()
                && start.elapsed() >= limit
            {
                outcome = AttackOutcome::LimitReached;
                break;
            }

            if self.stop.take() {
                outcome = AttackOutcome::Cancelled;
                break;
            }
        }

        let time_seconds = start.elapsed().as_secs_f64();
        self.report(attempts);

        info!(
            %outcome,
            attempts,
            seconds = time_seconds,
            "attack simulation finished"
        );

        AttackResult {
            success: found.is_some(),
            password_found: found,
            attempts,
            time_seconds,
            mode: config.mode(),
            algorithm: config.algorithm(),
            stopped_by_limit: outcome == AttackOutcome::LimitReached,
            outcome,
        }
    }

    fn report(&self, attempts: u64) {
        if let Some(sink) = &self.progress {
            sink.on_progress(attempts);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    fn brute(charset: &str, max_length: usize) -> crate::attack::AttackConfigBuilder {
        AttackConfig::builder(AttackMode::BruteForce)
            .charset(charset)
            .min_length(1)
            .max_length(max_length)
            .throttle_pause(Duration::ZERO)
    }

    #[test]
    fn test_found_counts_attempts_before_match() {
        let config = brute("az", 2).build().unwrap();
        let result = AttackSimulator::new().simulate_attack(&config, "zz");

        assert!(result.success);
        assert_eq!(result.password_found.as_deref(), Some("zz"));
        assert_eq!(result.attempts, 5);
        assert!(!result.stopped_by_limit);
        assert_eq!(result.mode, AttackMode::BruteForce);
    }

    #[test]
    fn test_first_candidate_match() {
        let config = brute("az", 2).build().unwrap();
        let result = AttackSimulator::new().simulate_attack(&config, "a");
        assert!(result.success);
        assert_eq!(result.attempts, 0);
    }

    #[test]
    fn test_exhausted() {
        let config = brute("ab", 2).build().unwrap();
        let result = AttackSimulator::new().simulate_attack(&config, "zzz");

        assert!(!result.success);
        assert_eq!(result.password_found, None);
        assert_eq!(result.attempts, 6);
        assert_eq!(result.outcome, AttackOutcome::Exhausted);
        assert!(!result.stopped_by_limit);
    }

    #[test]
    fn test_limit_reached() {
        let config = brute("abc", 4).max_attempts(10).build().unwrap();
        let result = AttackSimulator::new().simulate_attack(&config, "cccc");

        assert_eq!(result.outcome, AttackOutcome::LimitReached);
        assert!(result.stopped_by_limit);
        assert_eq!(result.attempts, 10);
    }

    #[test]
    fn test_time_limit() {
        let config = brute("abcdefghij", 12)
            .max_attempts(u64::MAX)
            .time_limit(Duration::from_millis(20))
            .build()
            .unwrap();
        let result = AttackSimulator::new().simulate_attack(&config, "not-reachable");

        assert_eq!(result.outcome, AttackOutcome::LimitReached);
        assert!(result.stopped_by_limit);
        assert!(result.attempts > 0);
    }

    #[test]
    fn test_idle_stop_does_not_cancel_next_run() {
        let config = brute("ab", 3).build().unwrap();
        let simulator = AttackSimulator::new();

        let first = simulator.simulate_attack(&config, "ab");
        assert_eq!(first.outcome, AttackOutcome::Found);

        simulator.stop();
        assert!(simulator.stop_handle().is_stop_requested());

        let second = simulator.simulate_attack(&config, "bbb");
        assert_eq!(second.outcome, AttackOutcome::Found);
        assert_eq!(second.attempts, 13);
        assert!(!simulator.stop_handle().is_stop_requested());
    }

    #[test]
    fn test_stop_during_run_cancels() {
        let config = brute("ab", 3).progress_interval(1).build().unwrap();
        let simulator = AttackSimulator::new();
        let handle = simulator.stop_handle();
        let simulator = simulator.with_progress(move |attempts: u64| {
            if attempts == 3 {
                handle.stop();
            }
        });

        let result = simulator.simulate_attack(&config, "bbb");
        assert_eq!(result.outcome, AttackOutcome::Cancelled);
        assert_eq!(result.attempts, 3);
        assert!(!result.stopped_by_limit);
        assert!(!simulator.stop_handle().is_stop_requested());
    }

    #[test]
    fn test_throttle_pause() {
        let config = brute("ab", 2)
            .speed_limit(2)
            .throttle_pause(Duration::from_millis(15))
            .build()
            .unwrap();
        let result = AttackSimulator::new().simulate_attack(&config, "bb");

        // 第 2、4 次尝试后各暂停一次
        assert_eq!(result.attempts, 5);
        assert!(result.time_seconds >= 0.03);
    }

    #[test]
    fn test_progress_sink() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            move |attempts: u64| seen.lock().unwrap().push(attempts)
        };

        let config = brute("ab", 3).progress_interval(4).build().unwrap();
        let simulator = AttackSimulator::new().with_progress(sink);
        let result = simulator.simulate_attack(&config, "zzzz");

        assert_eq!(result.attempts, 14);
        assert_eq!(*seen.lock().unwrap(), vec![4, 8, 12, 14]);
    }

    #[test]
    fn test_attempts_per_second() {
        let mut result = AttackSimulator::new()
            .simulate_attack(&brute("ab", 1).build().unwrap(), "b");
        result.time_seconds = 2.0;
        result.attempts = 10;
        assert_eq!(result.attempts_per_second(), 5.0);

        result.time_seconds = 0.0;
        assert_eq!(result.attempts_per_second(), 0.0);
    }

    #[test]
    fn test_result_serializes() {
        let config = AttackConfig::builder(AttackMode::CredentialStuffing)
            .build()
            .unwrap();
        let result = AttackSimulator::new().simulate_attack(&config, "Admin@123");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["mode"], "credential_stuffing");
        assert_eq!(json["outcome"], "found");
        assert_eq!(json["attempts"], 2);
    }
}
