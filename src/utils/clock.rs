use std::time::{SystemTime, UNIX_EPOCH};

/// 时钟抽象，便于在测试中注入固定时间
pub trait Clock: Send + Sync {
    /// 当前时间的 unix 秒数
    fn unix_seconds(&self) -> u64;
}

/// 读取系统墙钟时间
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> u64 {
        // 系统时间早于 1970 年时按 0 处理
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// 始终返回同一时间的时钟
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn unix_seconds(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        assert_eq!(FixedClock(1000).unix_seconds(), 1000);
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        assert!(SystemClock.unix_seconds() > 1_577_836_800);
    }
}
