//! # 시간 공급자
//!
//! 토큰 발급 시각(`iat`/`exp`)과 캐시 TTL 판정에 사용하는 현재 시각을 추상화합니다.
//! 운영 환경에서는 [`SystemClock`], 테스트에서는 [`ManualClock`]을 주입하여
//! 만료 시나리오를 실제 대기 없이 재현합니다.

use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};

/// 현재 시각을 제공하는 trait
pub trait Clock: Send + Sync {
    /// 현재 UTC 시각
    fn now(&self) -> DateTime<Utc>;
}

/// 시스템 시계를 그대로 사용하는 기본 구현
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 수동으로 시각을 조작할 수 있는 시계
///
/// # Examples
///
/// ```rust,ignore
/// let clock = ManualClock::new(Utc::now());
/// clock.advance(Duration::days(1));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: RwLock::new(start) }
    }

    /// 현재 시각을 `by`만큼 앞으로 이동합니다.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += by;
    }

    /// 현재 시각을 지정한 값으로 고정합니다.
    pub fn set(&self, at: DateTime<Utc>) {
        let mut now = self.now.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now = at;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advance() {
        let start = Utc::now();
        let clock = ManualClock::new(start);

        assert_eq!(clock.now(), start);

        clock.advance(Duration::seconds(90));
        assert_eq!(clock.now(), start + Duration::seconds(90));
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = ManualClock::new(Utc::now());
        let target = Utc::now() - Duration::days(3);

        clock.set(target);
        assert_eq!(clock.now(), target);
    }
}
