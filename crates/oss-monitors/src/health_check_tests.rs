use super::*;
use chrono::TimeZone;

struct FakeRunner {
    outcome: Result<(String, u64), crate::error::MonitorError>,
}

impl HealthCheckRunner for FakeRunner {
    fn run(&self) -> Result<(String, u64), crate::error::MonitorError> {
        self.outcome.clone()
    }
}

#[test]
fn successful_tick_records_output_and_is_queryable() {
    let scheduler = HealthCheckScheduler::new(FakeRunner { outcome: Ok(("ok".to_string(), 42)) });
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let (result, log) = scheduler.tick(now);
    assert!(result.success);
    assert_eq!(result.duration_ms, 42);
    assert!(log.contains("success=true"));
    assert_eq!(scheduler.last_result().unwrap(), result);
}

#[test]
fn failed_tick_records_error() {
    let scheduler = HealthCheckScheduler::new(FakeRunner {
        outcome: Err(crate::error::MonitorError::Shell("exit 1".to_string())),
    });
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let (result, log) = scheduler.tick(now);
    assert!(!result.success);
    assert!(log.contains("shell command failed"));
}
