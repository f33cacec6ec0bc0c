use super::*;
use std::time::Duration;

#[tokio::test]
async fn successful_command_returns_trimmed_stdout() {
    let mut cmd = Command::new("echo");
    cmd.arg("hello");
    let output = run(cmd, Duration::from_secs(5)).await.unwrap();
    assert_eq!(output, "hello");
}

#[tokio::test]
async fn nonzero_exit_is_an_error() {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", "exit 1"]);
    let result = run(cmd, Duration::from_secs(5)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn slow_command_times_out() {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", "sleep 2"]);
    let result = run(cmd, Duration::from_millis(50)).await;
    assert!(matches!(result, Err(MonitorError::Shell(_))));
}
