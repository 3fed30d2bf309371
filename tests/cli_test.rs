mod common;

use common::{TestCommand, TestEnvironment};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_cli_help() {
    TestCommand::new()
        .arg("--help")
        .expect_success()
        .stdout_contains("Push notifications to LaMetric displays")
        .done();
}

#[test]
fn test_cli_version() {
    TestCommand::new()
        .arg("--version")
        .expect_success()
        .stdout_contains("lametric-notify")
        .done();
}

#[test]
fn test_missing_config_fails() {
    let env = TestEnvironment::with_devices(&[]);
    TestCommand::new()
        .arg("--config")
        .arg(env.temp_dir.path().join("absent.yml").to_string_lossy())
        .arg("devices")
        .expect_failure()
        .stderr_contains("Configuration file not found")
        .done();
}

#[test]
fn test_config_from_env() {
    let env = TestEnvironment::with_devices(&[("10.0.0.9", "abcdefgh")]);
    TestCommand::new()
        .env("LAMETRIC_CONFIG", env.config_path.to_string_lossy())
        .arg("devices")
        .expect_success()
        .stdout_contains("10.0.0.9")
        .done();
}

#[test]
fn test_devices_masks_tokens() {
    let env = TestEnvironment::with_devices(&[("10.0.0.9", "abcdefgh"), ("desk:9000", "zzzzzzzz")]);
    env.command()
        .arg("devices")
        .expect_success()
        .stdout_contains("Configured devices (2)")
        .stdout_contains("http://10.0.0.9:8080/")
        .stdout_contains("http://desk:9000/")
        .stdout_contains("token=abcd****")
        .stdout_lacks("abcdefgh")
        .done();
}

#[test]
fn test_send_dry_run() {
    let env = TestEnvironment::with_devices(&[("10.0.0.9", "token")]);
    env.command()
        .args(["send", "--dry-run", "--text", "Deploy done", "--priority", "warning"])
        .expect_success()
        .stdout_contains("Dry run - would send notification")
        .stdout_contains("\"text\": \"Deploy done\"")
        .stdout_contains("\"priority\": \"warning\"")
        .stdout_contains("POST http://10.0.0.9:8080/api/v2/device/notifications")
        .done();
}

#[test]
fn test_send_with_no_devices() {
    let env = TestEnvironment::with_devices(&[]);
    env.command()
        .arg("send")
        .expect_success()
        .stdout_contains("0 notifications sent")
        .done();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_default_command_sends_to_every_device() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/device/notifications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": {"id": "42"}})))
        .expect(2)
        .mount(&server)
        .await;

    let address = server.address().to_string();
    let env =
        TestEnvironment::with_devices(&[(address.as_str(), "one"), (address.as_str(), "two")]);

    // the binary blocks this worker; the mock server keeps running on the other
    env.command()
        .expect_success()
        .stdout_contains("-> notification 42")
        .stdout_contains("2 notifications sent")
        .done();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_failing_device_exits_with_error() {
    let ok = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": {"id": "1"}})))
        .mount(&ok)
        .await;
    let failing = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&failing)
        .await;

    let ok_address = ok.address().to_string();
    let failing_address = failing.address().to_string();
    let env = TestEnvironment::with_devices(&[
        (ok_address.as_str(), "a"),
        (failing_address.as_str(), "b"),
    ]);

    env.command()
        .arg("send")
        .expect_failure()
        .stdout_contains("-> notification 1")
        .stderr_contains(&failing_address)
        .stderr_contains("503")
        .done();
}

#[test]
fn test_sound_repeat_requires_sound() {
    let env = TestEnvironment::with_devices(&[]);
    env.command()
        .args(["send", "--sound-repeat", "2"])
        .expect_failure()
        .stderr_contains("requires --sound")
        .done();
}

#[test]
fn test_unreachable_device_reported_once() {
    // bind then drop a listener so nothing listens on its port
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap().to_string();
    drop(listener);

    let env = TestEnvironment::with_devices(&[(address.as_str(), "a")]);
    env.command()
        .arg("send")
        .expect_failure()
        .stderr_contains(format!("device {address}: request failed"))
        .stderr_lacks("Caused by")
        .done();
}

#[test]
fn test_zero_retry_attempts_rejected_at_startup() {
    let env = TestEnvironment::with_yaml("devices: []\nretry:\n  max_attempts: 0\n");
    env.command()
        .arg("send")
        .expect_failure()
        .stderr_contains("retry.max_attempts must be at least 1")
        .done();
}
