use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;
use toxwatch_config::ToxwatchConfigLoader;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn loads_full_config_from_file() {
    let tmp = TempDir::new().unwrap();

    let file_yaml = r#"
reddit:
  client_id: "abc123"
  client_secret: "${TOXWATCH_TEST_SECRET}"
  username: "toxbot"
  password: "hunter2"
  user_agent: "toxwatch/0.1 by toxbot"
feed:
  subreddit: "rust"
  limit: 10
  poll_interval_secs: 60
model:
  weights_path: "artifacts/toxicity.bin"
  vocab_path: "artifacts/vocab.json"
server:
  bind_addr: "0.0.0.0:9090"
"#;
    let p = write_yaml(&tmp, "toxwatch.yaml", file_yaml);

    temp_env::with_var("TOXWATCH_TEST_SECRET", Some("injected"), || {
        let config = ToxwatchConfigLoader::new()
            .with_file(&p)
            .load()
            .expect("load toxwatch config");

        assert_eq!(config.reddit.client_id, "abc123");
        assert_eq!(config.reddit.client_secret, "injected");
        assert_eq!(config.feed.subreddit, "rust");
        assert_eq!(config.feed.limit, 10);
        assert_eq!(config.feed.poll_interval_secs, 60);
        assert_eq!(config.model.weights_path, "artifacts/toxicity.bin");
        assert_eq!(config.server.bind_addr, "0.0.0.0:9090");
    });
}

#[test]
#[serial]
fn missing_reddit_section_fails_load() {
    let result = ToxwatchConfigLoader::new()
        .with_yaml_str(
            r#"
model:
  weights_path: "artifacts/toxicity.bin"
  vocab_path: "artifacts/vocab.json"
"#,
        )
        .load();

    assert!(result.is_err(), "credentials are required at startup");
}

#[test]
#[serial]
fn feed_and_server_sections_are_optional() {
    let config = ToxwatchConfigLoader::new()
        .with_yaml_str(
            r#"
reddit:
  client_id: "id"
  client_secret: "secret"
  username: "bot"
  password: "pw"
  user_agent: "toxwatch/0.1"
model:
  weights_path: "model.bin"
  vocab_path: "vocab.json"
"#,
        )
        .load()
        .expect("defaults fill the optional sections");

    assert_eq!(config.feed.subreddit, "MachineLearning");
    assert_eq!(config.feed.limit, 20);
    assert_eq!(config.feed.poll_interval_secs, 300);
    assert_eq!(config.server.bind_addr, "127.0.0.1:8080");
}
