// Tests for the fail-fast configuration contract
//
// A missing credential, endpoint, or database URL must surface as a
// configuration error before any network call is attempted.

use meeting_insights::config::{
    Config, DatabaseConfig, HttpConfig, InsightsConfig, LimitsConfig, ServiceConfig,
    TranscriptionConfig,
};
use meeting_insights::Error;

fn valid_config() -> Config {
    Config {
        service: ServiceConfig {
            name: "meeting-insights".to_string(),
            http: HttpConfig {
                bind: "127.0.0.1".to_string(),
                port: 8787,
            },
        },
        transcription: TranscriptionConfig {
            endpoint: "https://stt.example.com/v1/listen".to_string(),
            api_key: "stt-key".to_string(),
            timeout_secs: 120,
        },
        insights: InsightsConfig {
            endpoint: "https://gen.example.com/v1/generate".to_string(),
            api_key: "gen-key".to_string(),
            timeout_secs: 60,
        },
        database: DatabaseConfig {
            url: "sqlite://meetings.db".to_string(),
        },
        limits: LimitsConfig::default(),
    }
}

fn assert_config_error_naming(cfg: &Config, key: &str) {
    match cfg.validate() {
        Err(Error::Config(message)) => {
            assert!(
                message.contains(key),
                "error should name {}, got: {}",
                key,
                message
            );
        }
        other => panic!("expected configuration error for {}, got: {:?}", key, other),
    }
}

#[test]
fn test_valid_config_passes() {
    assert!(valid_config().validate().is_ok());
}

#[test]
fn test_missing_transcription_api_key_fails_fast() {
    let mut cfg = valid_config();
    cfg.transcription.api_key = String::new();
    assert_config_error_naming(&cfg, "transcription.api_key");

    // Whitespace is not a credential either
    cfg.transcription.api_key = "   ".to_string();
    assert_config_error_naming(&cfg, "transcription.api_key");
}

#[test]
fn test_missing_transcription_endpoint_fails_fast() {
    let mut cfg = valid_config();
    cfg.transcription.endpoint = String::new();
    assert_config_error_naming(&cfg, "transcription.endpoint");
}

#[test]
fn test_missing_insights_api_key_fails_fast() {
    let mut cfg = valid_config();
    cfg.insights.api_key = String::new();
    assert_config_error_naming(&cfg, "insights.api_key");
}

#[test]
fn test_missing_insights_endpoint_fails_fast() {
    let mut cfg = valid_config();
    cfg.insights.endpoint = String::new();
    assert_config_error_naming(&cfg, "insights.endpoint");
}

#[test]
fn test_missing_database_url_fails_fast() {
    let mut cfg = valid_config();
    cfg.database.url = String::new();
    assert_config_error_naming(&cfg, "database.url");
}
