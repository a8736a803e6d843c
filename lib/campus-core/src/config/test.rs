use std::time::Duration;

use super::ConfigParsingError;
use super::core_config::{CoreConfig, ListConfig};

#[test]
fn test_defaults() {
    let config = CoreConfig::default();

    assert_eq!(config.list.default_page_size, 10);
    assert_eq!(config.list.stale_time, Duration::from_secs(30));
    assert_eq!(config.list.cache_size, 100);
    assert_eq!(config.list.search_debounce, Duration::from_millis(500));
    assert!(config.list.clamp_out_of_range_page);
    assert!(config.list.clear_selection_on_query_change);
    assert!(config.backend.is_none());
}

#[test]
#[cfg(feature = "config_yaml")]
fn test_parse_and_merge_yaml() {
    let base = indoc::indoc! {"
        list:
            defaultPageSize: 25
            staleTime: 60
        backend:
            baseUrl: 'https://campus.example/api/v1/'
            requestTimeout: 15
    "};
    let overlay = indoc::indoc! {"
        list:
            searchDebounce: 250
            clearSelectionOnQueryChange: false
        entities:
            student-enrollments:
                defaultPageSize: 50
                staleTime: 5
    "};

    let config = CoreConfig::from_yaml([base, overlay]).unwrap();

    assert_eq!(
        config.list,
        ListConfig {
            default_page_size: 25,
            stale_time: Duration::from_secs(60),
            cache_size: 100,
            search_debounce: Duration::from_millis(250),
            clamp_out_of_range_page: true,
            clear_selection_on_query_change: false,
        }
    );

    let backend = config.backend.as_ref().unwrap();
    assert_eq!(backend.base_url.as_str(), "https://campus.example/api/v1/");
    assert_eq!(backend.request_timeout, Some(Duration::from_secs(15)));

    let enrollments = config.list_config_for("student-enrollments");
    assert_eq!(enrollments.default_page_size, 50);
    assert_eq!(enrollments.stale_time, Duration::from_secs(5));
    assert_eq!(enrollments.search_debounce, Duration::from_millis(250));

    assert_eq!(config.list_config_for("branches"), config.list);
}

#[test]
#[cfg(feature = "config_yaml")]
fn test_empty_yaml_gives_defaults() {
    let config = CoreConfig::from_yaml(["{}"]).unwrap();

    assert_eq!(config, CoreConfig::default());
}

#[test]
#[cfg(feature = "config_yaml")]
fn test_zero_page_size_is_rejected() {
    let config = indoc::indoc! {"
        entities:
            fee-heads:
                defaultPageSize: 0
    "};

    let result = CoreConfig::from_yaml([config]);
    assert!(matches!(
        result,
        Err(ConfigParsingError::GeneralParsingError(message)) if message.contains("fee-heads")
    ));
}

#[test]
#[cfg(feature = "config_yaml")]
fn test_invalid_base_url_is_rejected() {
    let config = indoc::indoc! {"
        backend:
            baseUrl: 'not a url'
    "};

    assert!(CoreConfig::from_yaml([config]).is_err());
}

#[test]
fn test_unsupported_file_extension() {
    let result = CoreConfig::from_files(&["config.toml"]);

    assert!(matches!(
        result,
        Err(ConfigParsingError::GeneralParsingError(_))
    ));
}

#[test]
#[cfg(feature = "config_json")]
fn test_parse_json() {
    use super::core_config::InputFormat;

    let config = CoreConfig::parse([InputFormat::json_str(
        r#"{ "list": { "cacheSize": 5, "clampOutOfRangePage": false } }"#,
    )])
    .unwrap();

    assert_eq!(config.list.cache_size, 5);
    assert!(!config.list.clamp_out_of_range_page);
}
