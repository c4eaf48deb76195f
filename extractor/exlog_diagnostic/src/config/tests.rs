use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults_when_unset() {
    let config = LogConfig::from_lookup(lookup_from(&[]));
    assert_eq!(config, LogConfig::default());
    assert_eq!(config.verbosity, Verbosity(3));
    assert_eq!(config.diagnostic_limit, 100);
    assert!(config.log_dir.is_none());
    assert_eq!(config.origin, DEFAULT_ORIGIN);
}

#[test]
fn test_reads_values() {
    let config = LogConfig::from_lookup(lookup_from(&[
        (VERBOSITY_VAR, "4"),
        (DIAGNOSTIC_LIMIT_VAR, "-1"),
        (LOG_DIR_VAR, "/tmp/logs"),
    ]));
    assert_eq!(config.verbosity, Verbosity(4));
    assert_eq!(config.diagnostic_limit, -1);
    assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/logs")));
}

#[test]
fn test_malformed_numbers_fall_back() {
    let config = LogConfig::from_lookup(lookup_from(&[
        (VERBOSITY_VAR, "loud"),
        (DIAGNOSTIC_LIMIT_VAR, "1e3"),
    ]));
    assert_eq!(config.verbosity, Verbosity(3));
    assert_eq!(config.diagnostic_limit, DEFAULT_DIAGNOSTIC_LIMIT);
}

#[test]
fn test_empty_log_dir_means_stdout() {
    let config = LogConfig::from_lookup(lookup_from(&[(LOG_DIR_VAR, "")]));
    assert!(config.log_dir.is_none());
}

#[test]
fn test_with_origin() {
    let config = LogConfig::default().with_origin("Test extractor");
    assert_eq!(config.origin, "Test extractor");
}

#[test]
fn test_init_tracing_is_idempotent() {
    crate::init_tracing();
    crate::init_tracing();
    assert_eq!(TRACE_TREE_VAR, "EXLOG_TRACE_TREE");
}
