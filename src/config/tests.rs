#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

#[test]
fn test_defaults_match_builtin_limits() {
    let config = Config::default();
    assert_eq!(config.currency, "$");
    assert_eq!(config.alert_lifetime(), Duration::from_secs(3));
    assert_eq!(config.categories[0], "salary");
    assert_eq!(config.budget.len(), 5);
    assert_eq!(config.budget[0], BudgetLimit::new("food", dec!(500)));
}

#[test]
fn test_empty_file_is_defaults() {
    assert_eq!(Config::parse("").unwrap(), Config::default());
}

#[test]
fn test_partial_override() {
    let config = Config::parse(
        r#"
currency = "€"

[[budget]]
category = "food"
limit = 650.5

[[budget]]
category = "travel"
limit = 300
"#,
    )
    .unwrap();
    assert_eq!(config.currency, "€");
    assert_eq!(config.alert_seconds, 3);
    assert_eq!(
        config.budget,
        vec![
            BudgetLimit::new("food", dec!(650.5)),
            BudgetLimit::new("travel", dec!(300)),
        ]
    );
}

#[test]
fn test_rejects_non_positive_limit() {
    let err = Config::parse("[[budget]]\ncategory = \"food\"\nlimit = 0\n").unwrap_err();
    assert!(err.to_string().contains("must be positive"));
}

#[test]
fn test_rejects_duplicate_budget() {
    let err = Config::parse(
        "[[budget]]\ncategory = \"food\"\nlimit = 1\n[[budget]]\ncategory = \"Food\"\nlimit = 2\n",
    )
    .unwrap_err();
    assert!(err.to_string().contains("Duplicate"));
}

#[test]
fn test_rejects_empty_vocabulary() {
    assert!(Config::parse("categories = []").is_err());
}

#[test]
fn test_alert_seconds_bounds() {
    assert!(Config::parse("alert_seconds = 0").is_err());
    let err = Config::parse("alert_seconds = 9223372036854775807").unwrap_err();
    assert!(err.to_string().contains("between 1 and 3600"));
    assert_eq!(Config::parse("alert_seconds = 3600").unwrap().alert_seconds, 3600);
}

#[test]
fn test_rejects_unknown_keys() {
    assert!(Config::parse("currencyy = \"$\"").is_err());
}

#[test]
fn test_load_missing_default_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(&dir.path().join(CONFIG_FILE), false).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_missing_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Config::load(&dir.path().join("nope.toml"), true).is_err());
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    std::fs::write(&path, "alert_seconds = 5\n").unwrap();
    let config = Config::load(&path, true).unwrap();
    assert_eq!(config.alert_lifetime(), Duration::from_secs(5));
}
