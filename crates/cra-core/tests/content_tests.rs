//! Integration tests for the shipped content configuration.
//!
//! The YAML file under `content/` must stay in step with the reference
//! configuration built in code.

use cra_core::{AppContent, ChangeStatus, ContentError, CustomerImpact};

/// Path to the content file relative to the workspace root
const CONTENT_PATH: &str = "content/change-risk.yaml";

/// Get the absolute path to the content file
fn content_path() -> std::path::PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = std::path::Path::new(&manifest_dir).parent().unwrap().parent().unwrap();
    workspace_root.join(CONTENT_PATH)
}

#[test]
fn test_shipped_yaml_matches_reference() {
    let loaded = AppContent::from_path(content_path()).unwrap();
    assert_eq!(loaded, AppContent::reference());
}

#[test]
fn test_shipped_rule_order() {
    let loaded = AppContent::from_path(content_path()).unwrap();
    let codes: Vec<&str> = loaded.risk_rules.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(
        codes,
        ["TIER3_SYSTEM", "HIGH_IMPACT", "NO_ROLLBACK", "NO_TEST", "SHORT_NOTICE", "LONG_DURATION"]
    );
    let points: Vec<u32> = loaded.risk_rules.iter().map(|r| r.points).collect();
    assert_eq!(points, [25, 20, 15, 15, 10, 8]);
}

#[test]
fn test_shipped_lookups() {
    let loaded = AppContent::from_path(content_path()).unwrap();
    assert_eq!(loaded.lookups.customer_impact, CustomerImpact::ALL.to_vec());
    assert_eq!(loaded.lookups.status, ChangeStatus::ALL.to_vec());
    assert!(loaded.lookups.change_types.iter().any(|t| t == "other"));
}

#[test]
fn test_missing_file_reports_path() {
    let err = AppContent::from_path("/definitely/not/here.yaml").unwrap_err();
    match err {
        ContentError::Read { path, .. } => assert!(path.ends_with("here.yaml")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_impact_is_rejected() {
    let yaml = r#"
brand: { name: Test, tagline: t, owner: Tester }
lookups:
  changeTypes: [patch]
  customerImpact: [catastrophic]
  status: [draft]
riskRules: []
"#;
    assert!(matches!(AppContent::from_yaml(yaml), Err(ContentError::Yaml(_))));
}
