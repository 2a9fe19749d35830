//! Verify XML config is parsed and used without touching user state.

use std::fs;
use tempfile::tempdir;

use publink::{load_config_from_xml_path, LogLevel};

#[test]
fn reads_config_xml_and_applies_values() {
    let td = tempdir().expect("create tempdir");

    let cfg_path = td.path().join("config.xml");
    let public_root = td.path().join("Public");
    let space_root = td.path().join("Sync");
    let log_file = td.path().join("publink.log");

    let xml = format!(
        r#"
<config>
  <public_root>{}</public_root>
  <url_base>  https://dl.example.net/u/42/  </url_base>
  <default_dir>shots</default_dir>
  <space_root>{}</space_root>
  <case_insensitive_root>false</case_insensitive_root>
  <clipboard>no</clipboard>
  <log_level>info</log_level>
  <log_file>{}</log_file>
</config>
"#,
        public_root.display(),
        space_root.display(),
        log_file.display()
    );
    fs::write(&cfg_path, xml).expect("write config.xml");

    let cfg = load_config_from_xml_path(&cfg_path).expect("load_config_from_xml_path");

    assert_eq!(cfg.public_root, public_root, "public_root mismatch");
    assert_eq!(cfg.url_base, "https://dl.example.net/u/42/", "url_base is trimmed");
    assert_eq!(cfg.default_dir, "shots");
    assert_eq!(cfg.space_root, space_root);
    assert!(!cfg.case_insensitive_root);
    assert!(!cfg.clipboard);
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert_eq!(cfg.log_file.as_deref(), Some(log_file.as_path()));
}

#[test]
fn missing_fields_keep_defaults() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config>\n  <url_base>http://x.example/</url_base>\n  <log_file>   </log_file>\n</config>\n").unwrap();

    let cfg = load_config_from_xml_path(&cfg_path).unwrap();
    assert_eq!(cfg.url_base, "http://x.example/");
    assert_eq!(cfg.default_dir, "t");
    assert!(cfg.case_insensitive_root);
    assert!(cfg.clipboard);
    assert_eq!(cfg.log_level, LogLevel::Normal);
    assert!(cfg.log_file.is_none(), "whitespace-only log_file disables file logging");
}

#[test]
fn unknown_field_is_rejected() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><download_base>/x</download_base></config>").unwrap();

    let err = load_config_from_xml_path(&cfg_path).unwrap_err();
    assert!(
        format!("{err:#}").contains("parse config xml"),
        "unexpected error: {err:#}"
    );
}

#[test]
fn malformed_xml_is_an_error() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><public_root>/x</config>").unwrap();
    assert!(load_config_from_xml_path(&cfg_path).is_err());
}
