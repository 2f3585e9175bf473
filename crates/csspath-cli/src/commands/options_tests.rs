use std::io::Write;

use csspath_compiler::{CompileOptions, GeneralSibling, LiteralQuoting};

use super::input::InputError;
use super::options::OptionFlags;

fn config_file(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", json).unwrap();
    file
}

#[test]
fn no_flags_give_defaults() {
    let options = OptionFlags::default().resolve().unwrap();
    assert_eq!(options, CompileOptions::default());
}

#[test]
fn flags_apply_on_top_of_defaults() {
    let flags = OptionFlags {
        escape_literals: true,
        general_sibling: Some(GeneralSibling::AnyFollowing),
        recursion_limit: Some(3),
        ..Default::default()
    };
    let options = flags.resolve().unwrap();

    assert_eq!(options.literal_quoting, LiteralQuoting::Escaped);
    assert_eq!(options.general_sibling, GeneralSibling::AnyFollowing);
    assert_eq!(options.recursion_limit, 3);
}

#[test]
fn config_file_fills_missing_fields_with_defaults() {
    let file = config_file(r#"{ "general-sibling": "any-following" }"#);
    let flags = OptionFlags {
        config: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let options = flags.resolve().unwrap();

    assert_eq!(options.general_sibling, GeneralSibling::AnyFollowing);
    assert_eq!(options.literal_quoting, LiteralQuoting::Verbatim);
    assert_eq!(options.recursion_limit, 32);
}

#[test]
fn flags_override_config_file() {
    let file = config_file(r#"{ "literal-quoting": "verbatim", "recursion-limit": 8 }"#);
    let flags = OptionFlags {
        config: Some(file.path().to_path_buf()),
        escape_literals: true,
        recursion_limit: Some(2),
        ..Default::default()
    };
    let options = flags.resolve().unwrap();

    assert_eq!(options.literal_quoting, LiteralQuoting::Escaped);
    assert_eq!(options.recursion_limit, 2);
}

#[test]
fn malformed_config_is_reported() {
    let file = config_file(r#"{ "general-sibling": "sideways" }"#);
    let flags = OptionFlags {
        config: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let err = flags.resolve().unwrap_err();

    assert!(matches!(err, InputError::Config { .. }));
    assert!(err.to_string().starts_with("invalid config '"));
}
