use super::*;
use serial_test::serial;

#[test]
fn cli_override_wins_over_everything() {
    let sources = ModelIdSources {
        cli: Some("openrouter/a"),
        project: Some("openrouter/b"),
        user: Some("openrouter/c"),
        frontmatter: Some("openrouter/d"),
    };
    assert_eq!(resolve_model_id(sources, "default"), "openrouter/a");
}

#[test]
fn falls_through_precedence_chain() {
    let sources = ModelIdSources { project: Some("openrouter/b"), ..Default::default() };
    assert_eq!(resolve_model_id(sources, "default"), "openrouter/b");
}

#[test]
fn falls_back_to_default_when_nothing_set() {
    assert_eq!(resolve_model_id(ModelIdSources::default(), "default"), "default");
}

#[test]
#[serial]
fn paths_respect_config_dir_override() {
    std::env::set_var("OSS_CONFIG_DIR", "/tmp/oss-test-config");
    let paths = Paths::resolve(Path::new("/tmp/project"));
    assert_eq!(paths.user_dir, PathBuf::from("/tmp/oss-test-config"));
    assert_eq!(paths.pid_file(), PathBuf::from("/tmp/oss-test-config/daemon.pid"));
    std::env::remove_var("OSS_CONFIG_DIR");
}
