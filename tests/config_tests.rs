use std::io::Write;

use namecheap_rs::{ConfigSource, EnvSource, Layered, NamecheapConfig, SANDBOX_URL, TomlSource};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_toml_file_source() {
    let file = write_config(
        r#"
[namecheap]
url = "https://api.sandbox.namecheap.com/xml.response"
name = "apiuser"
user = "username"
key = "filekey"
client_ip = "198.51.100.20"
"#,
    );

    let source = TomlSource::from_file(file.path()).unwrap();
    let config = NamecheapConfig::from_source(&source);

    assert_eq!(config.url, SANDBOX_URL);
    assert_eq!(config.api_user, "apiuser");
    assert_eq!(config.user_name, "username");
    assert_eq!(config.api_key, "filekey");
    assert_eq!(config.client_ip, "198.51.100.20");
}

#[test]
fn test_toml_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let err = TomlSource::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_prefixed_env_layered_over_file() {
    // A unique prefix keeps this test independent of the real NAMECHEAP_* variables.
    let env = EnvSource::with_prefix("NCRS_CONFIG_TEST");
    // SAFETY: no other test reads or writes this prefixed variable.
    unsafe {
        std::env::set_var(env.var_name("namecheap.key"), "envkey");
    }

    let file = write_config("[namecheap]\nkey = \"filekey\"\nname = \"fileuser\"\n");
    let layered = Layered::new()
        .with(env)
        .with(TomlSource::from_file(file.path()).unwrap());

    assert_eq!(layered.option("namecheap.key").as_deref(), Some("envkey"));
    assert_eq!(layered.option("namecheap.name").as_deref(), Some("fileuser"));

    let config = NamecheapConfig::from_source(&layered);
    assert_eq!(config.api_key, "envkey");
    assert_eq!(config.client_ip, "");
}

#[test]
fn test_request_params_from_file_config() {
    let file = write_config("[namecheap]\nname = \"a\"\nuser = \"b\"\nkey = \"c\"\nclient_ip = \"d\"\n");
    let config = NamecheapConfig::from_source(&TomlSource::from_file(file.path()).unwrap());
    let params = config.request_params("namecheap.ssl.getList");

    let pairs: Vec<_> = params.iter().collect();
    assert_eq!(
        pairs,
        vec![
            ("ApiUser", "a"),
            ("UserName", "b"),
            ("ApiKey", "c"),
            ("ClientIp", "d"),
            ("Command", "namecheap.ssl.getList"),
        ]
    );
}
