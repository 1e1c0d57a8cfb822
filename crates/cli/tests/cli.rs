use assert_cmd::Command;

fn stayhub(config_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("stayhub").unwrap();
    cmd.env("STAYHUB_CONFIG_DIR", config_dir)
        .env("STAYHUB_ENV", "local")
        .env("STAYHUB_STORAGE__BACKEND", "memory");
    cmd
}

#[test]
fn openapi_lists_property_routes() {
    let dir = tempfile::tempdir().unwrap();
    let output = stayhub(dir.path()).arg("openapi").output().unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(doc["paths"]["/api/property/rooms"]["post"].is_object());
}

#[test]
fn token_command_prints_a_jwt() {
    let dir = tempfile::tempdir().unwrap();
    let output = stayhub(dir.path())
        .args(["token", "--user", "owner-1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let token = String::from_utf8(output.stdout).unwrap();
    assert_eq!(token.trim().split('.').count(), 3);
}

#[test]
fn unknown_environment_fails() {
    let dir = tempfile::tempdir().unwrap();
    stayhub(dir.path())
        .env("STAYHUB_ENV", "qa")
        .arg("openapi")
        .assert()
        .failure();
}
