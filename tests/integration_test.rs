// tests/integration_test.rs
use std::process::Command;

fn catalog_publish() -> Command {
    Command::new(env!("CARGO_BIN_EXE_catalog-publish"))
}

#[test]
fn test_catalog_publish_help() {
    let output = catalog_publish()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("catalog-publish"));
    assert!(stdout.contains("--metadata"));
    assert!(stdout.contains("--release-version"));
}

#[test]
fn test_missing_required_arguments() {
    let output = catalog_publish()
        .output()
        .expect("Failed to execute command");

    // clap exits with 2 on usage errors
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_json_plan_for_major_release() {
    let output = catalog_publish()
        .args([
            "-m",
            "tests/fixtures/metadata.yml",
            "-r",
            "6.0.0",
            "-c",
            "tests/fixtures/catalog-publish.toml",
            "-s",
            "tests/fixtures",
            "--history",
            "tests/fixtures/releases.json",
            "--json",
        ])
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["product_slug"], "vmware-greenplum");
    assert_eq!(plan["release"]["release_type"], "Major Release");
    assert_eq!(plan["release"]["end_of_support_date"], "2022-09-30");
    assert_eq!(plan["release"]["end_of_guidance_date"], "2023-09-30");
    assert_eq!(plan["release"]["end_of_availability_date"], "2021-03-03");
    assert_eq!(
        plan["release"]["release_notes_url"],
        "https://gpdb.docs.pivotal.io/6-0/main/index.html"
    );
    assert_eq!(
        plan["product_files"][0]["object_key"],
        "product-files/gpdb6/release-notes.pdf"
    );
}

#[test]
fn test_invalid_release_version_fails() {
    let output = catalog_publish()
        .args([
            "-m",
            "tests/fixtures/metadata.yml",
            "-r",
            "6.0",
            "-c",
            "tests/fixtures/catalog-publish.toml",
            "--history",
            "tests/fixtures/releases.json",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("6.0"));
}
