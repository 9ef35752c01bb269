//! Install target integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn install_builds_every_output() {
  let env = TestEnv::site();

  env
    .assetkit_cmd()
    .arg("install")
    .assert()
    .success()
    .stdout(predicate::str::contains("Install complete"))
    .stdout(predicate::str::contains("Built: 6"));

  assert_eq!(env.read_output("static/js/app.js"), "var app = {};\na();\nb();\n");
  assert_eq!(env.read_output("static/img/logo.png"), "PNG");
  assert!(
    env
      .read_output("static/js/app-templates.js")
      .contains("$templateCache.put(\"static/html/home.html\",\"<p>home</p>\");")
  );
  assert_eq!(
    env.read_output("LICENSES"),
    "# Licenses for included software:\n\n## LICENSE.md\n\nMIT\n\n\n"
  );
  assert_eq!(
    env.read_output("sql.json"),
    r#"[{"version":0,"filename":"000-init.sql","sql":"create table t (id int);\n"}]"#
  );
}

#[test]
fn install_is_the_default_target() {
  let env = TestEnv::site();

  env.assetkit_cmd().assert().success();

  assert!(env.output_path("index.html").exists());
}

#[test]
fn install_stamps_revision_tokens() {
  let env = TestEnv::site();

  env.assetkit_cmd().assert().success();

  let index = env.read_output("index.html");
  assert!(!index.contains("?v=0\""), "tokens not replaced: {index}");
  for line in index.lines() {
    let token = line
      .split("?v=")
      .nth(1)
      .and_then(|rest| rest.split('"').next())
      .unwrap_or_else(|| panic!("no token in {line}"));
    assert_eq!(token.len(), 12);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
  }
}

#[test]
fn second_install_is_up_to_date() {
  let env = TestEnv::site();

  env.assetkit_cmd().assert().success();
  env
    .assetkit_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("Everything up to date"))
    .stdout(predicate::str::contains("Built: 0"));
}

#[test]
fn install_json_reports_counts() {
  let env = TestEnv::site();

  let out = env
    .assetkit_cmd()
    .args(["--output", "json", "install"])
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();

  let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
  assert_eq!(report["total"], 6);
  assert_eq!(report["up_to_date"], 0);
  assert_eq!(report["executed"].as_array().map(Vec::len), Some(6));
  assert!(report["duration_ms"].is_u64());
}

#[test]
fn install_honors_dest_override() {
  let env = TestEnv::site();

  env.assetkit_cmd().args(["--dest", "public"]).assert().success();

  assert!(env.root().join("public/index.html").exists());
  assert!(!env.output_path("index.html").exists());
}

#[test]
fn install_with_explicit_config() {
  let env = TestEnv::site();
  env.write_file(
    "conf/robots.toml",
    "[[step]]\nkind = \"concat\"\noutput = \"robots.txt\"\ninputs = [\"robots.txt\"]\n",
  );
  env.write_file("robots.txt", "User-agent: *\n");

  env
    .assetkit_cmd()
    .args(["--config", "conf/robots.toml"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Built: 1"));

  assert_eq!(env.read_output("robots.txt"), "User-agent: *\n");
  assert!(!env.output_path("index.html").exists());
}

#[test]
fn install_missing_source_fails() {
  let env = TestEnv::site();
  std::fs::remove_file(env.root().join("LICENSE.md")).unwrap();

  env
    .assetkit_cmd()
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Build failed"))
    .stderr(predicate::str::contains("LICENSES"));

  assert!(!env.output_path("sql.json").exists());
}

#[test]
fn verbose_install_lists_outputs_and_logs() {
  let env = TestEnv::site();

  env
    .assetkit_cmd()
    .args(["-v", "install"])
    .assert()
    .success()
    .stdout(predicate::str::contains("assets/static/js/app.js"))
    .stderr(predicate::str::contains("building"));
}
