//! Clean target integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn clean_removes_output_tree() {
  let env = TestEnv::site();
  env.assetkit_cmd().assert().success();
  assert!(env.output_path("index.html").exists());

  env
    .assetkit_cmd()
    .arg("clean")
    .assert()
    .success()
    .stdout(predicate::str::contains("Removed"));

  assert!(!env.root().join("assets").exists());
}

#[test]
fn clean_then_install_announces_each_target() {
  let env = TestEnv::site();
  env.assetkit_cmd().assert().success();

  env
    .assetkit_cmd()
    .args(["clean", "install"])
    .assert()
    .success()
    .stderr(predicate::str::contains("# clean:"))
    .stderr(predicate::str::contains("# install:"))
    .stdout(predicate::str::contains("Built: 6"));

  assert!(env.output_path("index.html").exists());
}

#[test]
fn single_target_is_not_announced() {
  let env = TestEnv::site();

  env
    .assetkit_cmd()
    .arg("clean")
    .assert()
    .success()
    .stderr(predicate::str::contains("# clean:").not());
}

#[test]
fn clean_json_reports_removal() {
  let env = TestEnv::site();
  env.assetkit_cmd().assert().success();

  env
    .assetkit_cmd()
    .args(["-o", "json", "clean"])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"removed\": true"));
}

#[test]
fn clean_ignores_broken_pipeline_file() {
  let env = TestEnv::site();
  env.assetkit_cmd().assert().success();
  env.write_file("assetkit.toml", "[[step]]\nkind = \"minify\"\n");

  env
    .assetkit_cmd()
    .arg("clean")
    .assert()
    .success()
    .stderr(predicate::str::contains("pipeline not loaded"));

  assert!(!env.root().join("assets").exists());
}

#[test]
fn clean_refuses_project_root_as_destination() {
  let env = TestEnv::site();

  env
    .assetkit_cmd()
    .args(["--dest", "", "clean"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("must be a directory inside the project root"));

  assert!(env.root().join("src/index.html").exists());
  assert!(env.root().join("assetkit.toml").exists());
}

#[test]
fn install_refuses_parent_destination() {
  let env = TestEnv::site();

  env.assetkit_cmd().args(["--dest", ".."]).assert().code(1);

  assert!(!env.root().join("assets").exists());
}
