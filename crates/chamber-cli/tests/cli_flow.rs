use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

fn chamber(project: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_chamber"))
        .current_dir(project)
        .env("HOME", project)
        .env("XDG_CONFIG_HOME", project.join("xdg"))
        .env_remove("CHAMBER_LOG")
        .env_remove("CHAMBER_SESSION_TOKEN")
        .args(["--format", "json"])
        .args(args)
        .output()
        .expect("run chamber")
}

fn json(project: &Path, args: &[&str]) -> Value {
    let output = chamber(project, args);
    assert!(
        output.status.success(),
        "{args:?} failed\nstderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("json output")
}

fn tile_field(view: &Value, field: &str) -> Vec<String> {
    view["rows"]
        .as_array()
        .expect("grid rows")
        .iter()
        .flat_map(|row| row.as_array().expect("row").iter())
        .map(|tile| tile[field].as_str().expect(field).to_string())
        .collect()
}

fn tile_names(view: &Value) -> Vec<String> {
    tile_field(view, "name")
}

fn signed_in_admin() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    json(
        dir.path(),
        &["init", "--admin-name", "Ada Admin", "--admin-email", "ada@chamber.test"],
    );
    let login = json(dir.path(), &["session", "login", "--email", "ada@chamber.test"]);
    let set_cookie = login["set_cookie"].as_str().expect("set_cookie");
    assert!(set_cookie.starts_with("chamber_session="), "{set_cookie}");
    assert!(set_cookie.contains("HttpOnly"), "{set_cookie}");
    dir
}

#[test]
fn anonymous_viewer_is_asked_to_sign_in() {
    let dir = TempDir::new().expect("tempdir");
    let whoami = json(dir.path(), &["session", "whoami"]);
    assert_eq!(whoami["viewer"]["kind"], "anonymous");
    assert_eq!(whoami["enquire_action"], "Sign in to enquire");
}

#[test]
fn admin_only_commands_reject_anonymous_viewers() {
    let dir = TempDir::new().expect("tempdir");
    let output = chamber(dir.path(), &["category", "create", "--name", "Retail"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("chamber error (401)"), "{stderr}");
}

#[test]
fn second_admin_bootstrap_is_forbidden() {
    let dir = TempDir::new().expect("tempdir");
    json(
        dir.path(),
        &["init", "--admin-name", "Ada Admin", "--admin-email", "ada@chamber.test"],
    );
    let output = chamber(
        dir.path(),
        &["init", "--admin-name", "Eve", "--admin-email", "eve@chamber.test"],
    );
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn category_grid_leads_with_all_tile() {
    let dir = signed_in_admin();
    let created = json(dir.path(), &["category", "create", "--name", "Retail"]);
    assert_eq!(created["category"]["slug"], "retail");
    assert_eq!(created["href"], "/directory/retail");

    let grid = json(dir.path(), &["directory", "categories"]);
    assert_eq!(grid["view"]["kind"], "grid");
    assert_eq!(tile_names(&grid["view"]), vec!["All", "Retail"]);
    assert_eq!(tile_field(&grid["view"], "href"), vec!["/directory", "/directory/retail"]);
}

#[test]
fn unknown_category_is_not_found() {
    let dir = signed_in_admin();
    let output = chamber(dir.path(), &["directory", "types", "nowhere"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("(404)"));
}

#[test]
fn business_appears_in_directory_once_verified() {
    let dir = signed_in_admin();
    json(dir.path(), &["category", "create", "--name", "Retail"]);
    let created = json(
        dir.path(),
        &["type", "create", "--category", "retail", "--name", "Clothing"],
    );
    assert_eq!(created["href"], "/directory/retail/clothing");

    let types = json(dir.path(), &["directory", "types", "retail"]);
    assert_eq!(tile_names(&types["view"]), vec!["Clothing"]);
    assert_eq!(tile_field(&types["view"], "href"), vec!["/directory/retail/clothing"]);

    json(
        dir.path(),
        &["business", "create", "--name", "Acme Mart", "--type", "retail/clothing"],
    );

    let hidden = json(dir.path(), &["directory", "businesses", "--category", "retail"]);
    assert_eq!(hidden["view"]["kind"], "empty");
    assert_eq!(hidden["view"]["message"], "No businesses found");

    let verified = json(dir.path(), &["business", "verify", "acme_mart"]);
    assert_eq!(verified["business"]["verified"], true);

    let shown = json(
        dir.path(),
        &["directory", "businesses", "--category", "retail", "--query", "acme"],
    );
    assert_eq!(tile_names(&shown["view"]), vec!["Acme Mart"]);
    let business_id = verified["business"]["id"].as_str().expect("id");
    assert_eq!(tile_field(&shown["view"], "href"), vec![format!("/business/{business_id}")]);
    assert_eq!(shown["visible"], 1);
}
