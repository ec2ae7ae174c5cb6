//! End-to-end tests for the `render` command.

mod common;
use common::prelude::*;

#[test]
fn test_render_merges_dependencies() {
    let fixture = TestFixture::new()
        .with_project("busybox", manifests::BUSYBOX)
        .with_project("link", manifests::LINK);

    fixture
        .command()
        .args(["render", "busybox"])
        .assert()
        .success()
        .stdout(predicate::str::contains("busybox:"))
        .stdout(predicate::str::contains("\nlink:"))
        .stdout(predicate::str::contains("BAG8_LINKS: link"))
        .stdout(predicate::str::contains("DNSDOCK_ALIAS: busybox.docker"))
        .stdout(predicate::str::contains("DNSDOCK_ALIAS: link.example.org"))
        .stdout(predicate::str::contains("DUMMY: nothing here"))
        .stdout(predicate::str::contains("dev_environment").not());
}

#[test]
fn test_render_develop_mode() {
    let fixture = TestFixture::new()
        .with_project("busybox", manifests::BUSYBOX)
        .with_project("link", manifests::LINK);

    fixture
        .command()
        .args(["render", "busybox", "--develop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DUMMY: yo"))
        .stdout(predicate::str::contains("command: sleep 3600"));
}

#[test]
fn test_render_internal_links_are_not_dependencies() {
    let fixture = TestFixture::new().with_project("withdb", manifests::WITH_DB);

    fixture
        .command()
        .args(["render", "withdb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("withdb:"))
        .stdout(predicate::str::contains("\ndb:"))
        .stdout(predicate::str::contains("DNSDOCK_ALIAS: db.docker"));
}

#[test]
fn test_render_attaches_dockerfile_build() {
    let fixture = TestFixture::new()
        .with_project("link", manifests::LINK)
        .with_dockerfile("link");

    fixture
        .command()
        .args(["render", "link"])
        .assert()
        .success()
        .stdout(predicate::str::contains("build:"))
        .stdout(predicate::str::contains("dockerfile: Dockerfile"));
}

#[test]
fn test_render_to_output_file() {
    let fixture = TestFixture::new().with_project("link", manifests::LINK);
    let output = fixture.path().join("out.yml");

    fixture
        .command()
        .args(["render", "link", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("link.yml was generated here"));

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.contains("image: bag8/link"));
}

#[test]
fn test_render_defaults_to_current_directory_name() {
    let fixture = TestFixture::new().with_project("link", manifests::LINK);

    fixture
        .command()
        .current_dir(fixture.projects_dir().join("link"))
        .arg("render")
        .assert()
        .success()
        .stdout(predicate::str::contains("image: bag8/link"));
}

#[test]
fn test_render_missing_dependency() {
    let fixture = TestFixture::new().with_project("busybox", manifests::BUSYBOX);

    fixture
        .command()
        .args(["render", "busybox"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project not found: link"));

    fixture
        .command()
        .args(["render", "busybox", "--best-effort"])
        .assert()
        .success()
        .stdout(predicate::str::contains("busybox:"))
        .stdout(predicate::str::contains("\nlink:").not());
}

#[test]
fn test_render_services() {
    TestFixture::new()
        .with_project("busybox", manifests::BUSYBOX)
        .with_project("link", manifests::LINK)
        .command()
        .args(["render", "busybox", "--services"])
        .assert()
        .success()
        .stdout("busybox  busybox\nlink  link\n");
}

#[test]
fn test_render_resolves_merge_keys() {
    let web = r#"
base: &base
  image: py
  dev_command: sh
  environment:
    A: one
app:
  <<: *base
  command: serve
"#;
    TestFixture::new()
        .with_project("web", web)
        .command()
        .args(["render", "web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("image: py"))
        .stdout(predicate::str::contains("A: one"))
        .stdout(predicate::str::contains("<<").not())
        .stdout(predicate::str::contains("dev_command").not());
}
