//! Integration tests for repo-tab
//!
//! Collaborators (enumerator, selector, multiplexer) are replaced by small
//! shell scripts in a temp directory, so neither fzf nor tmux is needed.
//! Every run points `REPO_TAB_CONFIG` at a missing file to stay clear of
//! the user's own configuration.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Write an executable `/bin/sh` script
fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Fake collaborators plus the files they leave behind
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn enumerator(&self, body: &str) -> PathBuf {
        script(self.dir.path(), "enumerate.sh", body)
    }

    /// Selector that records that it ran, then runs `body`
    fn selector(&self, body: &str) -> PathBuf {
        let ran = self.path("selector.ran");
        script(
            self.dir.path(),
            "select.sh",
            &format!("touch '{}'\n{}", ran.display(), body),
        )
    }

    /// Multiplexer that appends its arguments, one per line
    fn launcher(&self, exit: i32) -> PathBuf {
        let record = self.path("launcher.args");
        script(
            self.dir.path(),
            "mux.sh",
            &format!(
                "for a in \"$@\"; do printf '%s\\n' \"$a\"; done >> '{}'\nexit {}",
                record.display(),
                exit
            ),
        )
    }

    /// Enumerator that records its arguments, one per line, then lists `/a/b/c`
    fn recording_enumerator(&self) -> PathBuf {
        let record = self.path("enumerator.args");
        self.enumerator(&format!(
            "for a in \"$@\"; do printf '%s\\n' \"$a\"; done > '{}'\necho /a/b/c",
            record.display()
        ))
    }

    fn enumerator_args(&self) -> Vec<String> {
        std::fs::read_to_string(self.path("enumerator.args"))
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    fn selector_ran(&self) -> bool {
        self.path("selector.ran").exists()
    }

    fn launcher_args(&self) -> Option<Vec<String>> {
        std::fs::read_to_string(self.path("launcher.args"))
            .ok()
            .map(|s| s.lines().map(String::from).collect())
    }

    /// `repo-tab` wired to the fake collaborators
    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_repo-tab"));
        cmd.env("REPO_TAB_CONFIG", self.path("no-config.toml"))
            .env("REPO_TAB_ENUMERATOR", self.path("enumerate.sh"))
            .env("REPO_TAB_SELECTOR__PROGRAM", self.path("select.sh"))
            .env("REPO_TAB_LAUNCHER__PROGRAM", self.path("mux.sh"))
            .env_remove("RUST_LOG");
        cmd
    }

    fn run(&self, args: &[&str], extra_env: &[(&str, &str)]) -> Output {
        let mut cmd = self.command();
        cmd.args(args);
        for (key, value) in extra_env {
            cmd.env(key, value);
        }
        cmd.output().unwrap()
    }
}

#[test]
fn test_enumerator_failure_exits_1() {
    for status in [1, 2, 42] {
        let fx = Fixture::new();
        fx.enumerator(&format!("echo /a/b/c; exit {}", status));
        fx.selector("head -n 1");
        fx.launcher(0);

        let out = fx.run(&[], &[]);

        assert_eq!(out.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(stderr.contains("failed to list repositories"), "stderr: {}", stderr);
        assert!(!fx.selector_ran());
        assert_eq!(fx.launcher_args(), None);
    }
}

#[test]
fn test_aborted_selection_exits_0() {
    let fx = Fixture::new();
    fx.enumerator("printf '/a/b/c\\n/a/b/d\\n'");
    // fzf prints nothing and exits 130 when the user hits Esc
    fx.selector("cat > /dev/null\nexit 130");
    fx.launcher(0);

    let out = fx.run(&[], &[]);

    assert_eq!(out.status.code(), Some(0));
    assert!(fx.selector_ran());
    assert_eq!(fx.launcher_args(), None);
}

#[test]
fn test_pick_opens_tmux_window() {
    let fx = Fixture::new();
    fx.enumerator("printf '/a/b/c\\n/a/b/d\\n'");
    fx.selector("head -n 1");
    fx.launcher(0);

    let out = fx.run(&[], &[]);

    assert_eq!(out.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        fx.launcher_args().unwrap(),
        vec!["new-window", "-n", "b/c", "-c", "/a/b/c"]
    );
}

#[test]
fn test_trailing_slash_and_zellij_backend() {
    let fx = Fixture::new();
    fx.enumerator("echo /home/me/proj/repo/");
    fx.selector("cat");
    fx.launcher(0);

    let out = fx.run(&[], &[("REPO_TAB_LAUNCHER__BACKEND", "zellij")]);

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        fx.launcher_args().unwrap(),
        vec!["action", "new-tab", "--name", "p/repo", "--cwd", "/home/me/proj/repo"]
    );
}

#[test]
fn test_pick_opens_tmux_session() {
    let fx = Fixture::new();
    fx.enumerator("echo /srv/my.code/api.v2");
    fx.selector("cat");
    fx.launcher(0);

    let out = fx.run(&[], &[("REPO_TAB_LAUNCHER__PAGE", "session")]);

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        fx.launcher_args().unwrap(),
        vec![
            "new-session",
            "-d",
            "-s",
            "m/apiv2",
            "-n",
            "m/api.v2",
            "-c",
            "/srv/my.code/api.v2",
            "switch-client",
            "-t",
            "m/apiv2",
        ]
    );
}

#[test]
fn test_arguments_forwarded_untouched() {
    let cases: &[&[&str]] = &[
        &["work", "--help", "-v", "two words", "~/code"],
        &["--"],
        &["--", "x"],
        &["a", "--", "b"],
        &["--all"],
        &["--version"],
    ];

    for args in cases {
        let fx = Fixture::new();
        fx.recording_enumerator();
        fx.selector("cat > /dev/null");
        fx.launcher(0);

        let out = fx.run(args, &[]);

        assert_eq!(out.status.code(), Some(0), "args: {:?}", args);
        assert_eq!(fx.enumerator_args(), args.to_vec());
    }
}

#[test]
fn test_non_utf8_argument_forwarded() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let fx = Fixture::new();
    let record = fx.path("enumerator.bytes");
    fx.enumerator(&format!("printf '%s' \"$1\" > '{}'\necho /a/b/c", record.display()));
    fx.selector("cat > /dev/null");
    fx.launcher(0);

    let raw = OsStr::from_bytes(b"caf\xe9");
    let out = fx.command().arg(raw).output().unwrap();

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(std::fs::read(record).unwrap(), b"caf\xe9");
}

#[test]
fn test_launcher_exit_code_propagates() {
    let fx = Fixture::new();
    fx.enumerator("echo /a/b/c");
    fx.selector("head -n 1");
    fx.launcher(5);

    let out = fx.run(&[], &[]);

    assert_eq!(out.status.code(), Some(5));
    assert!(fx.launcher_args().is_some());
}

/// Build a project tree: trailing `/` makes a directory, anything else a file
fn project_tree(paths: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for path in paths {
        let full = dir.path().join(path.trim_end_matches('/'));
        if path.ends_with('/') {
            std::fs::create_dir_all(&full).unwrap();
        } else {
            std::fs::create_dir_all(full.parent().unwrap()).unwrap();
            std::fs::write(&full, "").unwrap();
        }
    }
    dir
}

fn repo_list(args: &[&str], config_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_repo-list"))
        .args(args)
        .env("REPO_TAB_CONFIG", config_dir.join("no-config.toml"))
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_repo_list_prints_projects() {
    let tree = project_tree(&["code/api/.git/", "code/tool/Cargo.toml", "code/scratch/"]);
    let root = tree.path().to_string_lossy().into_owned();

    let out = repo_list(&[&root], tree.path());

    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let expected: Vec<String> = ["", "/code", "/code/api", "/code/tool"]
        .iter()
        .map(|suffix| format!("{}{}", root, suffix))
        .collect();
    assert_eq!(stdout.lines().collect::<Vec<_>>(), expected);
}

#[test]
fn test_repo_list_is_repeatable() {
    let tree = project_tree(&["b/.git/", "a/x/.git/", "c/Cargo.toml"]);
    let root = tree.path().to_string_lossy().into_owned();

    let first = repo_list(&[&root], tree.path());
    let second = repo_list(&[&root], tree.path());

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_repo_list_missing_root_fails() {
    let tree = TempDir::new().unwrap();
    let missing = tree.path().join("missing").to_string_lossy().into_owned();

    let out = repo_list(&[&missing], tree.path());

    assert!(!out.status.success());
}
