use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use tempfile::tempdir;

fn mvm(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mvm"));
    cmd.arg("--dir").arg(dir);
    cmd
}

fn write_file(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Serve exactly one canned HTTP response on a loopback port, reporting the
/// request line ("GET /1_8_9/minecraft.jar HTTP/1.1") back over a channel.
fn serve_once(
    status_line: &'static str,
    headers: &'static str,
    body: &'static [u8],
) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }

        let request_line = String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string();
        let _ = tx.send(request_line);

        let _ = stream.write_all(status_line.as_bytes());
        let _ = stream.write_all(headers.as_bytes());
        let _ = stream.write_all(b"\r\n");
        let _ = stream.write_all(body);
        let _ = stream.flush();
    });

    (format!("http://{addr}"), rx)
}

// ============== list ==============

#[test]
fn list_reports_empty_cache() {
    let temp = tempdir().unwrap();

    mvm(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No versions installed."));
}

#[test]
fn list_prints_cached_versions_sorted() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("mvm_bins/1.8.9.jar"), b"a");
    write_file(&temp.path().join("mvm_bins/1.7.10.jar"), b"b");
    write_file(&temp.path().join("mvm_bins/notes.txt"), b"not a jar");

    let assert = mvm(temp.path()).arg("list").assert().success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let names: Vec<_> = stdout.lines().collect();
    assert_eq!(names, vec!["1.7.10", "1.8.9"]);
}

// ============== use ==============

#[test]
fn use_copies_cached_jar_into_bin() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("mvm_bins/1.8.9.jar"), b"jar bytes");

    mvm(temp.path())
        .arg("use")
        .arg("1.8.9")
        .assert()
        .success()
        .stdout(predicate::str::contains("Now using Minecraft 1.8.9"));

    assert_eq!(
        fs::read(temp.path().join("bin/minecraft.jar")).unwrap(),
        b"jar bytes"
    );
}

#[test]
fn use_twice_produces_same_active_jar() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("mvm_bins/1.8.9.jar"), b"jar bytes");

    mvm(temp.path()).arg("use").arg("1.8.9").assert().success();
    mvm(temp.path()).arg("use").arg("1.8.9").assert().success();

    assert_eq!(
        fs::read(temp.path().join("bin/minecraft.jar")).unwrap(),
        b"jar bytes"
    );
}

#[test]
fn use_unknown_version_fails_without_touching_slot() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("bin/minecraft.jar"), b"untouched");

    mvm(temp.path())
        .arg("use")
        .arg("nonexistent")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Minecraft nonexistent is not installed"));

    assert_eq!(
        fs::read(temp.path().join("bin/minecraft.jar")).unwrap(),
        b"untouched"
    );
}

// ============== stash ==============

#[test]
fn stash_saves_active_jar_under_name() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("bin/minecraft.jar"), b"modded jar");

    mvm(temp.path())
        .arg("stash")
        .arg("mymodpack")
        .assert()
        .success()
        .stdout(predicate::str::contains("stashed as mymodpack"))
        .stdout(predicate::str::contains("mvm use mymodpack"));

    assert_eq!(
        fs::read(temp.path().join("mvm_bins/mymodpack.jar")).unwrap(),
        b"modded jar"
    );
}

#[test]
fn stash_prompts_for_name_when_omitted() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("bin/minecraft.jar"), b"modded jar");

    mvm(temp.path())
        .arg("stash")
        .write_stdin("backup\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("stashed as backup"));

    assert_eq!(
        fs::read(temp.path().join("mvm_bins/backup.jar")).unwrap(),
        b"modded jar"
    );
}

#[test]
fn stash_without_active_jar_fails_and_creates_nothing() {
    let temp = tempdir().unwrap();

    mvm(temp.path())
        .arg("stash")
        .arg("mymod")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no active minecraft.jar"));

    assert!(!temp.path().join("mvm_bins/mymod.jar").exists());
}

#[test]
fn stash_rejects_empty_name_from_prompt() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("bin/minecraft.jar"), b"modded jar");

    mvm(temp.path())
        .arg("stash")
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("stash name cannot be empty"));
}

// ============== install ==============

#[test]
fn install_downloads_caches_and_activates() {
    let temp = tempdir().unwrap();
    let (host, request) = serve_once(
        "HTTP/1.1 200 OK\r\n",
        "Content-Length: 2\r\nConnection: close\r\n",
        &[0xAA, 0xBB],
    );

    mvm(temp.path())
        .arg("--host")
        .arg(&host)
        .arg("--quiet")
        .arg("install")
        .arg("1.8.9")
        .assert()
        .success()
        .stdout(predicate::str::contains("Now using Minecraft 1.8.9"));

    // The host routes on the version with dots replaced by underscores.
    let request_line = request.recv().unwrap();
    assert!(
        request_line.starts_with("GET /1_8_9/minecraft.jar"),
        "unexpected request: {request_line}"
    );

    assert_eq!(
        fs::read(temp.path().join("mvm_bins/1.8.9.jar")).unwrap(),
        vec![0xAA, 0xBB]
    );
    assert_eq!(
        fs::read(temp.path().join("bin/minecraft.jar")).unwrap(),
        vec![0xAA, 0xBB]
    );
}

#[test]
fn install_missing_version_leaves_cache_clean() {
    let temp = tempdir().unwrap();
    let (host, _request) = serve_once(
        "HTTP/1.1 404 Not Found\r\n",
        "Content-Length: 0\r\nConnection: close\r\n",
        b"",
    );

    mvm(temp.path())
        .arg("--host")
        .arg(&host)
        .arg("--quiet")
        .arg("install")
        .arg("1.4.7")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Minecraft 1.4.7 does not exist"));

    // No orphaned cache entry, not even an empty one.
    assert!(!temp.path().join("mvm_bins/1.4.7.jar").exists());
    assert!(!temp.path().join("bin/minecraft.jar").exists());
}

#[test]
fn install_surfaces_server_errors() {
    let temp = tempdir().unwrap();
    let (host, _request) = serve_once(
        "HTTP/1.1 500 Internal Server Error\r\n",
        "Content-Length: 0\r\nConnection: close\r\n",
        b"",
    );

    mvm(temp.path())
        .arg("--host")
        .arg(&host)
        .arg("--quiet")
        .arg("install")
        .arg("1.8.9")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP 500"));

    assert!(!temp.path().join("mvm_bins/1.8.9.jar").exists());
}

#[test]
fn install_replaces_previously_cached_jar() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("mvm_bins/1.8.9.jar"), b"stale");

    let (host, _request) = serve_once(
        "HTTP/1.1 200 OK\r\n",
        "Content-Length: 5\r\nConnection: close\r\n",
        b"fresh",
    );

    mvm(temp.path())
        .arg("--host")
        .arg(&host)
        .arg("--quiet")
        .arg("install")
        .arg("1.8.9")
        .assert()
        .success();

    assert_eq!(
        fs::read(temp.path().join("mvm_bins/1.8.9.jar")).unwrap(),
        b"fresh"
    );
}

// ============== configuration ==============

#[cfg(not(windows))]
#[test]
fn missing_home_is_a_configuration_error() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mvm"));
    cmd.env_remove("HOME")
        .env_remove("MVM_MINECRAFT_DIR")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HOME"));
}
