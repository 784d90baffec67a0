// Minimal integration test that drives the compiled binary through a PTY.
// Requires a TTY; run manually via:
// `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_session_completes_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("wordtype");
    let cmd = format!("{} -p hi", bin.display());

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(200));

    p.send("hi ")?;
    std::thread::sleep(Duration::from_millis(200));

    p.send("\x1b")?; // ESC
    p.expect(Eof)?;
    Ok(())
}

#[test]
fn rejects_non_tty_stdin() {
    assert_cmd::Command::cargo_bin("wordtype")
        .unwrap()
        .args(["-p", "hi"])
        .write_stdin("")
        .assert()
        .failure();
}
