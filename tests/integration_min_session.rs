// Drives the compiled binary through a PTY: setup, one short turn, quit.
// Needs a pseudo terminal, so it is Unix-only and ignored by default.
// Run manually via: `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_turn_completes_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let history = dir.path().join("history.json");

    let bin = assert_cmd::cargo::cargo_bin("charades");
    let cmd = format!(
        "{} --time 1 --mode individual --mute --history-file {}",
        bin.display(),
        history.display()
    );

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(300));

    // setup → player entry
    p.send("\r")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("Tester\r")?;
    std::thread::sleep(Duration::from_millis(100));

    // got it, then let the one-second clock and the grace delay run out
    p.send(" ")?;
    std::thread::sleep(Duration::from_millis(2000));

    // quit from the results screen
    p.send("q")?;
    p.expect(Eof)?;

    let saved: Vec<String> = serde_json::from_slice(&std::fs::read(&history)?)?;
    assert_eq!(saved.len(), 1);
    Ok(())
}
