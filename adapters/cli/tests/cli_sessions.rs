use std::{
    fs,
    path::PathBuf,
    process::{Command, Output},
};

fn letter_siege(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_letter-siege"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run the letter-siege binary")
}

fn summaries(output: &Output) -> Vec<String> {
    assert!(output.status.success(), "letter-siege exited with {}", output.status);
    let stdout = String::from_utf8(output.stdout.clone()).expect("utf-8 output");
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("Welcome to Letter Siege."));
    lines.map(str::to_owned).collect()
}

fn tuning_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("letter-siege-{}-{name}.toml", std::process::id()));
    fs::write(&path, contents).expect("write tuning file");
    path
}

const SHORT_SESSION: [&str; 8] = [
    "--waves",
    "5",
    "--wave-size",
    "4",
    "--seed",
    "7",
    "--wave-seconds",
    "3",
];

#[test]
fn fifth_wave_is_a_boss_fight() {
    let lines = summaries(&letter_siege(&SHORT_SESSION));

    assert_eq!(lines.len(), 5);
    for (index, line) in lines.iter().enumerate() {
        assert!(line.starts_with(&format!("wave {:>2}: ", index + 1)), "{line}");
    }
    for line in &lines[..4] {
        let letters = line
            .split("letters ")
            .nth(1)
            .and_then(|rest| rest.split(' ').next())
            .expect("letter wave lists its letters");
        assert_eq!(letters.chars().count(), 4, "{line}");
        assert!(letters.chars().all(|c| c.is_ascii_uppercase()), "{line}");
        assert!(line.contains(" difficulty "), "{line}");
    }
    assert!(lines[4].starts_with("wave  5: boss C "), "{}", lines[4]);
    assert!(lines[4].contains("heavy telegraphs"), "{}", lines[4]);
}

#[test]
fn seeded_sessions_print_identical_summaries() {
    assert_eq!(
        summaries(&letter_siege(&SHORT_SESSION)),
        summaries(&letter_siege(&SHORT_SESSION))
    );
}

#[test]
fn tuning_file_sets_the_boss_cadence() {
    let path = tuning_file("cadence", "[session]\nwaves = 4\nboss_cadence = 2\nwave_seconds = 2.0\n");
    let config = path.to_str().expect("utf-8 path");
    let lines = summaries(&letter_siege(&["--config", config, "--seed", "3"]));
    let _ = fs::remove_file(&path);

    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains(": letters "), "{}", lines[0]);
    assert!(lines[1].starts_with("wave  2: boss C "), "{}", lines[1]);
    assert!(lines[2].contains(": letters "), "{}", lines[2]);
    assert!(lines[3].starts_with("wave  4: boss O "), "{}", lines[3]);
}

#[test]
fn unknown_tuning_keys_fail_the_run() {
    let path = tuning_file("unknown", "[session]\nspeed = 2\n");
    let config = path.to_str().expect("utf-8 path");
    let output = letter_siege(&["--config", config]);
    let _ = fs::remove_file(&path);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid tuning file"), "{stderr}");
}
