//! End-to-end tests for the gaffer binary against a local knowledge base.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const KB: &str = r#"[
    {"club_name": "FC Bayern Munich", "city_name": "Munich", "manager_name": "Vincent Kompany",
     "manager_content": "Vincent Kompany is a Belgian football manager.",
     "manager_wikipedia_url": "https://en.wikipedia.org/wiki/Vincent_Kompany"},
    {"club_name": "Bayer 04 Leverkusen", "city_name": "Leverkusen", "manager_name": "Kasper Hjulmand"},
    {"club_name": "Hamburger SV", "city_name": "Hamburg"}
]"#;

fn kb_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(KB.as_bytes()).unwrap();
    file
}

fn gaffer(kb: &NamedTempFile) -> Command {
    let mut cmd = Command::cargo_bin("gaffer").unwrap();
    cmd.env_remove("RUST_LOG").arg("--kb-file").arg(kb.path());
    cmd
}

#[test]
fn ask_answers_with_manager() {
    let kb = kb_file();
    gaffer(&kb)
        .args(["ask", "Who", "is", "coaching", "Munich?"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Vincent Kompany is currently coaching FC Bayern Munich.",
        ))
        .stdout(predicate::str::contains("Background: Vincent Kompany is a Belgian"));
}

#[test]
fn ask_debug_shows_article_urls() {
    let kb = kb_file();
    gaffer(&kb)
        .args(["ask", "--debug", "who is coaching munich"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved: FC Bayern Munich"))
        .stdout(predicate::str::contains(
            "https://en.wikipedia.org/wiki/Vincent_Kompany",
        ));
}

#[test]
fn ask_tolerates_trailing_typo() {
    let kb = kb_file();
    gaffer(&kb)
        .args(["ask", "who coaches leverkusenn"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kasper Hjulmand"));
}

#[test]
fn ask_json_emits_prompt_package() {
    let kb = kb_file();
    let output = gaffer(&kb)
        .args(["ask", "--json", "what is the weather like today"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let context = value["context"].as_object().unwrap();
    assert_eq!(context.len(), 1);
    assert_eq!(context["error"], "No club or manager information found");
}

#[test]
fn club_without_manager_is_reported() {
    let kb = kb_file();
    gaffer(&kb)
        .args(["ask", "who coaches hamburg"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "I couldn't identify a specific Bundesliga club",
        ));
}

#[test]
fn extract_lists_city_match() {
    let kb = kb_file();
    let output = gaffer(&kb)
        .args(["extract", "--json", "who is coaching munich"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let matches: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let city = matches
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["label"] == "CITIES")
        .expect("city match");
    assert_eq!(city["text"], "munich");
    assert_eq!(city["start"], 16);
    assert_eq!(city["end"], 22);
}

#[test]
fn chat_reads_until_quit() {
    let kb = kb_file();
    gaffer(&kb)
        .arg("chat")
        .write_stdin("who coaches munich\n/debug\n/nope\n/quit\nnever asked\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vincent Kompany is currently coaching"))
        .stdout(predicate::str::contains("Debug mode ON"))
        .stdout(predicate::str::contains("unknown command /nope"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn eval_reports_accuracy_and_failures() {
    let kb = kb_file();
    let mut dataset = NamedTempFile::new().unwrap();
    dataset
        .write_all(
            br#"[
            {"question": "Who coaches Munich?", "managerLabel": "Vincent Kompany", "type": "simple"},
            {"question": "Who coaches Leverkusenn?", "managerLabel": "Kasper Hjulmand", "type": "spelling_error"},
            {"question": "Who coaches Hamburg?", "managerLabel": "Merlin Polzin", "type": "spelling_error"}
        ]"#,
        )
        .unwrap();
    let failures = NamedTempFile::new().unwrap();

    gaffer(&kb)
        .args(["eval", "--type", "spelling_error", "--dataset"])
        .arg(dataset.path())
        .arg("--failures")
        .arg(failures.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total queries:     2"))
        .stdout(predicate::str::contains("Correct responses: 1"));

    let written = std::fs::read_to_string(failures.path()).unwrap();
    let lines: Vec<_> = written.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "id,question,expected,response,type");
    assert!(lines[1].starts_with("2,Who coaches Hamburg?,Merlin Polzin,"), "{}", lines[1]);
}

#[test]
fn config_prints_defaults() {
    let mut cfg = NamedTempFile::new().unwrap();
    writeln!(cfg, "[matcher]\nthreshold = 85").unwrap();
    Command::cargo_bin("gaffer")
        .unwrap()
        .arg("--config")
        .arg(cfg.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("threshold = 85"))
        .stdout(predicate::str::contains("max_background_chars = 400"));
}

#[test]
fn invalid_config_fails() {
    let mut cfg = NamedTempFile::new().unwrap();
    writeln!(cfg, "[wikidata]\ntimeout_secs = 0").unwrap();
    Command::cargo_bin("gaffer")
        .unwrap()
        .arg("--config")
        .arg(cfg.path())
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout_secs"));
}

#[test]
fn missing_kb_file_fails() {
    Command::cargo_bin("gaffer")
        .unwrap()
        .args(["--kb-file", "/nonexistent/clubs.json", "ask", "munich"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}
