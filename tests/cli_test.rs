// CLI behaviour against a local JSON sheet in a scratch directory

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn talent_map(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("talent-map").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env("TALENT_MAP__OBSERVABILITY__LOG_LEVEL", "warn");
    cmd
}

fn seed_sheet(dir: &TempDir) {
    let sheet = json!({
        "header": ["Archivo", "Clasificación", "Comentarios", "Fecha", "Proceso", "CV_Link", "Estado_Pipeline", "Entrevistas"],
        "rows": [
            ["cv_1.pdf", "🌟 Óptimo", "Strong systems background", "2024-03-01", "Eng", "https://cv/1", "📥 Nuevo", ""],
            ["cv_2.pdf", "✅ Adecuado", "", "2024-02-01", "Eng", "#", "", ""],
            ["cv_3.pdf", "🌟 Óptimo", "", "2024-02-01", "Sales", "", "📥 Nuevo", ""]
        ]
    });
    std::fs::write(
        dir.path().join(".talent-map/records.json"),
        serde_json::to_string_pretty(&sheet).unwrap(),
    )
    .unwrap();
}

#[test]
fn no_subcommand_shows_getting_started() {
    let dir = TempDir::new().unwrap();
    talent_map(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("To get started:"))
        .stdout(predicate::str::contains("talent-map processes"));
}

#[test]
fn help_lists_board_commands() {
    let dir = TempDir::new().unwrap();
    talent_map(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("board"))
        .stdout(predicate::str::contains("advance"))
        .stdout(predicate::str::contains("attach"));
}

#[test]
fn init_then_board_and_advance() {
    let dir = TempDir::new().unwrap();
    talent_map(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created local sheet"));
    assert!(dir.path().join("talent-map.toml").exists());

    seed_sheet(&dir);

    talent_map(&dir)
        .arg("processes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Eng"))
        .stdout(predicate::str::contains("Sales"));

    talent_map(&dir)
        .args(["board", "--process", "Eng"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cv_1.pdf"))
        .stdout(predicate::str::contains("cv_2.pdf"))
        .stdout(predicate::str::contains("cv_3.pdf").not());

    talent_map(&dir)
        .args(["advance", "cv_1.pdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("👀 En Revisión"));

    talent_map(&dir)
        .args(["board", "--process", "Eng", "--stage", "in-review"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cv_1.pdf"));
}

#[test]
fn attach_refuses_non_pdf_and_gated_stage() {
    let dir = TempDir::new().unwrap();
    talent_map(&dir).arg("init").assert().success();
    seed_sheet(&dir);

    std::fs::write(dir.path().join("notes.txt"), "hi").unwrap();
    talent_map(&dir)
        .args(["attach", "cv_1.pdf", "notes.txt", "--stage", "interviewed"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Only PDF"));

    std::fs::write(dir.path().join("r1.pdf"), "%PDF-1.4").unwrap();
    talent_map(&dir)
        .args(["attach", "cv_1.pdf", "r1.pdf", "--stage", "in-review"])
        .assert()
        .success()
        .stdout(predicate::str::contains("interview boards"));

    talent_map(&dir)
        .args(["attach", "cv_1.pdf", "r1.pdf", "--stage", "interviewed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("uploaded for cv_1.pdf"));

    talent_map(&dir)
        .args(["interviews", "cv_1.pdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("r1.pdf"));
}
