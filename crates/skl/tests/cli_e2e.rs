#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// `skl` against `temp/data`, isolated from the caller's environment.
fn skl(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("skl"));
    cmd.arg("--data")
        .arg(temp.path().join("data"))
        .arg("--no-color")
        .env_remove("SKL_DATA")
        .env_remove("SKL_SLOT")
        .env_remove("SKL_LOG")
        .env_remove("GEMINI_API_KEY")
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("config"));
    cmd
}

/// Starts a fresh form, fills both names and saves it as a new record.
fn fill_and_save(temp: &TempDir, baby: &str, mother: &str) {
    skl(temp).args(["new", "--yes"]).assert().success();
    skl(temp)
        .args(["set", &format!("babyName={}", baby), &format!("motherName={}", mother)])
        .assert()
        .success();
    skl(temp).arg("save").assert().success();
}

#[test]
fn test_fill_save_and_list() {
    let temp = TempDir::new().unwrap();

    skl(&temp)
        .args(["set", "babyName=Aisyah", "motherName=Siti", "gender=P", "weight=3200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nama Bayi: Aisyah"));

    skl(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sedang diisi"));

    skl(&temp)
        .arg("save")
        .assert()
        .success()
        .stdout(predicate::str::contains("Data tersimpan: Aisyah"));

    skl(&temp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tersimpan"));

    skl(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aisyah").and(predicate::str::contains("Siti")));

    let stored = fs::read_to_string(temp.path().join("data").join("skl_database.json")).unwrap();
    assert!(stored.contains("\"babyName\""));
    assert!(stored.contains("Perempuan"));
}

#[test]
fn test_saving_again_updates_in_place() {
    let temp = TempDir::new().unwrap();
    fill_and_save(&temp, "Aisyah", "Siti");

    skl(&temp).args(["set", "weight=3300"]).assert().success();
    skl(&temp)
        .arg("save")
        .assert()
        .success()
        .stdout(predicate::str::contains("Data diperbarui: Aisyah"));

    let stored = fs::read_to_string(temp.path().join("data").join("skl_database.json")).unwrap();
    assert_eq!(stored.matches("\"babyName\"").count(), 1);
}

#[test]
fn test_save_without_names_fails() {
    let temp = TempDir::new().unwrap();

    skl(&temp).args(["set", "weight=3200"]).assert().success();
    skl(&temp)
        .arg("save")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Isi minimal nama bayi atau nama ibu"));

    assert!(!temp.path().join("data").join("skl_database.json").exists());
}

#[test]
fn test_invalid_value_is_rejected() {
    let temp = TempDir::new().unwrap();

    skl(&temp)
        .args(["set", "babyName=Aisyah", "gender=robot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("gender"));

    skl(&temp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Formulir kosong"));
}

#[test]
fn test_delete_needs_confirmation() {
    let temp = TempDir::new().unwrap();
    fill_and_save(&temp, "Aisyah", "Siti");

    // No terminal: the question is answered with no.
    skl(&temp)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dibatalkan"));

    skl(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aisyah"));

    skl(&temp)
        .args(["delete", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Data dihapus: Aisyah"))
        .stdout(predicate::str::contains("Formulir dikosongkan"));

    skl(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Belum ada data tersimpan"));

    let stored = fs::read_to_string(temp.path().join("data").join("skl_database.json")).unwrap();
    assert_eq!(stored.trim(), "[]");
}

#[test]
fn test_unknown_selector_is_a_warning() {
    let temp = TempDir::new().unwrap();
    fill_and_save(&temp, "Aisyah", "Siti");

    skl(&temp)
        .args(["edit", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Data #9 tidak ditemukan"));

    skl(&temp)
        .args(["delete", "ghost", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Data ghost tidak ditemukan"));
}

#[test]
fn test_edit_loads_a_saved_record() {
    let temp = TempDir::new().unwrap();
    fill_and_save(&temp, "Aisyah", "Siti");
    fill_and_save(&temp, "Budi", "Rina");

    skl(&temp)
        .args(["new", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Formulir baru"));

    // Newest first: Budi is 1, Aisyah is 2.
    skl(&temp)
        .args(["edit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mengedit: Aisyah"));

    skl(&temp)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("AISYAH"));
}

#[test]
fn test_new_with_unsaved_edits_asks_first() {
    let temp = TempDir::new().unwrap();
    skl(&temp).args(["set", "babyName=Aisyah"]).assert().success();

    skl(&temp)
        .arg("new")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dibatalkan"));

    skl(&temp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aisyah"));
}

#[test]
fn test_show_blank_certificate() {
    let temp = TempDir::new().unwrap();

    skl(&temp)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("SURAT KETERANGAN LAHIR"))
        .stdout(predicate::str::contains("................................"));
}

#[test]
fn test_print_writes_html() {
    let temp = TempDir::new().unwrap();
    fill_and_save(&temp, "Aisyah", "Siti");
    let out = temp.path().join("skl.html");

    skl(&temp)
        .args(["print", "1", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Halaman cetak disimpan"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("SURAT KETERANGAN LAHIR"));
    assert!(html.contains("AISYAH"));
    assert!(html.contains("JEMPOL KIRI IBU"));
}

#[test]
fn test_print_to_stdout_scaled() {
    let temp = TempDir::new().unwrap();

    skl(&temp)
        .args(["print", "--fit", "414"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scale(0.4962)"));
}

#[test]
fn test_assistant_roster() {
    let temp = TempDir::new().unwrap();

    skl(&temp)
        .arg("assistant")
        .assert()
        .success()
        .stdout(predicate::str::contains("TITIEK FATHICHA"));

    skl(&temp)
        .args(["assistant", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Penolong: TITIEK FATHICHA"));

    skl(&temp)
        .args(["assistant", "99"])
        .assert()
        .failure();
}

#[test]
fn test_assist_without_key_fails() {
    let temp = TempDir::new().unwrap();

    skl(&temp)
        .args(["assist", "bayi", "perempuan", "berat", "3200"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn test_corrupt_store_is_kept_aside() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("skl_database.json"), "{ not json").unwrap();

    skl(&temp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("tidak bisa dibaca"));

    assert_eq!(
        fs::read_to_string(data.join("skl_database.corrupt.json")).unwrap(),
        "{ not json"
    );
}

#[test]
fn test_config_file_changes_slot() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("skl.toml"), "slot = \"lab_records\"\n").unwrap();

    fill_and_save(&temp, "Aisyah", "Siti");
    assert!(data.join("lab_records.json").exists());

    skl(&temp)
        .arg("paths")
        .assert()
        .success()
        .stdout(predicate::str::contains("lab_records.json"));

    skl(&temp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("lab_records"));
}

#[test]
fn test_config_template() {
    let temp = TempDir::new().unwrap();

    skl(&temp)
        .args(["config", "--template"])
        .assert()
        .success()
        .stdout(predicate::str::contains("slot"));
}

#[test]
fn test_numeric_record_ids_are_identifiers() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(
        data.join("skl_database.json"),
        r#"[{"id":"1712345678901","babyName":"Aisyah","motherName":"Siti"}]"#,
    )
    .unwrap();

    skl(&temp)
        .args(["edit", "1712345678901"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mengedit: Aisyah"));

    skl(&temp)
        .args(["delete", "1712345678901", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Data dihapus: Aisyah"));
}
