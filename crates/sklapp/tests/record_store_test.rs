use sklapp::api::SklApi;
use sklapp::model::Record;
use sklapp::roster::default_roster;
use sklapp::store::fs_backend::FsBackend;
use sklapp::store::{LoadStatus, DEFAULT_SLOT};
use std::fs;
use tempfile::TempDir;

fn open(dir: &TempDir) -> SklApi<FsBackend> {
    SklApi::open(FsBackend::new(dir.path()), DEFAULT_SLOT, default_roster())
}

fn persisted(dir: &TempDir) -> Vec<Record> {
    let raw = fs::read_to_string(dir.path().join("skl_database.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let mut api = open(&dir);
        api.set_fields(&["babyName=Aisyah", "motherName=Siti", "weight=3200"])
            .unwrap();
        api.save().unwrap();
        api.new_document().unwrap();
        api.set_fields(&["babyName=Budi", "gender=L"]).unwrap();
        api.save().unwrap();
    }

    let api = open(&dir);
    assert_eq!(api.load_status(), &LoadStatus::Loaded { count: 2, repaired: 0 });
    let names: Vec<_> = api.records().iter().map(|r| r.baby_name.as_str()).collect();
    assert_eq!(names, vec!["Budi", "Aisyah"]);
    assert_eq!(api.records()[1].weight, "3200");
}

#[test]
fn test_persisted_json_uses_camel_case_keys() {
    let dir = TempDir::new().unwrap();
    let mut api = open(&dir);
    api.set_fields(&["babyName=Aisyah", "birthType=Tunggal"]).unwrap();
    api.save().unwrap();

    let raw = fs::read_to_string(dir.path().join("skl_database.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = &value[0];
    assert_eq!(entry["babyName"], "Aisyah");
    assert_eq!(entry["birthType"], "Tunggal");
    assert_eq!(entry["gender"], "");
    assert!(entry["id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[test]
fn test_corrupt_file_is_kept_until_first_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("skl_database.json");
    fs::write(&path, "{ definitely not a list").unwrap();

    let mut api = open(&dir);
    assert!(api.records().is_empty());
    assert!(matches!(api.load_status(), LoadStatus::Recovered { .. }));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "{ definitely not a list"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("skl_database.corrupt.json")).unwrap(),
        "{ definitely not a list"
    );

    api.set_fields(&["motherName=Siti"]).unwrap();
    api.save().unwrap();
    assert_eq!(persisted(&dir).len(), 1);
}

#[test]
fn test_unknown_enum_label_does_not_break_load() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("skl_database.json"),
        r#"[{"id":"x1","babyName":"A","gender":"Unknown"},{"id":"x2","babyName":"B"}]"#,
    )
    .unwrap();

    let api = open(&dir);
    assert_eq!(api.records().len(), 2);
    assert_eq!(api.records()[0].gender.label(), "");
}

#[test]
fn test_deleting_everything_leaves_empty_array() {
    let dir = TempDir::new().unwrap();
    let mut api = open(&dir);
    api.set_fields(&["babyName=A"]).unwrap();
    api.save().unwrap();
    api.delete("1").unwrap();

    assert!(persisted(&dir).is_empty());
    let reopened = open(&dir);
    assert!(reopened.records().is_empty());
}
