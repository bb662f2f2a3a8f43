use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use study_tracker::{
    ExamResult, Goals, JsonFileStore, Module, PersistenceError, Program, ProgramStore, Semester,
    load_program_from_json, program_from_json_str, program_to_json_string, save_program_to_json,
};
use tempfile::{NamedTempFile, tempdir};

fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn build_sample_program() -> Program {
    let first = Semester::new(
        1,
        vec![
            Module::new(
                "Analysis",
                5,
                ExamResult::new("Klausur").with_grade(2.3).with_recognized(false),
            ),
            Module::new(
                "Recht",
                3,
                ExamResult::new("Hausarbeit").with_recognized(true),
            ),
        ],
    );
    let second = Semester::new(
        2,
        vec![Module::new(
            "Übersetzerbau",
            6,
            ExamResult::new("Mündliche Prüfung").with_recognized(false),
        )],
    );
    Program::new(
        "Wirtschaftsinformatik",
        dt(2024, 10, 1),
        vec![first, second],
        Goals::new(1825, 2.0),
    )
}

const FULL_DOCUMENT: &str = r#"{
    "titel": "Informatik B.Sc.",
    "start_datum": "2024-10-01T00:00:00",
    "ziele": {
        "zeit_tage": 2190,
        "noten_schnitt": 2.5
    },
    "semester": [
        {
            "nummer": 1,
            "module": [
                {
                    "titel": "Analysis",
                    "ects": 5,
                    "note": 2.3,
                    "anerkannt": false,
                    "pruefungsleistung": "Klausur"
                },
                {
                    "titel": "Recht",
                    "ects": 3,
                    "note": null,
                    "anerkannt": true,
                    "pruefungsleistung": "Hausarbeit"
                }
            ]
        }
    ]
}"#;

#[test]
fn complete_document_is_written_back_unchanged() {
    let program = program_from_json_str(FULL_DOCUMENT).unwrap();
    let written = program_to_json_string(&program).unwrap();

    let original: Value = serde_json::from_str(FULL_DOCUMENT).unwrap();
    let reread: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(original, reread);
    assert_eq!(written, FULL_DOCUMENT);
}

#[test]
fn save_and_load_json_round_trip() {
    let program = build_sample_program();
    let tmp = NamedTempFile::new().unwrap();

    save_program_to_json(&program, tmp.path()).unwrap();
    let loaded = load_program_from_json(tmp.path()).unwrap();

    assert_eq!(loaded, program);
}

#[test]
fn output_uses_four_space_indent_and_raw_utf8() {
    let written = program_to_json_string(&build_sample_program()).unwrap();

    assert!(written.starts_with("{\n    \"titel\": \"Wirtschaftsinformatik\""));
    assert!(written.contains("\"Übersetzerbau\""));
    assert!(written.contains("\"Mündliche Prüfung\""));
    assert!(!written.contains("\\u"));
    assert!(written.contains("\"start_datum\": \"2024-10-01T00:00:00\""));
}

#[test]
fn sub_second_start_date_is_written_with_microseconds() {
    let start = NaiveDate::from_ymd_opt(2024, 10, 1)
        .unwrap()
        .and_hms_milli_opt(9, 5, 0, 250)
        .unwrap();
    let program = Program::new("Mit Bruchteil", start, Vec::new(), Goals::default());

    let written = program_to_json_string(&program).unwrap();
    assert!(written.contains("\"start_datum\": \"2024-10-01T09:05:00.250000\""));
    assert_eq!(program_from_json_str(&written).unwrap().start_date, start);
}

#[test]
fn start_date_with_utc_offset_is_read_as_wall_clock_time() {
    let input = r#"{"titel": "x", "start_datum": "2024-10-01T09:05:00+02:00", "semester": []}"#;
    let program = program_from_json_str(input).unwrap();
    assert_eq!(
        program.start_date,
        NaiveDate::from_ymd_opt(2024, 10, 1)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap()
    );
}

#[test]
fn missing_goals_fall_back_to_defaults() {
    let input = r#"{
        "titel": "Ohne Ziele",
        "start_datum": "2024-04-01T00:00:00",
        "semester": []
    }"#;
    let program = program_from_json_str(input).unwrap();

    assert_eq!(program.goals, Goals::new(2190, 2.5));
    assert!(program.semesters.is_empty());
}

#[test]
fn missing_recognition_flag_reads_as_not_recognized() {
    let input = r#"{
        "titel": "Alt",
        "start_datum": "2022-10-01 08:30:00",
        "ziele": {"zeit_tage": 1000, "noten_schnitt": 1.9},
        "semester": [
            {"nummer": 3, "module": [
                {"titel": "Datenbanken", "ects": 5, "pruefungsleistung": "Klausur"},
                {"titel": "Netze", "ects": 5, "note": 1.3, "anerkannt": null, "pruefungsleistung": "Klausur"}
            ]}
        ]
    }"#;
    let program = program_from_json_str(input).unwrap();

    let modules = &program.semesters[0].modules;
    assert_eq!(modules[0].exam.recognized, Some(false));
    assert_eq!(modules[0].exam.grade, None);
    assert_eq!(modules[1].exam.recognized, Some(false));
    assert_eq!(modules[1].exam.grade, Some(1.3));
    assert_eq!(
        program.start_date,
        NaiveDate::from_ymd_opt(2022, 10, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap()
    );

    let reread = program_from_json_str(&program_to_json_string(&program).unwrap()).unwrap();
    assert_eq!(reread, program);
}

#[test]
fn unknown_recognition_is_written_as_null() {
    let program = Program::new(
        "Frisch importiert",
        dt(2025, 4, 1),
        vec![Semester::new(
            1,
            vec![Module::new("Einführung", 5, ExamResult::new("Klausur"))],
        )],
        Goals::zeroed(),
    );
    let written: Value =
        serde_json::from_str(&program_to_json_string(&program).unwrap()).unwrap();
    let module = &written["semester"][0]["module"][0];

    assert_eq!(module["anerkannt"], Value::Null);
    assert_eq!(module["note"], Value::Null);
    assert_eq!(written["ziele"]["zeit_tage"], 0);
}

#[test]
fn malformed_document_is_a_serialization_error() {
    let err = program_from_json_str("{\"titel\": 42}").unwrap_err();
    assert!(matches!(err, PersistenceError::Serialization(_)));

    let err = program_from_json_str(
        r#"{"titel": "x", "start_datum": "01.10.2024", "semester": []}"#,
    )
    .unwrap_err();
    assert!(matches!(err, PersistenceError::Serialization(_)));
}

#[test]
fn json_file_store_treats_missing_file_as_empty() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("studiengang.json"));

    assert!(store.load().unwrap().is_none());

    let program = build_sample_program();
    store.save(&program).unwrap();
    assert!(store.path().exists());
    assert_eq!(store.load().unwrap(), Some(program));
}

#[test]
fn loading_a_missing_file_directly_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = load_program_from_json(dir.path().join("fehlt.json")).unwrap_err();
    assert!(matches!(err, PersistenceError::Io(_)));
}
