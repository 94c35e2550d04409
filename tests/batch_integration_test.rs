use pesel_etl::config::{DEFAULT_DATE_FORMAT, DEFAULT_OUTPUT_SUFFIX};
use pesel_etl::{BirthdayPipeline, CliConfig, EtlEngine, LocalStorage, OutputFormat, TomlConfig};
use tempfile::TempDir;

fn cli_config(files: Vec<String>, format: OutputFormat) -> CliConfig {
    CliConfig {
        files,
        date_format: DEFAULT_DATE_FORMAT.to_string(),
        format,
        suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
        verbose: false,
        monitor: false,
        json: false,
        log_json: false,
    }
}

#[tokio::test]
async fn test_end_to_end_batch_with_mixed_lines() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("people.txt");
    std::fs::write(
        &input,
        "19813012344\n78abc859694\n20022045678   \n49040501587\n99722984464\n",
    )
    .unwrap();

    let files = vec![input.to_string_lossy().into_owned()];
    let pipeline = BirthdayPipeline::new(
        LocalStorage::default(),
        cli_config(files.clone(), OutputFormat::Text),
    );
    let engine = EtlEngine::new(pipeline);

    let report = engine.run(&files).await.unwrap();

    assert_eq!(report.files_number, 1);
    assert_eq!(report.processed, 5);
    assert_eq!(report.valid, 3);
    assert_eq!(report.invalid, 2);
    assert!(report.failed_files.is_empty());

    let file_report = &report.files[0];
    let invalid: Vec<(usize, &str)> = file_report
        .invalid_lines
        .iter()
        .map(|l| (l.line_number, l.line.as_str()))
        .collect();
    assert_eq!(invalid, vec![(2, "78abc859694"), (4, "49040501587")]);
    let kinds: Vec<&str> = file_report
        .invalid_lines
        .iter()
        .map(|l| l.kind.as_str())
        .collect();
    assert_eq!(kinds, vec!["invalid_characters", "checksum_mismatch"]);

    let output = temp_dir.path().join("people-birthdays.txt");
    assert_eq!(file_report.output_path, output.to_string_lossy());
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "19813012344 : 30-01-1819\n20022045678 : 20-02-1920\n99722984464 : 29-12-2299\n"
    );

    assert_eq!(
        report.summary(),
        "Processed 1 file(s), 5 PESEL numbers (3 valid, 2 invalid)"
    );
    assert_eq!(
        report.invalid_messages()[1],
        format!("{}: invalid PESEL found at line 4: 49040501587", files[0])
    );
}

#[tokio::test]
async fn test_missing_file_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let present = temp_dir.path().join("a.txt");
    std::fs::write(&present, "06233084266\n").unwrap();
    let missing = temp_dir.path().join("missing.txt");

    let files = vec![
        missing.to_string_lossy().into_owned(),
        present.to_string_lossy().into_owned(),
    ];
    let pipeline = BirthdayPipeline::new(
        LocalStorage::default(),
        cli_config(files.clone(), OutputFormat::Text),
    );
    let report = EtlEngine::new_with_monitoring(pipeline, true)
        .run(&files)
        .await
        .unwrap();

    assert_eq!(report.files_number, 2);
    assert_eq!(report.files.len(), 1);
    assert_eq!(report.failed_files.len(), 1);
    assert_eq!(report.failed_files[0].path, files[0]);
    assert_eq!(report.processed, 1);
    assert_eq!(report.valid, 1);
    assert!(!temp_dir.path().join("missing-birthdays.txt").exists());
    assert!(temp_dir.path().join("a-birthdays.txt").exists());
}

#[tokio::test]
async fn test_empty_file_processes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("empty.txt");
    std::fs::write(&input, "").unwrap();

    let files = vec![input.to_string_lossy().into_owned()];
    let pipeline = BirthdayPipeline::new(
        LocalStorage::default(),
        cli_config(files.clone(), OutputFormat::Text),
    );
    let report = EtlEngine::new(pipeline).run(&files).await.unwrap();

    assert_eq!(report.processed, 0);
    assert_eq!(report.valid, 0);
    assert_eq!(report.invalid, 0);
    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("empty-birthdays.txt")).unwrap(),
        ""
    );
}

#[tokio::test]
async fn test_csv_output_with_custom_date_format() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("list.dat");
    std::fs::write(&input, "11443095179\n61513035794\n").unwrap();

    let files = vec![input.to_string_lossy().into_owned()];
    let mut config = cli_config(files.clone(), OutputFormat::Csv);
    config.date_format = "%Y/%m/%d".to_string();

    let pipeline = BirthdayPipeline::new(LocalStorage::default(), config);
    let report = EtlEngine::new(pipeline).run(&files).await.unwrap();
    assert_eq!(report.valid, 2);

    let csv = std::fs::read_to_string(temp_dir.path().join("list-birthdays.dat.csv")).unwrap();
    assert_eq!(
        csv,
        "pesel,birth_date\n11443095179,2111/04/30\n61513035794,2161/11/30\n"
    );
}

#[tokio::test]
async fn test_toml_config_with_relative_inputs() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("one.txt"), "00653011554\nnot-a-pesel\n").unwrap();

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[batch]
name = "integration"
inputs = ["one.txt"]
base_path = "{}"

[output]
format = "json"
suffix = "_dates"
"#,
        temp_dir.path().to_string_lossy().replace('\\', "/")
    ))
    .unwrap();

    let inputs = config.batch.inputs.clone();
    let storage = LocalStorage::new(config.base_path().to_string());
    let pipeline = BirthdayPipeline::new(storage, config);
    let report = EtlEngine::new(pipeline).run(&inputs).await.unwrap();

    assert_eq!(report.valid, 1);
    assert_eq!(report.invalid, 1);
    assert_eq!(report.files[0].output_path, "one_dates.txt.json");

    let json = std::fs::read_to_string(temp_dir.path().join("one_dates.txt.json")).unwrap();
    let entries: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        entries,
        serde_json::json!([{ "pesel": "00653011554", "birth_date": "30-05-2200" }])
    );

    let serialized = serde_json::to_value(&report).unwrap();
    assert_eq!(serialized["files"][0]["invalid_lines"][0]["line_number"], 2);
    assert_eq!(
        serialized["files"][0]["invalid_lines"][0]["kind"],
        "invalid_characters"
    );
}

#[tokio::test]
async fn test_inputs_sharing_a_stem_keep_separate_outputs() {
    let temp_dir = TempDir::new().unwrap();
    let txt = temp_dir.path().join("people.txt");
    let dat = temp_dir.path().join("people.dat");
    std::fs::write(&txt, "19813012344\n").unwrap();
    std::fs::write(&dat, "20022045678\n").unwrap();

    let files = vec![
        txt.to_string_lossy().into_owned(),
        dat.to_string_lossy().into_owned(),
    ];
    let pipeline = BirthdayPipeline::new(
        LocalStorage::default(),
        cli_config(files.clone(), OutputFormat::Csv),
    );
    let report = EtlEngine::new(pipeline).run(&files).await.unwrap();

    assert_eq!(report.valid, 2);
    assert_ne!(report.files[0].output_path, report.files[1].output_path);

    let from_txt =
        std::fs::read_to_string(temp_dir.path().join("people-birthdays.txt.csv")).unwrap();
    assert_eq!(from_txt, "pesel,birth_date\n19813012344,30-01-1819\n");
    let from_dat =
        std::fs::read_to_string(temp_dir.path().join("people-birthdays.dat.csv")).unwrap();
    assert_eq!(from_dat, "pesel,birth_date\n20022045678,20-02-1920\n");
}
