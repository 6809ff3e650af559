use super::*;
use crate::journal_core::Date;
use std::fs;
use tempfile::{tempdir, TempDir};

fn store() -> (Config, TempDir) {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let config = Config {
        store_dir: temp_dir.path().join("moo"),
        ..Config::default()
    };
    (config, temp_dir)
}

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_exact_prefix_is_byte_prefix() {
    let query = FileQuery::ExactPrefix("2023-06-".to_string());
    assert!(query.matches("2023-06-01", '-'));
    assert!(query.matches("2023-06-", '-'));
    assert!(!query.matches("2023-07-01", '-'));
    assert!(!query.matches("2023-06", '-'));
}

#[test]
fn test_range_query_needs_full_date() {
    let config = Config {
        range: 7,
        ..Config::default()
    };
    let result = FileQuery::for_date(&PartialDate::month(2023, 6), &config);
    assert!(matches!(result, Err(AppError::Config(_))));

    let query = FileQuery::for_date(&PartialDate::day(2023, 6, 28), &config).unwrap();
    assert_eq!(
        query,
        FileQuery::RangeWindow(DateWindow {
            low: Date::new(2023, 6, 28),
            high: Date::new(2023, 7, 5),
        })
    );
}

#[test]
fn test_range_query_matches_decoded_names() {
    let query = FileQuery::RangeWindow(DateWindow::around(Date::new(2023, 6, 28), 7));
    assert!(query.matches("2023-06-28", '-'));
    assert!(query.matches("2023-07-05", '-'));
    assert!(!query.matches("2023-07-06", '-'));
    assert!(!query.matches("notes.txt", '-'));
}

#[test]
fn test_ensure_store_creates_directory() {
    let (config, _temp_dir) = store();
    assert!(!config.store_dir.exists());

    ensure_store_directory_exists(&config.store_dir).unwrap();
    assert!(config.store_dir.is_dir());

    #[cfg(unix)]
    {
        let mode = fs::metadata(&config.store_dir).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }

    // Existing directories are left alone.
    ensure_store_directory_exists(&config.store_dir).unwrap();
}

#[test]
fn test_ensure_store_rejects_relative_path() {
    let result = ensure_store_directory_exists(Path::new("relative/moo"));
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[test]
fn test_add_appends_records() {
    let (config, _temp_dir) = store();
    let date = PartialDate::day(2023, 6, 1);

    let path = add_event(&config, &date, &Event::new("buy milk", "2%")).unwrap();
    add_event(&config, &date, &Event::new("dentist", "")).unwrap();

    assert_eq!(path, config.store_dir.join("2023-06-01"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        ":buy milk:2%\n:dentist:\n"
    );
}

#[test]
fn test_add_rejects_empty_title() {
    let (config, _temp_dir) = store();
    let date = PartialDate::day(2023, 6, 1);

    for event in [Event::new("", "desc"), Event::new("\n", "desc")] {
        let result = add_event(&config, &date, &event);
        assert!(matches!(result, Err(AppError::Config(_))));
    }
    assert!(!event_file_path(&config, &date).exists());
    assert!(!config.store_dir.exists());
}

#[test]
fn test_add_with_partial_date_uses_prefix_name() {
    let (config, _temp_dir) = store();
    let path = add_event(&config, &PartialDate::month(2023, 6), &Event::new("june", "")).unwrap();
    assert_eq!(path, config.store_dir.join("2023-06-"));
}

#[test]
fn test_select_files_skips_directories_and_sorts() {
    let (config, _temp_dir) = store();
    ensure_store_directory_exists(&config.store_dir).unwrap();
    for name in ["2023-06-15", "2023-06-01", "2023-07-01", "2023-06-10"] {
        fs::write(config.store_dir.join(name), ":x:\n").unwrap();
    }
    fs::create_dir(config.store_dir.join("2023-06-20")).unwrap();

    let query = FileQuery::ExactPrefix("2023-06-".to_string());
    let selected = select_files(&config.store_dir, &query, '-', true).unwrap();

    assert_eq!(names(&selected), vec!["2023-06-01", "2023-06-10", "2023-06-15"]);
}

#[test]
fn test_select_files_unsorted_returns_same_set() {
    let (config, _temp_dir) = store();
    ensure_store_directory_exists(&config.store_dir).unwrap();
    for name in ["2023-06-15", "2023-06-01", "2023-06-10"] {
        fs::write(config.store_dir.join(name), ":x:\n").unwrap();
    }

    let query = FileQuery::ExactPrefix("2023-".to_string());
    let mut selected = names(&select_files(&config.store_dir, &query, '-', false).unwrap());
    selected.sort();

    assert_eq!(selected, vec!["2023-06-01", "2023-06-10", "2023-06-15"]);
}

#[cfg(unix)]
#[test]
fn test_select_files_skips_symlinks() {
    let (config, temp_dir) = store();
    ensure_store_directory_exists(&config.store_dir).unwrap();
    let target = temp_dir.path().join("elsewhere");
    fs::write(&target, ":x:\n").unwrap();
    std::os::unix::fs::symlink(&target, config.store_dir.join("2023-06-01")).unwrap();

    let query = FileQuery::ExactPrefix("2023-".to_string());
    assert!(select_files(&config.store_dir, &query, '-', true)
        .unwrap()
        .is_empty());
}

#[test]
fn test_select_files_missing_store_is_store_error() {
    let (config, _temp_dir) = store();
    let query = FileQuery::ExactPrefix("2023-".to_string());
    let result = select_files(&config.store_dir, &query, '-', true);
    assert!(matches!(
        result,
        Err(AppError::Store(StoreError::ReadStore { .. }))
    ));
}

#[test]
fn test_list_matches_skips_empty_files() {
    let (config, _temp_dir) = store();
    ensure_store_directory_exists(&config.store_dir).unwrap();
    fs::write(config.store_dir.join("2023-06-01"), "").unwrap();
    fs::write(config.store_dir.join("2023-06-02"), ":two:\n").unwrap();

    let files = list_matches(&config, &PartialDate::month(2023, 6)).unwrap();

    assert_eq!(
        files,
        vec![EventFile {
            name: "2023-06-02".to_string(),
            events: vec![Event::new("two", "")],
        }]
    );
}

#[test]
fn test_read_event_files_skips_files_that_cannot_be_read() {
    let (config, _temp_dir) = store();
    ensure_store_directory_exists(&config.store_dir).unwrap();
    let vanished = config.store_dir.join("2023-06-01");
    let kept = config.store_dir.join("2023-06-02");
    fs::write(&vanished, ":gone:\n").unwrap();
    fs::write(&kept, ":kept:\n").unwrap();

    let query = FileQuery::ExactPrefix("2023-06-".to_string());
    let selected = select_files(&config.store_dir, &query, '-', true).unwrap();
    assert_eq!(selected.len(), 2);
    fs::remove_file(&vanished).unwrap();

    assert_eq!(
        read_event_files(selected),
        vec![EventFile {
            name: "2023-06-02".to_string(),
            events: vec![Event::new("kept", "")],
        }]
    );
}

#[test]
fn test_remove_line_keeps_other_lines() {
    let content = b":one:\n:two:\n:three:\n";
    assert_eq!(remove_line(content, LineTarget::Line(1)), b":two:\n:three:\n");
    assert_eq!(remove_line(content, LineTarget::Line(3)), b":one:\n:two:\n");
    assert_eq!(remove_line(content, LineTarget::Line(4)), content.to_vec());
    assert!(remove_line(content, LineTarget::All).is_empty());
}

#[test]
fn test_remove_line_without_trailing_newline() {
    assert_eq!(remove_line(b":one:\n:two:", LineTarget::Line(2)), b":one:\n");
}

#[test]
fn test_delete_missing_file_is_store_error() {
    let (config, _temp_dir) = store();
    let result = delete_line(&config, &PartialDate::day(2023, 6, 1), LineTarget::Line(1));
    assert!(matches!(
        result,
        Err(AppError::Store(StoreError::OpenFile { .. }))
    ));
}

#[test]
fn test_delete_past_end_rewrites_unchanged() {
    let (config, _temp_dir) = store();
    let date = PartialDate::day(2023, 6, 1);
    let path = add_event(&config, &date, &Event::new("only", "")).unwrap();

    let outcome = delete_line(&config, &date, LineTarget::Line(5)).unwrap();

    assert_eq!(outcome, DeleteOutcome::Rewritten { line_removed: false });
    assert_eq!(fs::read_to_string(path).unwrap(), ":only:\n");
}

#[test]
fn test_delete_of_empty_file_removes_it() {
    let (config, _temp_dir) = store();
    ensure_store_directory_exists(&config.store_dir).unwrap();
    let path = config.store_dir.join("2023-06-01");
    fs::write(&path, "").unwrap();

    let outcome = delete_line(&config, &PartialDate::day(2023, 6, 1), LineTarget::Line(3)).unwrap();

    assert_eq!(outcome, DeleteOutcome::Removed);
    assert!(!path.exists());
}
