use super::*;

use chrono::{DateTime, Duration, Local, NaiveTime};
use tempfile::tempdir;

fn t(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

fn at(hour: u32, min: u32, sec: u32) -> DateTime<Local> {
    Local::now()
        .date_naive()
        .and_hms_opt(hour, min, sec)
        .unwrap()
        .and_local_timezone(Local)
        .unwrap()
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

#[test]
fn test_current_shift_windows() {
    assert_eq!(current_shift(t(7, 30)), SHIFT_1);
    assert_eq!(current_shift(t(13, 59)), SHIFT_1);
    assert_eq!(current_shift(t(14, 0)), SHIFT_2);
    assert_eq!(current_shift(t(21, 59)), SHIFT_2);
    assert_eq!(current_shift(t(22, 0)), SHIFT_3);
    assert_eq!(current_shift(t(23, 59)), SHIFT_3);
    assert_eq!(current_shift(t(0, 0)), SHIFT_3);
    assert_eq!(current_shift(t(5, 59)), SHIFT_3);
    assert_eq!(current_shift(t(6, 0)), UNKNOWN_SHIFT);
    assert_eq!(current_shift(t(7, 29)), UNKNOWN_SHIFT);
}

#[test]
fn test_shift_for_timestamp_hour_buckets() {
    assert_eq!(shift_for_timestamp(at(7, 0, 0)), SHIFT_1);
    assert_eq!(shift_for_timestamp(at(13, 59, 59)), SHIFT_1);
    assert_eq!(shift_for_timestamp(at(14, 0, 0)), SHIFT_2);
    assert_eq!(shift_for_timestamp(at(21, 59, 59)), SHIFT_2);
    assert_eq!(shift_for_timestamp(at(22, 0, 0)), SHIFT_3);
    assert_eq!(shift_for_timestamp(at(2, 30, 0)), SHIFT_3);
}

#[test]
fn test_shift_classifiers_diverge_in_the_morning_gap() {
    // 06:30 and 07:00 fall in the gap for the live classifier but land in a
    // bucket for the logging classifier.
    assert_eq!(current_shift(t(6, 30)), UNKNOWN_SHIFT);
    assert_eq!(shift_for_timestamp(at(6, 30, 0)), SHIFT_3);
    assert_eq!(current_shift(t(7, 0)), UNKNOWN_SHIFT);
    assert_eq!(shift_for_timestamp(at(7, 0, 0)), SHIFT_1);
}

#[test]
fn test_duration_formats() {
    assert_eq!(format_clock(Duration::zero()), "00:00:00");
    assert_eq!(format_clock(Duration::seconds(930)), "00:15:30");
    assert_eq!(format_duration(Duration::seconds(930)), "0:15:30");
    assert_eq!(format_duration(Duration::seconds(26 * 3600 + 61)), "26:01:01");
}

#[test]
fn test_start_stop_logs_one_crane_row() {
    let dir = tempdir().unwrap();
    let log = OperationLog::create(dir.path().join("operations.yaml")).unwrap();
    let mut registry = EquipmentRegistry::new();

    registry.start_at(CraneId(1), "John Doe", at(9, 0, 0)).unwrap();
    assert!(registry.is_running(CraneId(1)));

    let interval = registry
        .stop_at(CraneId(1), "Maintenance", at(9, 15, 30), &log)
        .unwrap();
    assert_eq!(interval, Some((at(9, 0, 0), at(9, 15, 30))));
    assert!(!registry.is_running(CraneId(1)));
    println!("After stop: {registry:#?}");

    let book = log.load().unwrap();
    assert_eq!(book.crane.len(), 1);
    let row = &book.crane[0];
    assert_eq!(row.date, today());
    assert_eq!(row.shift, SHIFT_1);
    assert_eq!(row.crane_number, 1);
    assert_eq!(row.operator, "John Doe");
    assert_eq!(row.start_time, "09:00:00");
    assert_eq!(row.stop_time, "09:15:30");
    assert_eq!(row.active_duration, "0:15:30");
    assert_eq!(row.idle_reason, "Maintenance");
}

#[test]
fn test_restart_overwrites_without_logging() {
    let dir = tempdir().unwrap();
    let log = OperationLog::create(dir.path().join("operations.yaml")).unwrap();
    let mut registry = EquipmentRegistry::new();

    registry.start_at(CraneId(1), "John Doe", at(8, 0, 0)).unwrap();
    registry.start_at(CraneId(1), "Jane Smith", at(9, 0, 0)).unwrap();
    assert!(log.load().unwrap().crane.is_empty());

    registry
        .stop_at(CraneId(1), "Shift Change", at(9, 30, 0), &log)
        .unwrap();
    let book = log.load().unwrap();
    assert_eq!(book.crane.len(), 1);
    assert_eq!(book.crane[0].operator, "Jane Smith");
    assert_eq!(book.crane[0].start_time, "09:00:00");

    // Both operators were consumed along the way.
    let roster = Config::default().operators;
    let available = registry.operators().available(&roster);
    assert!(!available.contains(&&"John Doe".to_string()));
    assert!(!available.contains(&&"Jane Smith".to_string()));
}

#[test]
fn test_stop_when_not_running_is_a_noop() {
    let dir = tempdir().unwrap();
    let log = OperationLog::create(dir.path().join("operations.yaml")).unwrap();
    let mut registry = EquipmentRegistry::new();

    let interval = registry
        .stop_at(CraneId(2), "Maintenance", at(10, 0, 0), &log)
        .unwrap();
    assert_eq!(interval, None);
    assert!(log.load().unwrap().crane.is_empty());
}

#[test]
fn test_unknown_crane_is_rejected() {
    let dir = tempdir().unwrap();
    let log = OperationLog::create(dir.path().join("operations.yaml")).unwrap();
    let mut registry = EquipmentRegistry::new();

    assert!(matches!(
        registry.start(CraneId(3), "John Doe"),
        Err(OpsError::InvalidUnit(3))
    ));
    assert!(matches!(
        registry.stop(CraneId(0), "Maintenance", &log),
        Err(OpsError::InvalidUnit(0))
    ));
}

#[test]
fn test_operator_pool_never_releases() {
    let dir = tempdir().unwrap();
    let log = OperationLog::create(dir.path().join("operations.yaml")).unwrap();
    let mut registry = EquipmentRegistry::new();
    let roster = Config::default().operators;

    registry.start_at(CraneId(1), "Jane Smith", at(9, 0, 0)).unwrap();
    let available = registry.operators().available(&roster);
    assert!(!available.contains(&&"Jane Smith".to_string()));

    registry
        .stop_at(CraneId(1), "Operator Break", at(9, 30, 0), &log)
        .unwrap();
    let available = registry.operators().available(&roster);
    assert!(!available.contains(&&"Jane Smith".to_string()));
    assert_eq!(available.len(), roster.len() - 1);
}

#[test]
fn test_pool_preserves_roster_order() {
    let roster = Config::default().operators;
    let mut pool = OperatorPool::new();
    pool.mark_used("Jane Smith");
    pool.mark_used("Jane Smith");
    assert!(pool.is_used("Jane Smith"));

    let available = pool.available(&roster);
    assert_eq!(available.len(), roster.len() - 1);
    assert_eq!(available[0], "John Doe");
    assert_eq!(available[1], "Mike Johnson");
}

#[test]
fn test_elapsed_is_live_and_resets_on_stop() {
    let dir = tempdir().unwrap();
    let log = OperationLog::create(dir.path().join("operations.yaml")).unwrap();
    let mut registry = EquipmentRegistry::new();

    assert_eq!(registry.elapsed_at(CraneId(1), at(9, 0, 0)), Duration::zero());

    registry.start_at(CraneId(1), "John Doe", at(9, 0, 0)).unwrap();
    assert_eq!(
        registry.elapsed_at(CraneId(1), at(9, 0, 10)),
        Duration::seconds(10)
    );
    assert_eq!(
        registry.elapsed_at(CraneId(1), at(9, 1, 0)),
        Duration::seconds(60)
    );

    registry
        .stop_at(CraneId(1), "Maintenance", at(9, 1, 0), &log)
        .unwrap();
    assert_eq!(registry.elapsed_at(CraneId(1), at(9, 1, 5)), Duration::zero());
}

#[test]
fn test_reset_timer_rebases_without_logging() {
    let dir = tempdir().unwrap();
    let log = OperationLog::create(dir.path().join("operations.yaml")).unwrap();
    let mut registry = EquipmentRegistry::new();

    registry.start_at(CraneId(1), "John Doe", at(9, 0, 0)).unwrap();
    registry.reset_timer_at(CraneId(1), at(9, 30, 0)).unwrap();

    assert!(registry.is_running(CraneId(1)));
    assert_eq!(
        registry.elapsed_at(CraneId(1), at(9, 30, 5)),
        Duration::seconds(5)
    );
    assert!(log.load().unwrap().crane.is_empty());
}

#[test]
fn test_create_materializes_empty_tables_and_reopen_keeps_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("operations.yaml");

    let log = OperationLog::create(path.clone()).unwrap();
    assert!(path.exists());
    let book = log.load().unwrap();
    assert!(book.crane.is_empty());
    assert!(book.barge.is_empty());
    assert!(book.generator.is_empty());
    assert!(book.ship.is_empty());

    log.append_barge("Barge 7", at(10, 0, 0), at(11, 30, 0), 125.5).unwrap();

    let reopened = OperationLog::create(path).unwrap();
    let book = reopened.load().unwrap();
    assert_eq!(book.barge.len(), 1);
    assert_eq!(book.barge[0].barge, "Barge 7");
    assert_eq!(book.barge[0].start_time, "10:00:00");
    assert_eq!(book.barge[0].stop_time, "11:30:00");
    assert_eq!(book.barge[0].tons_loaded, 125.5);
}

#[test]
fn test_append_ship_row_literal_values() {
    let dir = tempdir().unwrap();
    let log = OperationLog::create(dir.path().join("operations.yaml")).unwrap();

    log.append_ship(
        "MV Test",
        Some(at(10, 0, 0)),
        Some(at(12, 30, 0)),
        Some(500.0),
        Some(4),
    )
    .unwrap();

    let book = log.load().unwrap();
    assert_eq!(book.ship.len(), 1);
    let row = &book.ship[0];
    assert_eq!(row.date, today());
    assert_eq!(row.ship, "MV Test");
    assert_eq!(row.start_time, "10:00:00");
    assert_eq!(row.finished_time, "12:30:00");
    assert_eq!(row.quantity, "500");
    assert_eq!(row.hatches, "4");
}

#[test]
fn test_append_ship_absent_fields_log_as_empty() {
    let dir = tempdir().unwrap();
    let log = OperationLog::create(dir.path().join("operations.yaml")).unwrap();

    log.append_ship("MV Ghost", None, None, None, None).unwrap();

    let row = &log.load().unwrap().ship[0];
    assert_eq!(row.ship, "MV Ghost");
    assert_eq!(row.start_time, "");
    assert_eq!(row.finished_time, "");
    assert_eq!(row.quantity, "");
    assert_eq!(row.hatches, "");
}

#[test]
fn test_append_generator_derives_duration() {
    let dir = tempdir().unwrap();
    let log = OperationLog::create(dir.path().join("operations.yaml")).unwrap();

    log.append_generator("Generator 2", at(8, 0, 0), at(9, 30, 15)).unwrap();

    let row = &log.load().unwrap().generator[0];
    assert_eq!(row.generator, "Generator 2");
    assert_eq!(row.start_time, "08:00:00");
    assert_eq!(row.stop_time, "09:30:15");
    assert_eq!(row.active_duration, "1:30:15");
}

#[test]
fn test_parse_numeric_validation() {
    assert_eq!(parse_numeric::<f64>("Tons Loaded", " 12.5 ").unwrap(), 12.5);
    assert_eq!(parse_numeric::<u32>("Number of Hatches", "4").unwrap(), 4);

    let err = parse_numeric::<f64>("Tons Loaded", "abc").unwrap_err();
    assert!(matches!(err, OpsError::Validation { field: "Tons Loaded", .. }));
    assert!(err.to_string().contains("abc"));
}

#[test]
fn test_failed_append_leaves_crane_running() {
    let dir = tempdir().unwrap();
    let log = OperationLog::create(dir.path().join("operations.yaml")).unwrap();
    let mut registry = EquipmentRegistry::new();

    registry.start_at(CraneId(1), "John Doe", at(9, 0, 0)).unwrap();
    std::fs::remove_dir_all(dir.path()).unwrap();

    let result = registry.stop_at(CraneId(1), "Maintenance", at(9, 15, 30), &log);
    assert!(result.is_err());
    assert!(registry.is_running(CraneId(1)));
    assert_eq!(
        registry.elapsed_at(CraneId(1), at(9, 16, 0)),
        Duration::seconds(16 * 60)
    );
}

#[test]
fn test_malformed_store_is_left_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("operations.yaml");
    let log = OperationLog::create(path.clone()).unwrap();

    std::fs::write(&path, "not: [valid").unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    let result = log.append_barge("Barge 7", at(10, 0, 0), at(11, 0, 0), 80.0);
    assert!(result.is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_config_defaults_and_load() {
    let config = Config::default();
    assert_eq!(config.log_file, "operations.yaml");
    assert_eq!(config.operators.len(), 6);
    assert_eq!(config.operators[0], "John Doe");
    assert_eq!(config.idle_reasons.len(), 9);
    assert_eq!(config.idle_reasons.last().unwrap(), "Other");
    assert_eq!(config.generators.len(), 3);

    let dir = tempdir().unwrap();
    let missing = Config::load(dir.path().join("nope.yaml")).unwrap();
    assert_eq!(missing, Config::default());

    let custom = Config {
        log_file: "shiftlog.yaml".to_string(),
        operators: vec!["Ada".to_string()],
        ..Config::default()
    };
    let path = dir.path().join("dockside.yaml");
    std::fs::write(&path, serde_yaml::to_string(&custom).unwrap()).unwrap();
    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded, custom);
}
