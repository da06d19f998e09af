//! Integration tests for the dashboard workflow
//!
//! These tests drive the host with UI events and check the published slots:
//! - Startup with and without the default dataset
//! - Uploading, archiving and reopening files
//! - Chart aggregation for the selected column
//! - Failure handling that must leave the active dataset untouched

mod common;

use std::sync::Arc;

use common::builders::HostBuilder;
use common::{assert_float_eq, GAPMINDER_CSV};
use datadash_rs::binding::{SlotId, UiEvent};
use datadash_rs::data::parse_csv;
use datadash_rs::StatusLevel;

const REGION_CSV: &[u8] = b"region,value\nA,1\nB,2\n";

#[test]
fn test_startup_loads_default_and_charts_it() {
    let mut host = HostBuilder::new().build();
    let report = host.send(UiEvent::Start);

    assert!(report.is_clean());
    assert!(report.did_fire("update_chart"));
    assert!(report.did_fire("populate_file_list"));

    let table = host.table();
    assert_eq!(table.num_rows(), 5);
    assert_eq!(*table, parse_csv(GAPMINDER_CSV.as_bytes()).unwrap());

    let chart = host.chart();
    assert!(!chart.placeholder);
    let categories: Vec<_> = chart.bars.iter().map(|b| b.category.as_str()).collect();
    assert_eq!(categories, vec!["Africa", "Americas", "Asia"]);
    assert_float_eq(chart.value_of("Africa").unwrap(), (72.301 + 42.731) / 2.0, 1e-9);
    assert_float_eq(chart.value_of("Asia").unwrap(), 82.603, 1e-9);

    assert!(host.file_list().is_empty());
    assert_eq!(host.current_filename(), None);
    assert_eq!(host.status().level, StatusLevel::Info);
}

#[test]
fn test_startup_without_default_stays_usable() {
    let mut host = HostBuilder::new().without_default().started();

    let status = host.status();
    assert_eq!(status.level, StatusLevel::Warning);
    assert!(status.text.contains("upload a CSV"));
    assert!(host.table().is_empty());
    assert!(host.chart().placeholder);

    // Uploading still works
    host.upload("t.csv", REGION_CSV);
    assert_eq!(host.active().column_names(), vec!["region", "value"]);
}

#[test]
fn test_upload_archives_and_activates() {
    let mut host = HostBuilder::new().started();
    let report = host.upload("t.csv", REGION_CSV);

    assert!(report.is_clean());
    assert_eq!(report.fired, vec!["upload_dataset", "update_chart"]);

    let archived: Vec<_> = host
        .file_list()
        .into_iter()
        .map(|f| f.generated_name)
        .collect();
    assert_eq!(archived, vec!["20240101-000000_t.csv"]);
    assert_eq!(
        std::fs::read(host.archive_path("20240101-000000_t.csv")).unwrap(),
        REGION_CSV
    );

    assert_eq!(host.active().column_names(), vec!["region", "value"]);
    assert!(Arc::ptr_eq(&host.active(), &host.table()));
    assert_eq!(host.current_filename().as_deref(), Some("20240101-000000_t.csv"));

    let status = host.status();
    assert_eq!(status.level, StatusLevel::Success);
    assert!(status.text.contains("t.csv"));
}

#[test]
fn test_same_second_uploads_get_distinct_names() {
    let mut host = HostBuilder::new().started();
    host.upload("t.csv", REGION_CSV);
    host.upload("t.csv", b"region,value\nC,3\n");

    let names: Vec<_> = host
        .file_list()
        .into_iter()
        .map(|f| f.generated_name)
        .collect();
    assert_eq!(names, vec!["20240101-000000_t.csv", "20240101-000000~0001_t.csv"]);
}

#[test]
fn test_chart_averages_selected_column_by_group() {
    let mut host = HostBuilder::new().group_column("region").started();
    host.upload("t.csv", b"region,value\nA,1\nB,2\nA,3\n");

    // The default column is not in this dataset yet
    assert!(host.chart().placeholder);

    let report = host.select_column("value");
    assert_eq!(report.fired, vec!["update_chart"]);

    let chart = host.chart();
    assert!(!chart.placeholder);
    assert_eq!(chart.bars.len(), 2);
    assert_float_eq(chart.value_of("A").unwrap(), 2.0, 1e-9);
    assert_float_eq(chart.value_of("B").unwrap(), 2.0, 1e-9);
}

#[test]
fn test_chart_matches_two_group_example() {
    let mut host = HostBuilder::new().group_column("region").started();
    host.upload("t.csv", REGION_CSV);
    host.select_column("value");

    let chart = host.chart();
    assert_float_eq(chart.value_of("A").unwrap(), 1.0, 1e-9);
    assert_float_eq(chart.value_of("B").unwrap(), 2.0, 1e-9);
}

#[test]
fn test_unknown_column_gives_placeholder() {
    let mut host = HostBuilder::new().started();
    let before = host.active();

    let report = host.select_column("nonexistent");

    assert!(report.is_clean());
    let chart = host.chart();
    assert!(chart.placeholder);
    assert!(chart.title.contains("nonexistent"));
    assert!(chart.bars.is_empty());
    assert!(Arc::ptr_eq(&before, &host.active()));
}

#[test]
fn test_click_deleted_archive_entry_reports_not_found() {
    let mut host = HostBuilder::new().started();
    host.upload("t.csv", REGION_CSV);
    host.send(UiEvent::ResetDataset);
    let before = host.active();

    std::fs::remove_file(host.archive_path("20240101-000000_t.csv")).unwrap();
    let report = host.send(UiEvent::FileClicked(0));

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].edge, "select_archived_file");
    let status = host.status();
    assert!(status.is_error());
    assert!(status.text.contains("no longer exists"));
    assert!(Arc::ptr_eq(&before, &host.active()));
    assert_eq!(host.current_filename(), None);
}

#[test]
fn test_click_out_of_range_reports_not_found() {
    let mut host = HostBuilder::new().started();
    let report = host.send(UiEvent::FileClicked(3));

    assert!(!report.is_clean());
    assert!(host.status().is_error());
    assert!(host.status().text.contains("not in the file list"));
}

#[test]
fn test_reopen_archived_file() {
    let mut host = HostBuilder::new().started();
    host.upload("t.csv", REGION_CSV);
    host.send(UiEvent::ResetDataset);
    assert_eq!(host.active().num_rows(), 5);

    let report = host.send(UiEvent::FileClicked(0));

    assert!(report.is_clean());
    assert_eq!(report.fired, vec!["select_archived_file", "update_chart"]);
    assert_eq!(host.active().column_names(), vec!["region", "value"]);
    assert_eq!(host.current_filename().as_deref(), Some("20240101-000000_t.csv"));
    assert_eq!(host.status().level, StatusLevel::Success);
}

#[test]
fn test_malformed_upload_is_rejected_and_not_archived() {
    let mut host = HostBuilder::new().started();
    let before = host.active();

    let report = host.upload("bad.csv", b"a,b\n1\n2,3,4\n");
    assert_eq!(report.failures.len(), 1);
    assert!(host.status().is_error());
    assert!(host.file_list().is_empty());
    assert_eq!(std::fs::read_dir(&host.archive_dir).unwrap().count(), 0);

    host.upload("binary.csv", &[0xff, 0xfe, 0x00, 0x81]);
    assert!(host.status().is_error());
    assert_eq!(std::fs::read_dir(&host.archive_dir).unwrap().count(), 0);

    assert!(Arc::ptr_eq(&before, &host.active()));
}

#[test]
fn test_archive_failure_rolls_back_store() {
    let mut host = HostBuilder::new().started();
    let before = host.active();

    // Replace the archive directory with a plain file so saving fails
    std::fs::remove_dir_all(&host.archive_dir).unwrap();
    std::fs::write(&host.archive_dir, b"not a directory").unwrap();

    host.upload("t.csv", REGION_CSV);

    let status = host.status();
    assert!(status.is_error());
    assert!(status.text.contains("Could not archive"));
    assert!(Arc::ptr_eq(&before, &host.active()));
    assert_eq!(host.current_filename(), None);
}

#[test]
fn test_reset_restores_default() {
    let mut host = HostBuilder::new().started();
    host.upload("t.csv", REGION_CSV);

    let report = host.send(UiEvent::ResetDataset);

    assert!(report.is_clean());
    assert_eq!(host.active().num_rows(), 5);
    assert_eq!(host.current_filename(), None);
    assert!(!host.chart().placeholder);
    // The archive keeps the upload
    assert_eq!(host.file_list().len(), 1);
}

#[test]
fn test_reset_failure_keeps_upload() {
    let mut host = HostBuilder::new().started();
    host.upload("t.csv", REGION_CSV);
    std::fs::remove_file(host.default_path()).unwrap();

    host.send(UiEvent::ResetDataset);

    assert!(host.status().is_error());
    assert_eq!(host.active().column_names(), vec!["region", "value"]);
}

#[test]
fn test_refresh_picks_up_external_files() {
    let mut host = HostBuilder::new().started();
    std::fs::write(host.archive_path("20230505-101010_extra.csv"), REGION_CSV).unwrap();
    std::fs::write(host.archive_path(".upload-partial"), b"x").unwrap();

    let report = host.send(UiEvent::RefreshFiles);

    assert_eq!(report.fired, vec!["populate_file_list"]);
    let files = host.file_list();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].generated_name, "20230505-101010_extra.csv");
    assert_eq!(files[0].original_name, "extra.csv");
}
