//! Integration tests for whole-collection exports.
//!
//! Exports read every row of one kind from the local store and render
//! either a spreadsheet workbook or delimited text. Column sets and
//! order must be identical between the two modes.

use std::sync::Arc;

use clavisnova::adapters::SqliteStore;
use clavisnova::application::{ExportFormat, ExportService, Exportable};
use clavisnova::config::DatabaseConfig;
use clavisnova::domain::{Contact, NewContact, NewRegistration, Registration, Requirements};
use clavisnova::ports::SubmissionSink;

async fn memory_store() -> Arc<SqliteStore> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        ..Default::default()
    };
    Arc::new(SqliteStore::connect(&config).await.expect("open store"))
}

fn registration(manufacturer: &str) -> NewRegistration {
    NewRegistration {
        manufacturer: manufacturer.to_string(),
        model: "Upright".to_string(),
        serial: "SN-001".to_string(),
        year: 1987,
        height: "48in".to_string(),
        finish: "Satin".to_string(),
        color_wood: "Walnut".to_string(),
        city_state: "Portland, OR".to_string(),
        access: None,
        ip_address: None,
        user_agent: None,
    }
}

#[tokio::test]
async fn empty_export_is_header_row_only() {
    let store = memory_store().await;
    let exports = ExportService::with_format(store, ExportFormat::Delimited);

    let file = exports.export::<Registration>().await.unwrap();
    let text = String::from_utf8(file.bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0], Registration::headers().join(","));
    assert_eq!(file.content_type, "text/csv");
    assert_eq!(file.filename, "piano_registrations.csv");
}

#[tokio::test]
async fn delimited_export_lists_rows_newest_first() {
    let store = memory_store().await;
    store.create_registration(&registration("Yamaha")).await.unwrap();
    store.create_registration(&registration("Kawai")).await.unwrap();

    let exports = ExportService::with_format(store, ExportFormat::Delimited);
    let file = exports.export::<Registration>().await.unwrap();
    let text = String::from_utf8(file.bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("2,Kawai,"));
    assert!(lines[2].starts_with("1,Yamaha,"));
}

#[tokio::test]
async fn export_filenames_are_kind_specific() {
    let store = memory_store().await;
    store
        .create_contact(&NewContact {
            name: None,
            email: None,
            message: "hello".to_string(),
            ip_address: None,
            user_agent: None,
        })
        .await
        .unwrap();

    let exports = ExportService::with_format(store, ExportFormat::Delimited);
    assert_eq!(
        exports.export::<Contact>().await.unwrap().filename,
        "contacts.csv"
    );
    assert_eq!(
        exports.export::<Requirements>().await.unwrap().filename,
        "requirements.csv"
    );
}

#[cfg(feature = "xlsx")]
#[tokio::test]
async fn workbook_export_produces_spreadsheet_bytes() {
    let store = memory_store().await;
    store.create_registration(&registration("Yamaha")).await.unwrap();

    let exports = ExportService::with_format(store, ExportFormat::Workbook);
    let file = exports.export::<Registration>().await.unwrap();

    // XLSX is a zip archive.
    assert_eq!(&file.bytes[..2], b"PK");
    assert_eq!(file.filename, "piano_registrations.xlsx");
    assert_eq!(
        file.content_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
}

#[cfg(feature = "xlsx")]
#[tokio::test]
async fn detected_format_prefers_the_workbook_renderer() {
    let store = memory_store().await;
    let exports = ExportService::new(store);
    assert_eq!(exports.format(), ExportFormat::Workbook);
}

#[tokio::test]
async fn forced_delimited_mode_matches_workbook_columns() {
    // When the spreadsheet renderer is unavailable the delimited file
    // must carry the same header set in the same order.
    let store = memory_store().await;
    let exports = ExportService::with_format(store, ExportFormat::Delimited);

    let file = exports.export::<Registration>().await.unwrap();
    let text = String::from_utf8(file.bytes).unwrap();
    let header = text.lines().next().unwrap();

    let columns: Vec<&str> = header.split(',').collect();
    assert_eq!(columns, Registration::headers());
}
