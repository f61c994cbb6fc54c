//! Application services built on the storage adapters.
//!
//! - `PersistenceGateway` - routes each create to exactly one backend
//! - `QueryService` - paginated, searchable admin listings
//! - `ExportService` - whole-collection spreadsheet / delimited exports
//! - `SystemLogRecorder` - persisted logging that never fails the caller

mod export;
mod gateway;
mod query;
mod system_log;

pub use export::{Cell, ExportError, ExportFile, ExportFormat, ExportService, Exportable};
pub use gateway::PersistenceGateway;
pub use query::{ListRequest, Page, Pagination, QueryService, SubmissionStats};
pub use system_log::{SystemLogRecorder, LOG_RETENTION_ROWS};
