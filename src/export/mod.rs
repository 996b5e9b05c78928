// src/export/mod.rs

mod fs_utils;
pub mod ics;

use crate::core::auth::Authorizer;
use crate::db::pool::DbPool;
use crate::db::sessions;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date::month_bounds;
use chrono::Utc;
use std::fs;
use std::path::Path;

/// A rendered calendar feed ready to be served or written to disk.
#[derive(Debug, Clone)]
pub struct IcsDocument {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
    pub events: usize,
}

/// Shared completion message for exports.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

pub struct ExportLogic;

impl ExportLogic {
    /// Calendar feed of all sessions in (year, month) with an assigned
    /// trainer, ordered by date and start time. An empty month yields a
    /// valid calendar without events.
    pub fn export_ics(
        pool: &DbPool,
        names: &dyn Authorizer,
        year: i32,
        month: u32,
        calendar_name: Option<&str>,
    ) -> AppResult<IcsDocument> {
        if !(1..=12).contains(&month) {
            return Err(AppError::InvalidMonth(month));
        }
        let (first, last) = month_bounds(year, month).ok_or(AppError::InvalidYear(year))?;

        let assigned = sessions::load_assigned_in_range(&pool.conn, first, last)?;
        let doc = ics::render_calendar(&assigned, |id| names.display_name(id), calendar_name, Utc::now());

        Ok(IcsDocument {
            file_name: ics::file_name(year, month),
            content_type: ics::CONTENT_TYPE,
            bytes: doc.into_bytes(),
            events: assigned.len(),
        })
    }

    /// Write a document to `path`, asking before overwriting unless `force`.
    pub fn write(doc: &IcsDocument, path: &Path, force: bool) -> AppResult<()> {
        fs_utils::ensure_writable(path, force)?;
        fs::write(path, &doc.bytes)?;
        notify_export_success("ICS", path);
        Ok(())
    }
}
