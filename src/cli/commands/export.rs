use crate::cli::commands::{authorizer, open_pool, parse_month_arg};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::require_admin;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::ui::messages::info;
use crate::utils::path::resolve_output;
use std::io::{self, Write};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        month,
        file,
        force,
        stdout,
    } = cmd
    {
        let (year, month) = parse_month_arg(month)?;

        let pool = open_pool(cfg)?;
        let auth = authorizer(&pool, cfg)?;
        require_admin(&auth, "exporting calendars")?;

        let doc = ExportLogic::export_ics(&pool, &auth, year, month, Some(cfg.calendar_name.as_str()))?;

        if *stdout {
            let mut out = io::stdout().lock();
            out.write_all(&doc.bytes)?;
            out.flush()?;
            return Ok(());
        }

        if doc.events == 0 {
            info(format!("No assigned sessions in {year}-{month:02}; the calendar will be empty."));
        }

        let path = resolve_output(file.as_deref(), cfg.export_dir.as_deref(), &doc.file_name);
        ExportLogic::write(&doc, &path, *force)?;
    }

    Ok(())
}
