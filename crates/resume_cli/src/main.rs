//! Command-line probe over a file-backed résumé store.
//!
//! # Responsibility
//! - Exercise `resume_core` store, migration and template flows end to end.
//! - Keep output line-oriented and deterministic for local sanity checks.

use resume_core::db::open_db;
use resume_core::service::resume_service::parse_example_flag;
use resume_core::template::{decode_export, ResumeImporter};
use resume_core::{
    default_log_level, init_logging, needs_migration, save_failure_message, validate_resume_data,
    ContentElement, DirTemplateSource, ExportFileImporter, ResumeData, ResumeService, ResumeStore,
    SqliteKeyValueStore, TemplateLoader,
};
use std::process::ExitCode;

const DEFAULT_DB_FILE: &str = "resume_entries.sqlite3";
const DEFAULT_TEMPLATE_DIR: &str = "public";
const USAGE: &str = "usage: resume_cli <ping|list|show ID|new [example]|import FILE|check FILE|delete ID...>";

fn main() -> ExitCode {
    match run(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    if let Ok(log_dir) = std::env::var("RESUME_LOG_DIR") {
        let level = std::env::var("RESUME_LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string());
        init_logging(&level, &log_dir)?;
    }

    let (command, rest) = args.split_first().ok_or_else(|| USAGE.to_string())?;
    if command == "ping" {
        println!("resume_core ping={}", resume_core::ping());
        println!("resume_core version={}", resume_core::core_version());
        return Ok(());
    }
    if command == "check" {
        let path = rest.first().ok_or_else(|| USAGE.to_string())?;
        return check_file(path);
    }

    let db_path = std::env::var("RESUME_DB").unwrap_or_else(|_| DEFAULT_DB_FILE.to_string());
    let conn = open_db(&db_path).map_err(|err| format!("failed to open `{db_path}`: {err}"))?;
    let kv = SqliteKeyValueStore::try_new(&conn).map_err(|err| err.to_string())?;
    let template_dir =
        std::env::var("RESUME_TEMPLATES").unwrap_or_else(|_| DEFAULT_TEMPLATE_DIR.to_string());
    let service = ResumeService::new(
        ResumeStore::new(kv),
        TemplateLoader::new(DirTemplateSource::new(template_dir)),
    );

    match command.as_str() {
        "list" => {
            for entry in service.list_resumes().map_err(|err| err.to_string())? {
                println!(
                    "{}\t{}\t{}",
                    entry.id,
                    resume_core::model::timestamp::format(&entry.updated_at),
                    entry.resume_data.title
                );
            }
            Ok(())
        }
        "show" => {
            let id = rest.first().ok_or_else(|| USAGE.to_string())?;
            let entry = service
                .open_resume(id)
                .map_err(|err| err.to_string())?
                .ok_or_else(|| format!("resume `{id}` not found"))?;
            let json = serde_json::to_string_pretty(&entry).map_err(|err| err.to_string())?;
            println!("{json}");
            Ok(())
        }
        "new" => {
            let use_example = parse_example_flag(rest.first().map(|flag| match flag.as_str() {
                "example" => "1",
                other => other,
            }));
            let data = service.prepare_new_resume(None, use_example);
            save(&service, data)
        }
        "import" => {
            let path = rest.first().ok_or_else(|| USAGE.to_string())?;
            let data = read_export(path)?;
            save(&service, data)
        }
        "delete" => {
            if rest.is_empty() {
                return Err(USAGE.to_string());
            }
            service.delete_resumes(rest).map_err(|err| err.to_string())?;
            println!("deleted={}", rest.len());
            Ok(())
        }
        _ => Err(USAGE.to_string()),
    }
}

fn save(
    service: &ResumeService<SqliteKeyValueStore<'_>, DirTemplateSource>,
    data: ResumeData,
) -> Result<(), String> {
    let entry = service
        .save_new(data)
        .map_err(|err| save_failure_message(&err))?;
    println!("created={} title={}", entry.id, entry.resume_data.title);
    Ok(())
}

fn read_export(path: &str) -> Result<ResumeData, String> {
    let content =
        std::fs::read_to_string(path).map_err(|err| format!("failed to read `{path}`: {err}"))?;
    ExportFileImporter
        .import(&content)
        .map_err(|err| err.to_string())
}

fn check_file(path: &str) -> Result<(), String> {
    let content =
        std::fs::read_to_string(path).map_err(|err| format!("failed to read `{path}`: {err}"))?;
    let data = decode_export(&content).map_err(|err| err.to_string())?;

    println!("needs_migration={}", needs_migration(&data));
    let migrated = resume_core::migrate_resume_data(data);
    let blank = migrated
        .elements()
        .filter(|element| match element {
            ContentElement::Current(current) => current.content.is_blank(),
            ContentElement::Legacy(_) => false,
        })
        .count();
    println!("blank_elements={blank}");
    let report = validate_resume_data(&migrated);
    println!("valid={}", report.is_valid);
    for error in report.errors {
        println!("error={error}");
    }
    Ok(())
}
