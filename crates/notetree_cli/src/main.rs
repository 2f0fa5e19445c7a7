//! CLI smoke entry point.
//!
//! # Responsibility
//! - Wire `notetree_core` against the configured notebook API and note store.
//! - Print the fully expanded browser tree, or search hits for `argv[1]`.

use log::error;
use notetree_core::db::open_db;
use notetree_core::seed::{demo_notebooks, demo_notes};
use notetree_core::{
    init_logging, result_snippet, AppConfig, HttpNotebookApi, MemoryNoteRepository,
    MemoryNotebookApi, NoteRepository, NotebookApi, SqliteNoteRepository, TreeRowKind,
    WorkspaceService,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("notetree: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    if let Some(log_dir) = config.log_dir.as_ref() {
        init_logging(config.log_level, &log_dir.to_string_lossy())?;
    }
    let query = std::env::args().nth(1);

    println!("notetree_core version={}", notetree_core::core_version());
    match config.api_base_url.as_deref() {
        Some(base_url) => {
            let api = HttpNotebookApi::new(base_url, config.request_timeout)?;
            println!("notebook api={}", api.base_url());
            with_note_store(api, &config, query.as_deref())
        }
        None => {
            println!("notebook api=offline");
            with_note_store(
                MemoryNotebookApi::new(demo_notebooks()),
                &config,
                query.as_deref(),
            )
        }
    }
}

fn with_note_store<A: NotebookApi>(
    api: A,
    config: &AppConfig,
    query: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    match config.db_path.as_ref() {
        Some(path) => {
            let conn = open_db(path)?;
            let store = SqliteNoteRepository::new(&conn);
            if store.list_notes()?.is_empty() {
                for note in demo_notes() {
                    store.create_note(&note)?;
                }
            }
            print_workspace(WorkspaceService::new(api, store), query)
        }
        None => print_workspace(
            WorkspaceService::new(api, MemoryNoteRepository::new(demo_notes())),
            query,
        ),
    }
}

fn print_workspace<A: NotebookApi, R: NoteRepository>(
    mut service: WorkspaceService<A, R>,
    query: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    service.load()?;

    if let Some(query) = query {
        for note in service.search(query) {
            println!("{}  {}", note.title, result_snippet(&note.content));
        }
        return Ok(());
    }

    let expandable = service
        .state()
        .tree
        .notebooks()
        .iter()
        .filter(|notebook| service.state().tree.has_children(&notebook.id))
        .map(|notebook| notebook.id.clone())
        .collect::<Vec<_>>();
    for notebook_id in &expandable {
        service.toggle_notebook(notebook_id);
    }

    for row in service.visible_rows() {
        let marker = match row.kind {
            TreeRowKind::Notebook if row.expanded => "v",
            TreeRowKind::Notebook if row.has_children => ">",
            TreeRowKind::Notebook => " ",
            TreeRowKind::Note => "-",
        };
        println!("{}{marker} {}", "  ".repeat(row.depth), row.label);
    }
    Ok(())
}
