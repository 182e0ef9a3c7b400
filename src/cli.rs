//! # Command Dispatch
//!
//! Runs the subcommand selected on the command line against the loaded
//! profile.

use crate::cmd_args::{Command, CommandLineArgs, DocumentArgs};
use crate::config::{self, Profile, AUTOSAVE_INTERVAL};
use crate::document::Mode;
use crate::editor::{
    EditorController, EditorEvent, EditorWidget, FileStore, LocalStore, MemoryStore,
    RemoteClient, TextBuffer, ViewMode,
};
use crate::protocol::ExportFormat;
use crate::render::{self, print_document};
use crate::server::{self, AppState};
use anyhow::{bail, Context, Result};
use std::path::Path;
use tokio::time::{Duration, Instant};

/// How often `edit` checks the file for changes
const FILE_POLL_INTERVAL: Duration = Duration::from_millis(250);

pub async fn run(args: CommandLineArgs) -> Result<()> {
    let profile_path = config::get_profile_path();
    let profile = Profile::load(&profile_path, args.profile())?;
    tracing::debug!("Using profile '{}' from '{}'", profile.name(), profile_path);

    match args.command() {
        Command::Serve { host, port } => serve(profile, host.clone(), *port).await,
        Command::Render(document) => render_file(document),
        Command::Edit {
            document,
            preview_out,
            view,
        } => edit(&profile, document, preview_out.as_deref(), *view).await,
        Command::Export {
            document,
            format,
            out_dir,
        } => export(&profile, document, *format, out_dir).await,
        Command::Ask { question, mode } => ask(&profile, &question.join(" "), *mode).await,
    }
}

async fn serve(mut profile: Profile, host: Option<String>, port: Option<u16>) -> Result<()> {
    profile.set_bind(host, port);
    let addr = profile.bind_addr()?;
    let state = AppState::from_profile(&profile)?;

    println!("texmark server listening on http://{addr}");
    server::run(state, addr).await?;
    Ok(())
}

fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn render_file(document: &DocumentArgs) -> Result<()> {
    let content = read_document(&document.file)?;
    println!("{}", render::render(&content, document.mode()));
    Ok(())
}

async fn export(
    profile: &Profile,
    document: &DocumentArgs,
    format: ExportFormat,
    out_dir: &Path,
) -> Result<()> {
    let content = read_document(&document.file)?;
    let remote = RemoteClient::new(profile.server_url())?;
    let mut editor =
        EditorController::new(TextBuffer::new(), MemoryStore::new(), remote, document.mode());
    editor.widget_mut().set_value(&content);

    let path = editor.export(format, out_dir).await?;
    println!("{}", path.display());
    Ok(())
}

async fn ask(profile: &Profile, question: &str, mode: Mode) -> Result<()> {
    let store = FileStore::open(profile.storage_path())?;
    let remote = RemoteClient::new(profile.server_url())?;
    let mut editor = EditorController::new(TextBuffer::new(), store, remote, mode);

    match editor.ask_ai(question).await {
        Some(reply) => {
            println!("{reply}");
            Ok(())
        }
        None => bail!("The question is empty"),
    }
}

async fn edit(
    profile: &Profile,
    document: &DocumentArgs,
    preview_out: Option<&Path>,
    view: ViewMode,
) -> Result<()> {
    let store = FileStore::open(profile.storage_path())?;
    let remote = RemoteClient::new(profile.server_url())?;
    let mut editor = EditorController::new(TextBuffer::new(), store, remote, document.mode());
    editor.set_view_mode(view);
    editor.init().await;

    let file = document.file.as_path();
    let mut last_seen = if file.exists() {
        let content = read_document(file)?;
        editor.set_content(&content);
        content
    } else {
        let content = editor.content();
        tokio::fs::write(file, &content)
            .await
            .with_context(|| format!("Failed to create {}", file.display()))?;
        content
    };

    println!(
        "Editing {} in {} mode against {} (Ctrl+C to stop)",
        file.display(),
        editor.mode().label(),
        profile.server_url()
    );
    report(&mut editor, preview_out).await?;

    let mut poll = tokio::time::interval(FILE_POLL_INTERVAL);
    let mut autosave = tokio::time::interval_at(Instant::now() + AUTOSAVE_INTERVAL, AUTOSAVE_INTERVAL);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = poll.tick() => match tokio::fs::read_to_string(file).await {
                Ok(content) if content != last_seen => {
                    tracing::debug!("{} changed on disk", file.display());
                    editor.set_content(&content);
                    last_seen = content;
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Failed to read {}: {e}", file.display()),
            },
            _ = editor.debounced() => editor.on_debounce_fired().await,
            _ = autosave.tick() => editor.autosave().await,
            result = &mut shutdown => {
                if let Err(e) = result {
                    tracing::warn!("Failed to listen for Ctrl+C: {e}");
                }
                break;
            }
        }
        report(&mut editor, preview_out).await?;
    }

    editor.shutdown()?;
    println!("Stored {} locally", file.display());
    Ok(())
}

/// Print status changes and write previews for the edit session
async fn report<W: EditorWidget, S: LocalStore>(
    editor: &mut EditorController<W, S>,
    preview_out: Option<&Path>,
) -> Result<()> {
    let show_preview = editor.view_mode().panels().preview;

    for event in editor.collect_pending_events() {
        match event {
            EditorEvent::PreviewUpdated { html } if show_preview => {
                if let Some(out) = preview_out {
                    tokio::fs::write(out, print_document(&html))
                        .await
                        .with_context(|| format!("Failed to write preview {}", out.display()))?;
                    tracing::debug!("Preview written to {}", out.display());
                }
            }
            EditorEvent::PreviewFailed { message } => eprintln!("Preview failed: {message}"),
            EditorEvent::StatusChanged { message } => {
                println!("{message} | {}", editor.stats().summary());
            }
            _ => {}
        }
    }

    Ok(())
}
