//! Command handlers for the skl CLI.
//!
//! Each handler calls the API once (twice when a confirmation needs a preview),
//! renders the outcome and writes it to stdout. Errors bubble up to `main`,
//! which prints them and exits non-zero.

use super::render::{PathEntry, Renderer};
use console::Term;
use sklapp::api::SklApi;
use sklapp::assist::gemini::GeminiAssist;
use sklapp::commands::{CmdMessage, CmdResult};
use sklapp::error::{Result, SklError};
use sklapp::init::SklContext;
use sklapp::store::fs_backend::FsBackend;
use std::path::{Path, PathBuf};

const MASKED: &str = "********";

pub struct AppState {
    pub ctx: SklContext,
    renderer: Renderer,
}

impl AppState {
    pub fn new(ctx: SklContext, renderer: Renderer) -> Self {
        Self { ctx, renderer }
    }

    fn api(&mut self) -> &mut SklApi<FsBackend> {
        &mut self.ctx.api
    }

    fn emit(&self, result: &CmdResult) -> Result<()> {
        print!("{}", self.renderer.messages(&result.messages)?);
        Ok(())
    }

    fn cancelled(&self) -> Result<()> {
        print!("{}", self.renderer.messages(&[CmdMessage::info("Dibatalkan")])?);
        Ok(())
    }
}

/// Asks a yes/no question on stderr. `--yes` answers for the user; with no
/// terminal attached the answer is no.
fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    let term = Term::stderr();
    if !term.is_term() {
        tracing::debug!(prompt, "no terminal to confirm on, declining");
        return Ok(false);
    }
    term.write_str(&format!("{} [y/N] ", prompt))?;
    let answer = term.read_line()?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "ya" | "yes"
    ))
}

pub fn status(state: &mut AppState) -> Result<()> {
    let result = state.ctx.api.status()?;
    print!("{}", state.renderer.status(state.ctx.api.document())?);
    state.emit(&result)
}

pub fn new_document(state: &mut AppState, yes: bool) -> Result<()> {
    if state.ctx.api.document().is_dirty()
        && !confirm("Buang perubahan yang belum disimpan?", yes)?
    {
        return state.cancelled();
    }
    let result = state.api().new_document()?;
    state.emit(&result)
}

pub fn set(state: &mut AppState, assignments: &[String]) -> Result<()> {
    let result = state.api().set_fields(assignments)?;
    state.emit(&result)
}

pub fn fields(state: &mut AppState) -> Result<()> {
    print!(
        "{}",
        state.renderer.fields(state.ctx.api.document().record())?
    );
    Ok(())
}

pub fn assistant(state: &mut AppState, number: Option<usize>) -> Result<()> {
    match number {
        Some(n) => {
            let result = state.api().assign_assistant(n)?;
            state.emit(&result)
        }
        None => {
            let api = &state.ctx.api;
            print!(
                "{}",
                state.renderer.roster(api.roster(), api.document().record())?
            );
            Ok(())
        }
    }
}

pub fn assist(state: &mut AppState, text: &str) -> Result<()> {
    let assist = GeminiAssist::from_config(&state.ctx.config.assist)?;
    let result = state.api().assist_with(&assist, text)?;
    state.emit(&result)
}

pub fn save(state: &mut AppState) -> Result<()> {
    let result = state.api().save()?;
    state.emit(&result)
}

pub fn list(state: &mut AppState, search: Option<&str>) -> Result<()> {
    let result = state.ctx.api.list(search)?;
    if !result.listed_records.is_empty() {
        print!("{}", state.renderer.list(&result.listed_records)?);
    }
    state.emit(&result)
}

pub fn edit(state: &mut AppState, selector: &str, yes: bool) -> Result<()> {
    let api = &state.ctx.api;
    // Unknown selectors fall through to the API, which reports them.
    if api.document().is_dirty()
        && api.record(Some(selector)).is_ok()
        && !confirm("Buang perubahan yang belum disimpan?", yes)?
    {
        return state.cancelled();
    }
    let result = state.api().select_for_edit(selector)?;
    state.emit(&result)
}

pub fn delete(state: &mut AppState, selector: &str, yes: bool) -> Result<()> {
    let preview = state.ctx.api.delete_preview(selector)?;
    let Some(target) = preview.affected_records.first() else {
        return state.emit(&preview);
    };
    let name = target.record.display_name().unwrap_or("(tanpa nama)");
    if !confirm(&format!("Hapus data #{} {}?", target.position, name), yes)? {
        return state.cancelled();
    }
    let result = state.api().delete(selector)?;
    state.emit(&result)
}

pub fn show(state: &mut AppState, selector: Option<&str>) -> Result<()> {
    let record = state.ctx.api.record(selector)?;
    print!(
        "{}",
        state
            .renderer
            .certificate(&record, &state.ctx.config.letterhead)?
    );
    Ok(())
}

pub fn print(
    state: &mut AppState,
    selector: Option<&str>,
    output: Option<&Path>,
    fit: Option<u32>,
) -> Result<()> {
    let record = state.ctx.api.record(selector)?;
    let html = state
        .renderer
        .print_page(&record, &state.ctx.config.letterhead, fit)?;
    match output {
        Some(path) => {
            std::fs::write(path, html)?;
            tracing::info!(path = %path.display(), "print page written");
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::success(format!(
                "Halaman cetak disimpan: {}",
                path.display()
            )));
            state.emit(&result)
        }
        None => {
            print!("{}", html);
            Ok(())
        }
    }
}

pub fn paths(state: &mut AppState) -> Result<()> {
    let ctx = &state.ctx;
    let mut entries = vec![
        PathEntry::new("Data", &ctx.paths.data_dir),
        PathEntry::new("Records", Path::new(&ctx.api.store_location())),
    ];
    if let Some(draft) = ctx.api.draft_location() {
        entries.push(PathEntry::new("Draft", &PathBuf::from(draft)));
    }
    for file in ctx.paths.config_files() {
        entries.push(PathEntry::new("Config", &file));
    }
    print!("{}", state.renderer.paths(&entries)?);
    Ok(())
}

/// Resolved configuration as TOML, with the API key masked.
pub fn config(state: &mut AppState) -> Result<()> {
    let mut config = state.ctx.config.clone();
    if config.assist.api_key.is_some() {
        config.assist.api_key = Some(MASKED.to_string());
    }
    let text = toml::to_string(&config).map_err(|e| SklError::Config(e.to_string()))?;
    print!("{}", text);
    Ok(())
}
