//! # Rendering
//!
//! Terminal output and the HTML print page both go through minijinja
//! templates (see `templates.rs`). Rust prepares finished strings and semantic
//! flags; templates arrange them and pick styles with the `style` filter.
//!
//! Width math stays in Rust because it must be Unicode aware. Templates get it
//! through two filters:
//! - `pad(width)`: left-aligns to a display width
//! - `center(width)`: centres within a display width

use super::styles::{self, names};
use super::templates::{
    CERTIFICATE_TEMPLATE, FIELDS_TEMPLATE, LIST_TEMPLATE, MESSAGES_TEMPLATE, PATHS_TEMPLATE,
    PRINT_TEMPLATE, ROSTER_TEMPLATE, STATUS_TEMPLATE,
};
use chrono::{DateTime, Utc};
use minijinja::{Environment, Value};
use serde::Serialize;
use sklapp::certificate::{CertificateView, ChoiceMark, Measurement};
use sklapp::commands::{CmdMessage, ListedRecord, MessageLevel};
use sklapp::config::LetterheadConfig;
use sklapp::document::{ActiveDocument, DocumentState};
use sklapp::error::{Result, SklError};
use sklapp::layout::ScaledPage;
use sklapp::model::{Field, Record};
use sklapp::roster::Assistant;
use std::path::Path;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width of the terminal certificate preview.
pub const PAGE_WIDTH: usize = 72;
pub const NAME_WIDTH: usize = 28;
pub const TIME_WIDTH: usize = 16;
const LABEL_WIDTH: usize = 22;
const KEY_WIDTH: usize = 20;
const MEASUREMENT_LABEL_WIDTH: usize = 15;

pub struct Renderer {
    env: Environment<'static>,
}

fn pad_to(text: &str, width: usize) -> String {
    let current = text.width();
    if current >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - current))
    }
}

fn center_in(text: &str, width: usize) -> String {
    let current = text.width();
    if current >= width {
        text.to_string()
    } else {
        format!("{}{}", " ".repeat((width - current) / 2), text)
    }
}

/// Cuts `text` to `width` display columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

impl Renderer {
    pub fn new(use_color: bool) -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_filter("style", move |value: Value, name: String| -> String {
            styles::apply(&name, &value.to_string(), use_color)
        });
        env.add_filter("pad", |value: Value, width: usize| -> String {
            pad_to(&value.to_string(), width)
        });
        env.add_filter("center", |value: Value, width: usize| -> String {
            center_in(&value.to_string(), width)
        });

        for (name, source) in [
            ("status", STATUS_TEMPLATE),
            ("list", LIST_TEMPLATE),
            ("fields", FIELDS_TEMPLATE),
            ("roster", ROSTER_TEMPLATE),
            ("certificate", CERTIFICATE_TEMPLATE),
            // The .html name turns on auto-escaping.
            ("print.html", PRINT_TEMPLATE),
            ("messages", MESSAGES_TEMPLATE),
            ("paths", PATHS_TEMPLATE),
        ] {
            env.add_template(name, source).map_err(template_error)?;
        }
        Ok(Self { env })
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.env
            .get_template(name)
            .and_then(|t| t.render(data))
            .map_err(template_error)
    }

    pub fn messages(&self, messages: &[CmdMessage]) -> Result<String> {
        if messages.is_empty() {
            return Ok(String::new());
        }
        let data = MessagesData {
            messages: messages
                .iter()
                .map(|m| MessageData {
                    content: m.content.clone(),
                    style: message_style(&m.level).to_string(),
                })
                .collect(),
        };
        self.render("messages", &data)
    }

    pub fn status(&self, doc: &ActiveDocument) -> Result<String> {
        let record = doc.record();
        let rows: Vec<FieldRow> = Field::ALL
            .iter()
            .filter(|f| !record.value(**f).trim().is_empty())
            .map(|f| FieldRow::new(*f, record))
            .collect();
        let data = StatusData {
            state: state_label(doc.state()).to_string(),
            state_style: match doc.state() {
                DocumentState::Editing => names::WARNING,
                DocumentState::Saved => names::SUCCESS,
                DocumentState::Empty => names::MUTED,
            }
            .to_string(),
            id_suffix: doc
                .id()
                .map(|id| format!("  #{}", id.short()))
                .unwrap_or_default(),
            saved_suffix: record
                .saved_at
                .map(|at| format!("  {}", format_time_ago(at).trim()))
                .unwrap_or_default(),
            blank_summary: format!("{} kolom kosong", Field::ALL.len() - rows.len()),
            empty: rows.is_empty(),
            rows,
        };
        self.render("status", &data)
    }

    pub fn list(&self, records: &[ListedRecord]) -> Result<String> {
        let index_width = records
            .iter()
            .map(|r| r.position.to_string().len())
            .max()
            .unwrap_or(1);
        let lines: Vec<ListLine> = records
            .iter()
            .map(|entry| {
                let r = &entry.record;
                let name = r
                    .display_name()
                    .map(|n| truncate_to_width(n, NAME_WIDTH))
                    .unwrap_or_else(|| "(tanpa nama)".to_string());
                // Mother column only when the baby name is the title.
                let mother = if r.baby_name.trim().is_empty() {
                    String::new()
                } else {
                    truncate_to_width(r.mother_name.trim(), NAME_WIDTH)
                };
                ListLine {
                    marker: if entry.is_active { "*" } else { " " }.to_string(),
                    index: format!("{:>width$}.", entry.position, width = index_width),
                    name: pad_to(&name, NAME_WIDTH),
                    mother: pad_to(&mother, NAME_WIDTH),
                    time_ago: r
                        .saved_at
                        .map(format_time_ago)
                        .unwrap_or_else(|| " ".repeat(TIME_WIDTH)),
                    id: r.id.as_ref().map(|id| id.short().to_string()).unwrap_or_default(),
                }
            })
            .collect();
        let data = ListData {
            empty: lines.is_empty(),
            lines,
        };
        self.render("list", &data)
    }

    pub fn fields(&self, record: &Record) -> Result<String> {
        let rows: Vec<FieldRow> = Field::ALL.iter().map(|f| FieldRow::new(*f, record)).collect();
        self.render("fields", &FieldsData { rows })
    }

    pub fn roster(&self, roster: &[Assistant], record: &Record) -> Result<String> {
        let entries: Vec<RosterEntry> = roster
            .iter()
            .enumerate()
            .map(|(i, a)| RosterEntry {
                number: format!("{:>2}.", i + 1),
                name: pad_to(&a.name, 36),
                nip: a.nip.clone(),
                marker: if !a.nip.is_empty() && a.nip == record.assistant_nip.trim() {
                    " *"
                } else {
                    ""
                }
                .to_string(),
            })
            .collect();
        self.render("roster", &RosterData { entries })
    }

    /// Text preview of the certificate, roughly as laid out on paper.
    pub fn certificate(&self, record: &Record, letterhead: &LetterheadConfig) -> Result<String> {
        let view = CertificateView::new(record, letterhead);
        let data = TextCertificate {
            gender_line: choice_line(&view.gender_marks),
            birth_type_line: choice_line(&view.birth_type_marks),
            measurement_lines: view
                .measurements
                .chunks(2)
                .map(|pair| {
                    let cells: Vec<String> = pair.iter().map(measurement_cell).collect();
                    match cells.as_slice() {
                        [left, right] => format!("{}{}", pad_to(left, PAGE_WIDTH / 2 - 2), right),
                        _ => cells.concat(),
                    }
                })
                .collect(),
            rule: "=".repeat(PAGE_WIDTH),
            width: PAGE_WIDTH,
            half: PAGE_WIDTH / 2,
            label_width: LABEL_WIDTH,
            view,
        };
        self.render("certificate", &data)
    }

    /// Standalone A4 HTML page. `fit` scales the on-screen page for a viewport
    /// of that many pixels; print output is always full size.
    pub fn print_page(
        &self,
        record: &Record,
        letterhead: &LetterheadConfig,
        fit: Option<u32>,
    ) -> Result<String> {
        let page = match fit {
            Some(px) => ScaledPage::for_width(f64::from(px)),
            None => ScaledPage::natural(),
        };
        let view = CertificateView::new(record, letterhead);
        let measurement_rows = view.measurements.chunks(2).map(<[_]>::to_vec).collect();
        let data = PrintData {
            view,
            document_title: match record.display_name() {
                Some(name) => format!("SKL - {}", name),
                None => "SKL".to_string(),
            },
            transform: page.transform(),
            wrapper_height: page
                .is_scaled()
                .then(|| format!("{:.2}mm", page.wrapper_height_mm())),
            measurement_rows,
        };
        self.render("print.html", &data)
    }

    pub fn paths(&self, entries: &[PathEntry]) -> Result<String> {
        self.render("paths", &PathsData { entries })
    }
}

fn template_error(e: minijinja::Error) -> SklError {
    SklError::Api(format!("template error: {}", e))
}

fn message_style(level: &MessageLevel) -> &'static str {
    match level {
        MessageLevel::Info => names::INFO,
        MessageLevel::Success => names::SUCCESS,
        MessageLevel::Warning => names::WARNING,
        MessageLevel::Error => names::ERROR,
    }
}

fn state_label(state: DocumentState) -> &'static str {
    match state {
        DocumentState::Empty => "Formulir kosong",
        DocumentState::Editing => "Sedang diisi (belum disimpan)",
        DocumentState::Saved => "Tersimpan",
    }
}

/// `[Perempuan]  Laki-laki`: every option, the selected one bracketed.
fn choice_line(marks: &[ChoiceMark]) -> String {
    marks
        .iter()
        .map(|m| {
            if m.selected {
                format!("[{}]", m.label)
            } else {
                format!(" {} ", m.label)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn measurement_cell(m: &Measurement) -> String {
    format!("{}: {} {}", pad_to(&m.label, MEASUREMENT_LABEL_WIDTH), m.value, m.unit)
        .trim_end()
        .to_string()
}

/// Relative time, right aligned to `TIME_WIDTH`.
pub fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let text = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", text, width = TIME_WIDTH)
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: String,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

#[derive(Serialize)]
struct FieldRow {
    key: String,
    label: String,
    value: String,
    choices: String,
    value_style: &'static str,
}

impl FieldRow {
    fn new(field: Field, record: &Record) -> Self {
        let value = record.value(field).trim();
        let choices = field.choices();
        Self {
            key: pad_to(field.key(), KEY_WIDTH),
            label: pad_to(field.label(), LABEL_WIDTH),
            value: if value.is_empty() { "-" } else { value }.to_string(),
            choices: if choices.is_empty() {
                String::new()
            } else {
                format!("  ({})", choices.join(" / "))
            },
            value_style: if value.is_empty() { names::BLANK } else { names::VALUE },
        }
    }
}

#[derive(Serialize)]
struct StatusData {
    state: String,
    state_style: String,
    id_suffix: String,
    saved_suffix: String,
    rows: Vec<FieldRow>,
    blank_summary: String,
    empty: bool,
}

#[derive(Serialize)]
struct ListLine {
    marker: String,
    index: String,
    name: String,
    mother: String,
    time_ago: String,
    id: String,
}

#[derive(Serialize)]
struct ListData {
    lines: Vec<ListLine>,
    empty: bool,
}

#[derive(Serialize)]
struct FieldsData {
    rows: Vec<FieldRow>,
}

#[derive(Serialize)]
struct RosterEntry {
    number: String,
    name: String,
    nip: String,
    marker: String,
}

#[derive(Serialize)]
struct RosterData {
    entries: Vec<RosterEntry>,
}

#[derive(Serialize)]
struct TextCertificate {
    view: CertificateView,
    gender_line: String,
    birth_type_line: String,
    measurement_lines: Vec<String>,
    rule: String,
    width: usize,
    half: usize,
    label_width: usize,
}

#[derive(Serialize)]
struct PrintData {
    view: CertificateView,
    document_title: String,
    transform: Option<String>,
    wrapper_height: Option<String>,
    measurement_rows: Vec<Vec<Measurement>>,
}

/// One line of `skl paths`.
#[derive(Serialize)]
pub struct PathEntry {
    label: String,
    path: String,
    note: String,
}

impl PathEntry {
    pub fn new(label: &str, path: &Path) -> Self {
        Self {
            label: label.to_string(),
            path: path.display().to_string(),
            note: if path.exists() {
                String::new()
            } else {
                "  (belum ada)".to_string()
            },
        }
    }
}

#[derive(Serialize)]
struct PathsData<'a> {
    entries: &'a [PathEntry],
}

#[cfg(test)]
mod tests {
    use super::*;
    use sklapp::model::{Gender, RecordId};

    fn renderer() -> Renderer {
        Renderer::new(false).unwrap()
    }

    fn listed(position: usize, baby: &str, mother: &str, active: bool) -> ListedRecord {
        ListedRecord {
            position,
            is_active: active,
            record: Record {
                id: Some(RecordId::new(format!("id-{}", position))),
                baby_name: baby.to_string(),
                mother_name: mother.to_string(),
                saved_at: Some(Utc::now()),
                ..Record::default()
            },
        }
    }

    #[test]
    fn test_render_messages() {
        let output = renderer()
            .messages(&[
                CmdMessage::success("Data tersimpan: Aisyah"),
                CmdMessage::warning("Hati-hati"),
            ])
            .unwrap();
        assert_eq!(output, "Data tersimpan: Aisyah\nHati-hati\n");
    }

    #[test]
    fn test_render_messages_empty() {
        assert!(renderer().messages(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_render_empty_list() {
        let output = renderer().list(&[]).unwrap();
        assert!(output.contains("Belum ada data tersimpan"));
    }

    #[test]
    fn test_render_list_lines() {
        let output = renderer()
            .list(&[listed(1, "Budi", "Rina", false), listed(2, "Aisyah", "Siti", true)])
            .unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("1."));
        assert!(lines[0].contains("Budi"));
        assert!(lines[1].contains("Aisyah"));
        assert!(lines[1].contains("Siti"));
        assert!(lines[1].starts_with('*'));
        assert!(!lines[0].contains('*'));
    }

    #[test]
    fn test_render_status_empty_document() {
        let output = renderer().status(&ActiveDocument::new()).unwrap();
        assert!(output.contains("Formulir kosong"));
        assert!(output.contains("skl set"));
    }

    #[test]
    fn test_render_status_lists_filled_fields() {
        let mut doc = ActiveDocument::new();
        doc.set(Field::BabyName, "Aisyah").unwrap();
        doc.set(Field::Gender, "P").unwrap();
        let output = renderer().status(&doc).unwrap();
        assert!(output.contains("Sedang diisi"));
        assert!(output.contains("Nama Bayi"));
        assert!(output.contains("Perempuan"));
        assert!(!output.contains("Nama Ayah"));
        assert!(output.contains("21 kolom kosong"));
    }

    #[test]
    fn test_render_fields_shows_choices() {
        let output = renderer().fields(&Record::new()).unwrap();
        assert_eq!(output.lines().count(), Field::ALL.len());
        assert!(output.contains("gender"));
        assert!(output.contains("(Laki-laki / Perempuan)"));
        assert!(output.contains("assistantNip"));
    }

    #[test]
    fn test_render_roster_marks_current() {
        let roster = vec![
            Assistant::new("A, A.Md.Keb", "111"),
            Assistant::new("B, A.Md.Keb", "222"),
        ];
        let record = Record {
            assistant_nip: "222".into(),
            ..Record::default()
        };
        let output = renderer().roster(&roster, &record).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1."));
        assert!(!lines[0].contains('*'));
        assert!(lines[1].ends_with('*'));
    }

    #[test]
    fn test_render_certificate_text() {
        let record = Record {
            baby_name: "Aisyah".into(),
            gender: Gender::Female,
            weight: "3200".into(),
            ..Record::default()
        };
        let output = renderer()
            .certificate(&record, &LetterheadConfig::default())
            .unwrap();
        assert!(output.contains("SURAT KETERANGAN LAHIR"));
        assert!(output.contains("UPT PUSKESMAS CIPANAS"));
        assert!(output.contains("AISYAH"));
        assert!(output.contains("[Perempuan]"));
        assert!(output.contains("3200 gram"));
        assert!(output.contains("dr. Arie Andaryani"));
    }

    #[test]
    fn test_render_print_page() {
        let record = Record {
            baby_name: "Aisyah <Putri>".into(),
            ..Record::default()
        };
        let output = renderer()
            .print_page(&record, &LetterheadConfig::default(), None)
            .unwrap();
        assert!(output.starts_with("<!DOCTYPE html>"));
        assert!(output.contains("@page"));
        assert!(output.contains("AISYAH &lt;PUTRI&gt;"));
        assert!(output.contains("STEMPEL KAKI BAYI"));
        assert!(!output.contains("scale("));
    }

    #[test]
    fn test_render_print_page_scaled() {
        let output = renderer()
            .print_page(&Record::new(), &LetterheadConfig::default(), Some(414))
            .unwrap();
        assert!(output.contains("transform: scale(0.4962)"));
        assert!(output.contains("height: 147.38mm"));
    }

    #[test]
    fn test_render_paths_marks_missing() {
        let dir = tempfile::tempdir().unwrap();
        let entries = vec![
            PathEntry::new("Data", dir.path()),
            PathEntry::new("Draft", &dir.path().join("skl_draft.json")),
        ];
        let output = renderer().paths(&entries).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(!lines[0].contains("belum ada"));
        assert!(lines[1].contains("(belum ada)"));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Aisyah", 10), "Aisyah");
        assert_eq!(truncate_to_width("Aisyah Putri Ramadhani", 8), "Aisyah …");
    }

    #[test]
    fn test_choice_line() {
        let marks = vec![
            ChoiceMark {
                label: "Laki-laki".into(),
                selected: false,
            },
            ChoiceMark {
                label: "Perempuan".into(),
                selected: true,
            },
        ];
        assert_eq!(choice_line(&marks), " Laki-laki  [Perempuan]");
    }

    #[test]
    fn test_format_time_ago_width() {
        let text = format_time_ago(Utc::now() - chrono::Duration::hours(2));
        assert_eq!(text.width(), TIME_WIDTH);
        assert!(text.contains("hours ago"));
    }
}
