use crate::assist::{AssistGate, AssistTicket, Proposal, TextAssist};
use crate::commands::{CmdMessage, CmdResult};
use crate::document::ActiveDocument;
use crate::error::{Result, SklError};

/// Opens an assist request for the current document.
///
/// Empty notes are refused before anything is sent. Fails with
/// [`SklError::AssistBusy`] while another request is outstanding.
pub fn begin(gate: &mut AssistGate, doc: &ActiveDocument, free_text: &str) -> Result<AssistTicket> {
    if free_text.trim().is_empty() {
        return Err(SklError::Validation(
            "Tuliskan catatan kelahiran terlebih dahulu".to_string(),
        ));
    }
    gate.begin(doc)
}

/// Closes an assist request and applies its outcome.
///
/// A ticket the gate is not waiting on is discarded with a warning and leaves
/// the gate alone. The proposal is overlaid only if the document is still the
/// one the request was made for. A failure leaves the document untouched and
/// comes back as an error message in the result, not as an `Err`.
pub fn complete(
    gate: &mut AssistGate,
    doc: &mut ActiveDocument,
    ticket: AssistTicket,
    outcome: Result<Proposal>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if !gate.finish(&ticket) {
        tracing::warn!(generation = ticket.generation(), "assist response for unknown request");
        result.add_message(CmdMessage::warning(
            "Hasil catatan diabaikan karena permintaannya tidak dikenal",
        ));
        return Ok(result.with_document(doc));
    }

    let proposal = match outcome {
        Ok(proposal) => proposal,
        Err(e) => {
            tracing::warn!(error = %e, "text assist failed");
            result.add_message(CmdMessage::error(format!(
                "Gagal memproses catatan: {}",
                e
            )));
            return Ok(result.with_document(doc));
        }
    };

    if ticket.generation() != doc.generation() {
        tracing::info!(
            requested = ticket.generation(),
            current = doc.generation(),
            "discarding stale assist response"
        );
        result.add_message(CmdMessage::warning(
            "Hasil catatan diabaikan karena formulir sudah berganti",
        ));
        return Ok(result.with_document(doc));
    }

    let report = doc.overlay(proposal.iter());
    for (field, value) in &report.rejected {
        result.add_message(CmdMessage::warning(format!(
            "{}: nilai \"{}\" tidak dikenali, dilewati",
            field.label(),
            value
        )));
    }
    if report.applied.is_empty() {
        result.add_message(CmdMessage::info("Tidak ada data yang bisa diisi dari catatan"));
    } else {
        result.add_message(CmdMessage::success(format!(
            "{} kolom diisi dari catatan",
            report.applied.len()
        )));
    }
    result.overlay = Some(report);
    Ok(result.with_document(doc))
}

/// Runs one request to completion against `assist`.
pub fn run(
    gate: &mut AssistGate,
    doc: &mut ActiveDocument,
    assist: &dyn TextAssist,
    free_text: &str,
) -> Result<CmdResult> {
    let ticket = begin(gate, doc, free_text)?;
    let outcome = assist.propose(free_text);
    complete(gate, doc, ticket, outcome)
}
