//! The printed certificate as plain data.
//!
//! [`CertificateView`] projects a [`Record`] and the letterhead into the text
//! that appears on paper: blanks become dotted placeholders, names are
//! uppercased, choice fields list every option with the selected one marked.
//! Renderers (terminal preview, HTML print page) only lay it out.

use crate::config::LetterheadConfig;
use crate::model::{BirthType, Gender, Record};
use serde::Serialize;

pub const TITLE: &str = "SURAT KETERANGAN LAHIR";
pub const LONG_BLANK: &str = "................................";
pub const SHORT_BLANK: &str = "...";
const NUMBER_BLANK: &str = "___________________";
const DAY_BLANK: &str = "...........";
const DATE_BLANK: &str = "................";
const TIME_BLANK: &str = "..:..";
const SIGN_BLANK: &str = "....................";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceMark {
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub label: String,
    pub value: String,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledLine {
    pub label: String,
    pub value: String,
    /// Names are set bold on paper.
    pub emphasized: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signature {
    pub heading: String,
    pub role: String,
    pub name: String,
    pub nip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateView {
    pub letterhead: LetterheadConfig,
    pub title: String,
    pub number: String,
    pub day: String,
    pub date: String,
    pub time: String,
    pub gender: String,
    pub gender_marks: Vec<ChoiceMark>,
    pub birth_type: String,
    pub birth_type_marks: Vec<ChoiceMark>,
    /// Two per row on paper.
    pub measurements: Vec<Measurement>,
    pub place: String,
    pub baby_name: String,
    pub parents: Vec<LabeledLine>,
    pub head: Signature,
    pub assistant: Signature,
}

fn or_blank(value: &str, blank: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        blank.to_string()
    } else {
        value.to_string()
    }
}

/// Uppercased value, or the long dotted placeholder.
pub fn upper_or_blank(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        LONG_BLANK.to_string()
    } else {
        value.to_uppercase()
    }
}

fn measurement(label: &str, value: &str, unit: &str) -> Measurement {
    Measurement {
        label: label.to_string(),
        value: or_blank(value, SHORT_BLANK),
        unit: unit.to_string(),
    }
}

fn parent(label: &str, value: &str, emphasized: bool) -> LabeledLine {
    LabeledLine {
        label: label.to_string(),
        value: upper_or_blank(value),
        emphasized,
    }
}

impl CertificateView {
    pub fn new(record: &Record, letterhead: &LetterheadConfig) -> Self {
        let gender_marks = Gender::CHOICES
            .iter()
            .map(|g| ChoiceMark {
                label: g.label().to_string(),
                selected: *g == record.gender,
            })
            .collect();
        let birth_type_marks = BirthType::CHOICES
            .iter()
            .map(|b| ChoiceMark {
                label: b.label().to_string(),
                selected: *b == record.birth_type,
            })
            .collect();

        Self {
            letterhead: letterhead.clone(),
            title: TITLE.to_string(),
            number: or_blank(&record.certificate_no, NUMBER_BLANK),
            day: or_blank(&record.day, DAY_BLANK),
            date: or_blank(&record.date, DATE_BLANK),
            time: or_blank(&record.time, TIME_BLANK),
            gender: or_blank(record.gender.label(), DATE_BLANK),
            gender_marks,
            birth_type: or_blank(record.birth_type.label(), DATE_BLANK),
            birth_type_marks,
            measurements: vec![
                measurement("Anak Ke-", &record.birth_order, ""),
                measurement("Usia Gestasi", &record.gestation_age, ""),
                measurement("Berat Lahir", &record.weight, "gram"),
                measurement("Lingkar Kepala", &record.head_circumference, "cm"),
                measurement("Panjang Badan", &record.length, "cm"),
                measurement("Lingkar dada", &record.chest_circumference, "cm"),
            ],
            place: letterhead.facility.to_uppercase(),
            baby_name: upper_or_blank(&record.baby_name),
            parents: vec![
                parent("Nama Ibu", &record.mother_name, true),
                parent("No. KTP", &record.mother_ktp, false),
                parent("Nama Ayah", &record.father_name, true),
                parent("No. KTP", &record.father_ktp, false),
                parent("Alamat", &record.address, false),
            ],
            head: Signature {
                heading: "Mengetahui,".to_string(),
                role: letterhead.head_title.clone(),
                name: letterhead.head_name.clone(),
                nip: letterhead.head_nip.clone(),
            },
            assistant: Signature {
                heading: format!(
                    "{}, {}",
                    letterhead.city,
                    or_blank(&record.signing_date, SIGN_BLANK)
                ),
                role: "Penolong".to_string(),
                name: upper_or_blank(&record.assistant_name),
                nip: or_blank(&record.assistant_nip, SIGN_BLANK),
            },
        }
    }
}
