//! # Record Model
//!
//! A [`Record`] is one birth certificate: a flat set of text fields, two
//! enumerations ([`Gender`], [`BirthType`]) and an optional [`RecordId`].
//!
//! The JSON shape (camelCase keys, enum labels as plain strings) is the
//! persisted format of the store, so it must stay stable.
//!
//! ## Identifier
//!
//! `id` is `None` for a record that was never saved. The store assigns one on
//! first save and never reuses it.
//!
//! ## Fields
//!
//! [`Field`] names every editable field so clients can address them by key
//! (`babyName`, `baby_name` and `baby-name` all resolve to the same field) and
//! so text-assist proposals can be applied generically.

use crate::error::{Result, SklError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// First eight characters, for listings.
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

fn normalize_choice(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_' | '–'))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    #[serde(rename = "Laki-laki")]
    Male,
    #[serde(rename = "Perempuan")]
    Female,
}

impl Gender {
    pub const CHOICES: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Unspecified => "",
            Gender::Male => "Laki-laki",
            Gender::Female => "Perempuan",
        }
    }
}

impl FromStr for Gender {
    type Err = SklError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_choice(s).as_str() {
            "" => Ok(Gender::Unspecified),
            "lakilaki" | "l" | "male" | "m" => Ok(Gender::Male),
            "perempuan" | "p" | "female" | "f" => Ok(Gender::Female),
            _ => Err(SklError::InvalidValue {
                field: Field::Gender.key().to_string(),
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BirthType {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    #[serde(rename = "Tunggal")]
    Single,
    #[serde(rename = "Kembar 2")]
    Twins,
    #[serde(rename = "Kembar 3")]
    Triplets,
    #[serde(rename = "Lainnya")]
    Other,
}

impl BirthType {
    pub const CHOICES: [BirthType; 4] = [
        BirthType::Single,
        BirthType::Twins,
        BirthType::Triplets,
        BirthType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BirthType::Unspecified => "",
            BirthType::Single => "Tunggal",
            BirthType::Twins => "Kembar 2",
            BirthType::Triplets => "Kembar 3",
            BirthType::Other => "Lainnya",
        }
    }
}

impl FromStr for BirthType {
    type Err = SklError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_choice(s).as_str() {
            "" => Ok(BirthType::Unspecified),
            "tunggal" | "single" => Ok(BirthType::Single),
            "kembar2" | "kembar" | "twins" => Ok(BirthType::Twins),
            "kembar3" | "triplets" => Ok(BirthType::Triplets),
            "lainnya" | "other" => Ok(BirthType::Other),
            _ => Err(SklError::InvalidValue {
                field: Field::BirthType.key().to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Decodes an enumeration from its label, falling back to the empty value.
///
/// Stored data written by older clients may carry labels we no longer know;
/// one bad value must not make the whole store unreadable.
fn lenient_choice<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(match raw {
        None => T::default(),
        Some(s) => s.parse().unwrap_or_else(|_| {
            tracing::warn!(value = %s, "unrecognised choice in stored record, treating as empty");
            T::default()
        }),
    })
}

/// Every editable field of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    CertificateNo,
    Day,
    Date,
    Time,
    Gender,
    BirthType,
    BirthOrder,
    GestationAge,
    Weight,
    HeadCircumference,
    Length,
    ChestCircumference,
    BabyName,
    MotherName,
    MotherKtp,
    MotherJob,
    FatherName,
    FatherKtp,
    FatherJob,
    Address,
    SigningDate,
    AssistantName,
    AssistantNip,
}

impl Field {
    pub const ALL: [Field; 23] = [
        Field::CertificateNo,
        Field::Day,
        Field::Date,
        Field::Time,
        Field::Gender,
        Field::BirthType,
        Field::BirthOrder,
        Field::GestationAge,
        Field::Weight,
        Field::HeadCircumference,
        Field::Length,
        Field::ChestCircumference,
        Field::BabyName,
        Field::MotherName,
        Field::MotherKtp,
        Field::MotherJob,
        Field::FatherName,
        Field::FatherKtp,
        Field::FatherJob,
        Field::Address,
        Field::SigningDate,
        Field::AssistantName,
        Field::AssistantNip,
    ];

    /// The JSON key, also used on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Field::CertificateNo => "certificateNo",
            Field::Day => "day",
            Field::Date => "date",
            Field::Time => "time",
            Field::Gender => "gender",
            Field::BirthType => "birthType",
            Field::BirthOrder => "birthOrder",
            Field::GestationAge => "gestationAge",
            Field::Weight => "weight",
            Field::HeadCircumference => "headCircumference",
            Field::Length => "length",
            Field::ChestCircumference => "chestCircumference",
            Field::BabyName => "babyName",
            Field::MotherName => "motherName",
            Field::MotherKtp => "motherKtp",
            Field::MotherJob => "motherJob",
            Field::FatherName => "fatherName",
            Field::FatherKtp => "fatherKtp",
            Field::FatherJob => "fatherJob",
            Field::Address => "address",
            Field::SigningDate => "signingDate",
            Field::AssistantName => "assistantName",
            Field::AssistantNip => "assistantNip",
        }
    }

    /// Label as printed on the form.
    pub fn label(self) -> &'static str {
        match self {
            Field::CertificateNo => "Nomor Surat",
            Field::Day => "Hari",
            Field::Date => "Tanggal",
            Field::Time => "Pukul",
            Field::Gender => "Jenis Kelamin",
            Field::BirthType => "Jenis Kelahiran",
            Field::BirthOrder => "Anak Ke-",
            Field::GestationAge => "Usia Gestasi",
            Field::Weight => "Berat Lahir",
            Field::HeadCircumference => "Lingkar Kepala",
            Field::Length => "Panjang Badan",
            Field::ChestCircumference => "Lingkar Dada",
            Field::BabyName => "Nama Bayi",
            Field::MotherName => "Nama Ibu",
            Field::MotherKtp => "NIK Ibu",
            Field::MotherJob => "Pekerjaan Ibu",
            Field::FatherName => "Nama Ayah",
            Field::FatherKtp => "NIK Ayah",
            Field::FatherJob => "Pekerjaan Ayah",
            Field::Address => "Alamat",
            Field::SigningDate => "Tanggal Tanda Tangan",
            Field::AssistantName => "Nama Penolong",
            Field::AssistantNip => "NIP Penolong",
        }
    }

    /// Accepted labels for enumerated fields, empty for free text.
    pub fn choices(self) -> Vec<&'static str> {
        match self {
            Field::Gender => Gender::CHOICES.iter().map(|g| g.label()).collect(),
            Field::BirthType => BirthType::CHOICES.iter().map(|b| b.label()).collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = SklError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize_choice(s);
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.key().to_lowercase() == wanted)
            .ok_or_else(|| SklError::UnknownField(s.to_string()))
    }
}

/// One birth certificate (BirthData).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub certificate_no: String,
    pub day: String,
    pub date: String,
    pub time: String,
    #[serde(deserialize_with = "lenient_choice")]
    pub gender: Gender,
    #[serde(deserialize_with = "lenient_choice")]
    pub birth_type: BirthType,
    pub birth_order: String,
    pub gestation_age: String,
    pub weight: String,
    pub head_circumference: String,
    pub length: String,
    pub chest_circumference: String,
    pub baby_name: String,
    pub mother_name: String,
    pub mother_ktp: String,
    pub mother_job: String,
    pub father_name: String,
    pub father_ktp: String,
    pub father_job: String,
    pub address: String,
    pub signing_date: String,
    pub assistant_name: String,
    pub assistant_nip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_saved(&self) -> bool {
        self.id.as_ref().is_some_and(|id| !id.is_blank())
    }

    /// Current value of a field; enumerations yield their label.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Gender => self.gender.label(),
            Field::BirthType => self.birth_type.label(),
            Field::CertificateNo => &self.certificate_no,
            Field::Day => &self.day,
            Field::Date => &self.date,
            Field::Time => &self.time,
            Field::BirthOrder => &self.birth_order,
            Field::GestationAge => &self.gestation_age,
            Field::Weight => &self.weight,
            Field::HeadCircumference => &self.head_circumference,
            Field::Length => &self.length,
            Field::ChestCircumference => &self.chest_circumference,
            Field::BabyName => &self.baby_name,
            Field::MotherName => &self.mother_name,
            Field::MotherKtp => &self.mother_ktp,
            Field::MotherJob => &self.mother_job,
            Field::FatherName => &self.father_name,
            Field::FatherKtp => &self.father_ktp,
            Field::FatherJob => &self.father_job,
            Field::Address => &self.address,
            Field::SigningDate => &self.signing_date,
            Field::AssistantName => &self.assistant_name,
            Field::AssistantNip => &self.assistant_nip,
        }
    }

    /// Sets a field from its textual form. Enumerations must parse.
    pub fn set(&mut self, field: Field, value: &str) -> Result<()> {
        match field {
            Field::Gender => self.gender = value.parse()?,
            Field::BirthType => self.birth_type = value.parse()?,
            other => {
                if let Some(slot) = self.text_mut(other) {
                    *slot = value.to_string();
                }
            }
        }
        Ok(())
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        let slot = match field {
            Field::Gender | Field::BirthType => return None,
            Field::CertificateNo => &mut self.certificate_no,
            Field::Day => &mut self.day,
            Field::Date => &mut self.date,
            Field::Time => &mut self.time,
            Field::BirthOrder => &mut self.birth_order,
            Field::GestationAge => &mut self.gestation_age,
            Field::Weight => &mut self.weight,
            Field::HeadCircumference => &mut self.head_circumference,
            Field::Length => &mut self.length,
            Field::ChestCircumference => &mut self.chest_circumference,
            Field::BabyName => &mut self.baby_name,
            Field::MotherName => &mut self.mother_name,
            Field::MotherKtp => &mut self.mother_ktp,
            Field::MotherJob => &mut self.mother_job,
            Field::FatherName => &mut self.father_name,
            Field::FatherKtp => &mut self.father_ktp,
            Field::FatherJob => &mut self.father_job,
            Field::Address => &mut self.address,
            Field::SigningDate => &mut self.signing_date,
            Field::AssistantName => &mut self.assistant_name,
            Field::AssistantNip => &mut self.assistant_nip,
        };
        Some(slot)
    }

    /// True when at least one of the two identifying names is filled in.
    pub fn has_identifying_name(&self) -> bool {
        !self.baby_name.trim().is_empty() || !self.mother_name.trim().is_empty()
    }

    /// Baby name, else mother name, for listings.
    pub fn display_name(&self) -> Option<&str> {
        [self.baby_name.trim(), self.mother_name.trim()]
            .into_iter()
            .find(|name| !name.is_empty())
    }

    /// True when no field carries a value.
    pub fn is_blank(&self) -> bool {
        Field::ALL.iter().all(|f| self.value(*f).trim().is_empty())
    }
}
