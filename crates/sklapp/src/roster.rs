//! Attending midwives who sign the certificate.
//!
//! Picking an entry fills both `assistantName` and `assistantNip` in one step.
//! The built-in list can be replaced through the `assistants` config key.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assistant {
    pub name: String,
    pub nip: String,
}

impl Assistant {
    pub fn new(name: impl Into<String>, nip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nip: nip.into(),
        }
    }
}

const DEFAULT_ASSISTANTS: [(&str, &str); 12] = [
    ("TITIEK FATHICHA, A.Md.Keb", "197202121992032008"),
    ("ENENG CAHYAWATI, S.Tr.Keb.,Bdn.", "197705292007012011"),
    ("ENUNG NURHAYATI, A.Md.Keb", "197412282019052002"),
    ("NILANDA ASDIANTI, A.Md.Keb", "198602132017042004"),
    ("YATI NURHAYATI, A.Md.Keb", "197805192006042007"),
    ("LENI MAULANI, A.Md.Keb", "198101162008012005"),
    ("INTAN ISMAYATI, A.Md.Keb", "199002132023212001"),
    ("RANTI YULIANI, A.Md.Keb", "199007272023212001"),
    ("INTHAN SEFTIANY R, A.Md.Keb", "198909042023212007"),
    ("DINI NOVIANTI NINGRUM, A.Md.Keb", "198811082023212001"),
    ("TINA RATNASARI, A.Md.Keb", "199101232025212046"),
    ("ROHMAH ROFIANI, S.Keb.,Bdn.", "198904092025212070"),
];

pub fn default_roster() -> Vec<Assistant> {
    DEFAULT_ASSISTANTS
        .iter()
        .map(|(name, nip)| Assistant::new(*name, *nip))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roster_is_populated() {
        let roster = default_roster();
        assert_eq!(roster.len(), 12);
        assert!(roster.iter().all(|a| a.nip.len() == 18));
    }
}
