//! Tax liability tags
//!
//! A liability tag names a person and the kind of tax a quantity accrues
//! to, written `Person(kind)`, e.g. `Joe(incomeTax)`.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LiabilityKind {
    IncomeTax,
    NationalInsurance,
    CapitalGains,
}

impl LiabilityKind {
    pub const ALL: [LiabilityKind; 3] = [
        LiabilityKind::IncomeTax,
        LiabilityKind::NationalInsurance,
        LiabilityKind::CapitalGains,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LiabilityKind::IncomeTax => "incomeTax",
            LiabilityKind::NationalInsurance => "NI",
            LiabilityKind::CapitalGains => "CGT",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "incomeTax" => Some(LiabilityKind::IncomeTax),
            "NI" => Some(LiabilityKind::NationalInsurance),
            "CGT" | "cgt" => Some(LiabilityKind::CapitalGains),
            _ => None,
        }
    }
}

/// One person's liability for one kind of tax
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Liability {
    pub person: String,
    pub kind: LiabilityKind,
}

impl Liability {
    pub fn new(person: &str, kind: LiabilityKind) -> Self {
        Self {
            person: person.to_string(),
            kind,
        }
    }
}

impl fmt::Display for Liability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.person, self.kind.as_str())
    }
}
