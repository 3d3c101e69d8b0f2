use serde::{Deserialize, Serialize};

/// Kind of class session a subject's block requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    Teoria,
    Laboratorio,
    Taller,
    Practica,
    Ayudantia,
    Tutoria,
}

impl Activity {
    /// Workshop/lab activities are exempt from the continuous-block cap.
    pub fn exempt_from_continuity_cap(self) -> bool {
        matches!(self, Activity::Taller | Activity::Laboratorio)
    }
}

/// A professor's workload category, used to relax continuity/gap rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractType {
    FullTime,
    HalfTime,
    PartTime,
}

impl ContractType {
    /// Derives a contract type from a professor's total weekly subject hours,
    /// mirroring how the original system infers it rather than takes it as input.
    pub fn infer(total_hours: u32) -> ContractType {
        match total_hours {
            16..=18 => ContractType::FullTime,
            12..=14 => ContractType::HalfTime,
            _ => ContractType::PartTime,
        }
    }
}
