//! Domain model for a bookable specialist.

use serde::{Deserialize, Serialize};
use shared::Specialty;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialist {
    pub id: u32,
    pub name: String,
    pub specialty: Specialty,
    pub available: bool,
}

impl Specialist {
    /// True when this specialist can be offered for the given specialty
    pub fn can_serve(&self, specialty: Specialty) -> bool {
        self.available && self.specialty == specialty
    }

    /// Case-insensitive name comparison used for duplicate detection
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }

    /// Next sequential ID after the highest one in use
    pub fn next_id(existing: &[Specialist]) -> u32 {
        existing.iter().map(|s| s.id).max().map_or(1, |max| max + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specialist(id: u32, name: &str, specialty: Specialty, available: bool) -> Specialist {
        Specialist {
            id,
            name: name.to_string(),
            specialty,
            available,
        }
    }

    #[test]
    fn test_can_serve() {
        let s = specialist(1, "Dr. João Silva", Specialty::Neurology, true);
        assert!(s.can_serve(Specialty::Neurology));
        assert!(!s.can_serve(Specialty::Psychology));

        let off = specialist(2, "Dr. Pedro Santos", Specialty::Neurology, false);
        assert!(!off.can_serve(Specialty::Neurology));
    }

    #[test]
    fn test_has_name_ignores_case_and_padding() {
        let s = specialist(1, "Dra. Ana Costa", Specialty::Physiotherapy, true);
        assert!(s.has_name("dra. ana costa"));
        assert!(s.has_name("  DRA. ANA COSTA "));
        assert!(!s.has_name("Ana Costa"));
    }

    #[test]
    fn test_next_id() {
        assert_eq!(Specialist::next_id(&[]), 1);
        let roster = vec![
            specialist(3, "A", Specialty::Neurology, true),
            specialist(7, "B", Specialty::Psychology, true),
        ];
        assert_eq!(Specialist::next_id(&roster), 8);
    }
}
