//! # Scheduling Context
//!
//! Caller-owned state for the scheduling core: the specialist roster, the
//! registered patients and the live bindings. Generation reads a snapshot of
//! it, confirmation appends to it and removal takes from it. Nothing here
//! touches storage.

use chrono::Utc;
use rand::Rng;
use std::collections::BTreeMap;

use super::commands::schedule::BindingConflict;
use super::error::DomainError;
use super::models::binding::Binding;
use super::models::patient::Patient;
use super::models::schedule::ScheduleOption;
use super::models::specialist::Specialist;
use super::schedule_generator::generate_schedule_options;

#[derive(Debug, Clone, Default)]
pub struct SchedulingContext {
    specialists: Vec<Specialist>,
    patients: Vec<Patient>,
    bindings: Vec<Binding>,
}

impl SchedulingContext {
    pub fn new(specialists: Vec<Specialist>, patients: Vec<Patient>, bindings: Vec<Binding>) -> Self {
        Self {
            specialists,
            patients,
            bindings,
        }
    }

    pub fn specialists(&self) -> &[Specialist] {
        &self.specialists
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn patient(&self, patient_id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == patient_id)
    }

    pub fn specialist(&self, specialist_id: u32) -> Option<&Specialist> {
        self.specialists.iter().find(|s| s.id == specialist_id)
    }

    pub fn add_patient(&mut self, patient: Patient) {
        self.patients.push(patient);
    }

    pub fn add_specialists(&mut self, specialists: impl IntoIterator<Item = Specialist>) {
        self.specialists.extend(specialists);
    }

    /// Replace the stored copy of a specialist, matched by ID
    pub fn update_specialist(&mut self, specialist: Specialist) -> Result<(), DomainError> {
        let slot = self
            .specialists
            .iter_mut()
            .find(|s| s.id == specialist.id)
            .ok_or(DomainError::SpecialistNotFound(specialist.id))?;
        *slot = specialist;
        Ok(())
    }

    /// Generate options for a registered patient against the current roster
    pub fn generate_for<R: Rng>(
        &self,
        patient_id: &str,
        rng: &mut R,
    ) -> Result<Vec<ScheduleOption>, DomainError> {
        let patient = self
            .patient(patient_id)
            .ok_or_else(|| DomainError::PatientNotFound(patient_id.to_string()))?;
        Ok(generate_schedule_options(patient, &self.specialists, rng))
    }

    /// Commit every appointment of `option` for `patient` and return the new
    /// bindings. They are built in full before the live list is extended.
    pub fn confirm_option(&mut self, patient: &Patient, option: &ScheduleOption) -> Vec<Binding> {
        let created = build_bindings(patient, option);
        self.bindings.extend(created.iter().cloned());
        created
    }

    /// Drop bindings that were confirmed but could not be persisted
    pub fn rollback_bindings(&mut self, created: &[Binding]) {
        self.bindings.retain(|b| !created.iter().any(|c| c.id == b.id));
    }

    /// Remove a live binding. Unknown IDs leave the collection untouched.
    pub fn remove_binding(&mut self, binding_id: &str) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|b| b.id != binding_id);
        self.bindings.len() != before
    }

    /// Groups of live bindings that book one specialist twice at the same time
    pub fn conflicts(&self) -> Vec<BindingConflict> {
        let mut by_key: BTreeMap<_, Vec<String>> = BTreeMap::new();
        for binding in &self.bindings {
            by_key.entry(binding.booking_key()).or_default().push(binding.id.clone());
        }

        by_key
            .into_iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|((specialist_id, date, time), binding_ids)| BindingConflict {
                specialist_id,
                date,
                time,
                binding_ids,
            })
            .collect()
    }
}

/// Commit `option` for `patient` on top of `bindings`, returning the updated
/// collection
pub fn confirm_option(patient: &Patient, option: &ScheduleOption, mut bindings: Vec<Binding>) -> Vec<Binding> {
    bindings.extend(build_bindings(patient, option));
    bindings
}

fn build_bindings(patient: &Patient, option: &ScheduleOption) -> Vec<Binding> {
    let created_at = Utc::now();
    option
        .appointments
        .iter()
        .map(|appointment| Binding::from_appointment(patient, appointment, created_at))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shared::{PeriodPreference, Specialty};

    fn roster() -> Vec<Specialist> {
        vec![
            Specialist {
                id: 1,
                name: "Dr. João Silva".to_string(),
                specialty: Specialty::Neurology,
                available: true,
            },
            Specialist {
                id: 2,
                name: "Dra. Maria Fernanda".to_string(),
                specialty: Specialty::Psychology,
                available: true,
            },
        ]
    }

    fn patient() -> Patient {
        Patient {
            id: "patient::abc".to_string(),
            name: "Lucas Pereira".to_string(),
            specialties: vec![Specialty::Neurology, Specialty::Psychology],
            notes: String::new(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            period_preference: PeriodPreference::Morning,
            preferred_weekdays: vec![],
            created_at: Utc::now(),
        }
    }

    fn context() -> SchedulingContext {
        SchedulingContext::new(roster(), vec![patient()], vec![])
    }

    #[test]
    fn test_generate_for_unknown_patient() {
        let ctx = context();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            ctx.generate_for("patient::missing", &mut rng),
            Err(DomainError::PatientNotFound("patient::missing".to_string()))
        );
    }

    #[test]
    fn test_confirm_copies_every_appointment() {
        let mut ctx = context();
        let mut rng = StdRng::seed_from_u64(1);
        let options = ctx.generate_for("patient::abc", &mut rng).unwrap();
        let chosen = options[2].clone();
        let p = patient();

        let created = ctx.confirm_option(&p, &chosen);

        assert_eq!(created.len(), chosen.len());
        assert_eq!(ctx.bindings().len(), chosen.len());
        for (binding, appointment) in created.iter().zip(&chosen.appointments) {
            assert_eq!(binding.patient_id, p.id);
            assert_eq!(binding.patient_name, p.name);
            assert_eq!(binding.specialist_id, appointment.specialist.id);
            assert_eq!(binding.specialist_name, appointment.specialist.name);
            assert_eq!(binding.specialty, appointment.specialty);
            assert_eq!(binding.date, appointment.date);
            assert_eq!(binding.time, appointment.time);
            assert_eq!(binding.weekday, appointment.weekday);
            assert_eq!(binding.period, appointment.period);
        }
    }

    #[test]
    fn test_confirm_assigns_distinct_ids() {
        let mut ctx = context();
        let mut rng = StdRng::seed_from_u64(2);
        let options = ctx.generate_for("patient::abc", &mut rng).unwrap();
        let p = patient();

        ctx.confirm_option(&p, &options[0]);
        ctx.confirm_option(&p, &options[1]);

        let mut ids: Vec<_> = ctx.bindings().iter().map(|b| b.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_free_confirm_returns_updated_collection() {
        let mut ctx = context();
        let mut rng = StdRng::seed_from_u64(3);
        let options = ctx.generate_for("patient::abc", &mut rng).unwrap();
        let p = patient();
        let existing = ctx.confirm_option(&p, &options[0]);

        let updated = confirm_option(&p, &options[1], existing.clone());

        assert_eq!(updated.len(), existing.len() + options[1].len());
        assert_eq!(&updated[..existing.len()], &existing[..]);
    }

    #[test]
    fn test_remove_binding() {
        let mut ctx = context();
        let mut rng = StdRng::seed_from_u64(4);
        let options = ctx.generate_for("patient::abc", &mut rng).unwrap();
        let created = ctx.confirm_option(&patient(), &options[0]);

        assert!(ctx.remove_binding(&created[0].id));
        assert_eq!(ctx.bindings().len(), created.len() - 1);
        assert!(!ctx.remove_binding(&created[0].id));
    }

    #[test]
    fn test_remove_unknown_binding_is_noop() {
        let mut ctx = context();
        let mut rng = StdRng::seed_from_u64(5);
        let options = ctx.generate_for("patient::abc", &mut rng).unwrap();
        ctx.confirm_option(&patient(), &options[0]);
        let before = ctx.bindings().to_vec();

        assert!(!ctx.remove_binding("binding::does-not-exist"));
        assert_eq!(ctx.bindings(), &before[..]);
    }

    #[test]
    fn test_rollback_bindings() {
        let mut ctx = context();
        let mut rng = StdRng::seed_from_u64(6);
        let options = ctx.generate_for("patient::abc", &mut rng).unwrap();
        let kept = ctx.confirm_option(&patient(), &options[0]);
        let dropped = ctx.confirm_option(&patient(), &options[1]);

        ctx.rollback_bindings(&dropped);

        assert_eq!(ctx.bindings(), &kept[..]);
    }

    #[test]
    fn test_conflicts_report_double_bookings() {
        let mut ctx = context();
        let mut rng = StdRng::seed_from_u64(7);
        let options = ctx.generate_for("patient::abc", &mut rng).unwrap();
        let p = patient();

        // confirming the same option twice double-books every appointment
        let first = ctx.confirm_option(&p, &options[0]);
        assert!(ctx.conflicts().is_empty());
        let second = ctx.confirm_option(&p, &options[0]);

        let conflicts = ctx.conflicts();
        assert_eq!(conflicts.len(), first.len());
        for conflict in &conflicts {
            assert_eq!(conflict.binding_ids.len(), 2);
        }
        assert!(conflicts
            .iter()
            .flat_map(|c| &c.binding_ids)
            .all(|id| first.iter().chain(&second).any(|b| &b.id == id)));
    }

    #[test]
    fn test_update_specialist() {
        let mut ctx = context();
        let mut off = ctx.specialist(1).unwrap().clone();
        off.available = false;

        ctx.update_specialist(off).unwrap();
        assert!(!ctx.specialist(1).unwrap().available);

        let ghost = Specialist {
            id: 99,
            name: "Nobody".to_string(),
            specialty: Specialty::Neurology,
            available: true,
        };
        assert_eq!(ctx.update_specialist(ghost), Err(DomainError::SpecialistNotFound(99)));
    }
}
