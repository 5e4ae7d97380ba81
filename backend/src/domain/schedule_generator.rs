//! # Candidate Schedule Generator
//!
//! Builds up to [`SCHEDULE_OPTION_COUNT`] alternative weekly slates of
//! appointments for a patient from the current specialist roster.
//!
//! Each option walks the patient's specialties in intake order. For every
//! specialty with at least one available specialist:
//!
//! - the weekday is picked round-robin over the candidate weekdays by
//!   specialty index, and the date is its next occurrence on or after the
//!   patient's start date
//! - the specialist is picked round-robin over the filtered roster by option
//!   index
//! - a flexible patient alternates Morning (even options) and Afternoon
//!   (odd options)
//! - the base time slot is drawn uniformly from the period's slot table
//!
//! Generation never fails. Specialties nobody can serve are left out, as are
//! appointments whose date would run past the end of the calendar, and
//! options that end up empty are dropped.
//!
//! The date nudge applied to neighborhood slots past the first one does not
//! guarantee that two specialties of the same option avoid the same
//! (date, time). Confirmation does not check for that either.

use chrono::Duration;
use rand::Rng;
use shared::{Period, PeriodPreference};
use tracing::{debug, warn};

use super::models::patient::Patient;
use super::models::schedule::{Appointment, ScheduleOption};
use super::models::specialist::Specialist;
use super::slots::{next_occurrence, normalize_weekend, slot_neighborhood, slots_for, working_weekday};

/// Number of alternative options offered per request
pub const SCHEDULE_OPTION_COUNT: usize = 4;

/// Time slots proposed per specialty per option. Only the base slot today.
pub const SLOT_NEIGHBORHOOD_SIZE: usize = 1;

/// Generate candidate schedule options for a patient
pub fn generate_schedule_options<R: Rng>(
    patient: &Patient,
    roster: &[Specialist],
    rng: &mut R,
) -> Vec<ScheduleOption> {
    generate_with_neighborhood(patient, roster, rng, SLOT_NEIGHBORHOOD_SIZE)
}

pub(crate) fn generate_with_neighborhood<R: Rng>(
    patient: &Patient,
    roster: &[Specialist],
    rng: &mut R,
    neighborhood_size: usize,
) -> Vec<ScheduleOption> {
    let candidates = patient.candidate_weekdays();
    let spans_several_specialties = patient.specialties.len() > 1;

    let mut options = Vec::with_capacity(SCHEDULE_OPTION_COUNT);

    for option_index in 0..SCHEDULE_OPTION_COUNT {
        let period = period_for_option(patient.period_preference, option_index);
        let table = slots_for(period);
        let mut option = ScheduleOption::default();

        for (specialty_index, specialty) in patient.specialties.iter().enumerate() {
            let eligible: Vec<&Specialist> = roster
                .iter()
                .filter(|specialist| specialist.can_serve(*specialty))
                .collect();

            if eligible.is_empty() {
                debug!("No available specialist for {}, skipping", specialty);
                continue;
            }

            let weekday = candidates[specialty_index % candidates.len()];
            let Some(base_date) = next_occurrence(patient.start_date, weekday) else {
                warn!(
                    "No {} on or after {} within the calendar, skipping {}",
                    weekday, patient.start_date, specialty
                );
                continue;
            };
            let specialist = eligible[option_index % eligible.len()];

            let base_slot = table[rng.gen_range(0..table.len())];
            let neighborhood = slot_neighborhood(table, base_slot, neighborhood_size);

            for (slot_index, time) in neighborhood.into_iter().enumerate() {
                let date = if spans_several_specialties && slot_index > 0 {
                    match base_date
                        .checked_add_signed(Duration::days((slot_index / 2) as i64))
                        .and_then(normalize_weekend)
                    {
                        Some(date) => date,
                        None => continue,
                    }
                } else {
                    base_date
                };

                option.appointments.push(Appointment {
                    weekday: working_weekday(date),
                    date,
                    time,
                    specialist: specialist.clone(),
                    specialty: *specialty,
                    period,
                });
            }
        }

        // sort_by_key is stable, so equal keys keep specialty order
        option.appointments.sort_by_key(Appointment::sort_key);

        if !option.is_empty() {
            options.push(option);
        }
    }

    debug!(
        "Generated {} schedule options for patient {}",
        options.len(),
        patient.id
    );

    options
}

fn period_for_option(preference: PeriodPreference, option_index: usize) -> Period {
    match preference {
        PeriodPreference::Morning => Period::Morning,
        PeriodPreference::Afternoon => Period::Afternoon,
        PeriodPreference::Flexible if option_index % 2 == 0 => Period::Morning,
        PeriodPreference::Flexible => Period::Afternoon,
    }
}
