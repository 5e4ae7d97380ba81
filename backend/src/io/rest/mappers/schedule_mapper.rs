use shared::{Appointment as SharedAppointment, ScheduleOption as SharedScheduleOption, ScheduleOptionsResponse};

use super::specialist_mapper::SpecialistMapper;
use crate::domain::commands::schedule::GenerateOptionsResult;
use crate::domain::models::schedule::{Appointment, ScheduleOption};

/// Mapper from generated options to their wire form
pub struct ScheduleMapper;

impl ScheduleMapper {
    pub fn to_appointment_dto(domain: Appointment) -> SharedAppointment {
        SharedAppointment {
            weekday: domain.weekday,
            date: domain.date,
            time: domain.time,
            specialist: SpecialistMapper::to_dto(domain.specialist),
            specialty: domain.specialty,
            period: domain.period,
        }
    }

    pub fn to_option_dto(domain: ScheduleOption) -> SharedScheduleOption {
        SharedScheduleOption {
            appointments: domain
                .appointments
                .into_iter()
                .map(Self::to_appointment_dto)
                .collect(),
        }
    }

    pub fn to_options_response(result: GenerateOptionsResult) -> ScheduleOptionsResponse {
        ScheduleOptionsResponse {
            patient_id: result.patient.id,
            patient_name: result.patient.name,
            options: result.options.into_iter().map(Self::to_option_dto).collect(),
        }
    }
}
