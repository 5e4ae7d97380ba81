pub mod binding_mapper;
pub mod patient_mapper;
pub mod schedule_mapper;
pub mod specialist_mapper;

pub use binding_mapper::BindingMapper;
pub use patient_mapper::PatientMapper;
pub use schedule_mapper::ScheduleMapper;
pub use specialist_mapper::SpecialistMapper;
