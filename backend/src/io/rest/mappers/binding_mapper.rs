use shared::{
    Binding as SharedBinding, BindingConflict as SharedBindingConflict, BindingListResponse,
    ConfirmOptionResponse, ConflictReportResponse, WeekDay, WeekSlotRow, WeeklySchedule,
};

use crate::domain::commands::schedule::{BindingConflict, ConfirmOptionResult};
use crate::domain::models::binding::Binding as DomainBinding;
use crate::domain::week_view::WeekGrid;

/// Mapper from bindings and the views built on them to their wire form
pub struct BindingMapper;

impl BindingMapper {
    pub fn to_dto(domain: DomainBinding) -> SharedBinding {
        SharedBinding {
            id: domain.id,
            patient_id: domain.patient_id,
            patient_name: domain.patient_name,
            specialist_id: domain.specialist_id,
            specialist_name: domain.specialist_name,
            weekday: domain.weekday,
            date: domain.date,
            time: domain.time,
            specialty: domain.specialty,
            period: domain.period,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_list_dto(bindings: Vec<DomainBinding>) -> BindingListResponse {
        BindingListResponse {
            bindings: bindings.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_confirm_dto(result: ConfirmOptionResult) -> ConfirmOptionResponse {
        ConfirmOptionResponse {
            bindings: result.bindings.into_iter().map(Self::to_dto).collect(),
            success_message: result.success_message,
        }
    }

    pub fn to_conflict_report(conflicts: Vec<BindingConflict>) -> ConflictReportResponse {
        ConflictReportResponse {
            conflicts: conflicts
                .into_iter()
                .map(|c| SharedBindingConflict {
                    specialist_id: c.specialist_id,
                    date: c.date,
                    time: c.time,
                    binding_ids: c.binding_ids,
                })
                .collect(),
        }
    }

    pub fn to_weekly_schedule(grid: WeekGrid) -> WeeklySchedule {
        WeeklySchedule {
            week_start: grid.week_start,
            week_end: grid.week_end,
            label: grid.label,
            days: grid
                .days
                .into_iter()
                .map(|d| WeekDay {
                    weekday: d.weekday,
                    date: d.date,
                    is_today: d.is_today,
                })
                .collect(),
            rows: grid
                .rows
                .into_iter()
                .map(|row| WeekSlotRow {
                    time: row.time,
                    period: row.period,
                    cells: row
                        .cells
                        .into_iter()
                        .map(|cell| cell.into_iter().map(Self::to_dto).collect())
                        .collect(),
                })
                .collect(),
        }
    }
}
