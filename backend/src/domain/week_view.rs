//! # Week View Service
//!
//! Lays committed bindings out on a Monday-to-Friday grid with one row per
//! time slot, and keeps the week the operator is currently looking at.

use chrono::{Duration, NaiveDate};
use shared::{Period, TimeSlot, Weekday};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

use super::error::DomainError;
use super::models::binding::Binding;
use super::slots::{all_slots, week_start, within_scheduling_range};

/// One column of the grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridDay {
    pub weekday: Weekday,
    pub date: NaiveDate,
    pub is_today: bool,
}

/// One time-slot row; `cells[i]` belongs to `days[i]`
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub time: TimeSlot,
    pub period: Period,
    pub cells: Vec<Vec<Binding>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekGrid {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub label: String,
    pub days: Vec<GridDay>,
    pub rows: Vec<GridRow>,
}

#[derive(Clone)]
pub struct WeekViewService {
    focus_week: Arc<Mutex<NaiveDate>>,
}

impl WeekViewService {
    /// Start focused on the week containing `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            focus_week: Arc::new(Mutex::new(week_start(today).unwrap_or(today))),
        }
    }

    /// Monday of the focused week
    pub fn focus_week(&self) -> NaiveDate {
        *self.focus()
    }

    /// Focus the week containing `date`
    pub fn set_focus(&self, date: NaiveDate) -> Result<NaiveDate, DomainError> {
        let monday = schedulable_monday(date)?;
        *self.focus() = monday;
        info!("Week focus set to {}", monday);
        Ok(monday)
    }

    pub fn navigate_previous_week(&self) -> Result<NaiveDate, DomainError> {
        self.shift_focus(-7)
    }

    pub fn navigate_next_week(&self) -> Result<NaiveDate, DomainError> {
        self.shift_focus(7)
    }

    /// Move the focus by `days`. The focus stays put when the target week
    /// leaves the supported range.
    fn shift_focus(&self, days: i64) -> Result<NaiveDate, DomainError> {
        let mut focus = self.focus();
        let moved = focus
            .checked_add_signed(Duration::days(days))
            .filter(|date| within_scheduling_range(*date))
            .ok_or_else(|| DomainError::DateOutOfRange(format!("{} days from week of {}", days, *focus)))?;
        *focus = moved;
        info!("Week focus moved to {}", moved);
        Ok(moved)
    }

    fn focus(&self) -> MutexGuard<'_, NaiveDate> {
        // the guarded value is a plain date, so a poisoned lock is still usable
        self.focus_week.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Build the grid for the week containing `anchor`. Bindings dated
    /// outside that week are left out.
    pub fn build_week(
        &self,
        anchor: NaiveDate,
        bindings: &[Binding],
        today: NaiveDate,
    ) -> Result<WeekGrid, DomainError> {
        let monday = schedulable_monday(anchor)?;
        let friday = monday
            .checked_add_signed(Duration::days(4))
            .ok_or_else(|| DomainError::DateOutOfRange(anchor.to_string()))?;

        let days: Vec<GridDay> = Weekday::ALL
            .iter()
            .map(|weekday| {
                // never past `friday`, checked above
                let date = monday + Duration::days(weekday.index() as i64);
                GridDay {
                    weekday: *weekday,
                    date,
                    is_today: date == today,
                }
            })
            .collect();

        let rows = all_slots()
            .map(|(period, time)| GridRow {
                time,
                period,
                cells: days
                    .iter()
                    .map(|day| {
                        bindings
                            .iter()
                            .filter(|b| b.date == day.date && b.weekday == day.weekday && b.time == time)
                            .cloned()
                            .collect()
                    })
                    .collect(),
            })
            .collect();

        Ok(WeekGrid {
            week_start: monday,
            week_end: friday,
            label: format!("{} - {}", monday.format("%d/%m/%Y"), friday.format("%d/%m/%Y")),
            days,
            rows,
        })
    }
}

/// Monday of the week containing `date`, if that week is one the grid can show
fn schedulable_monday(date: NaiveDate) -> Result<NaiveDate, DomainError> {
    week_start(date)
        .filter(|monday| within_scheduling_range(*monday))
        .ok_or_else(|| DomainError::DateOutOfRange(date.to_string()))
}
