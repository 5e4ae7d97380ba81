use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use csv::StringRecord;
use tracing::{info, warn};

use super::connection::CsvConnection;
use crate::domain::models::binding::Binding;
use crate::storage::traits::BindingStorage;

const BINDINGS_FILE: &str = "bindings.csv";
const HEADER: [&str; 11] = [
    "id",
    "patient_id",
    "patient_name",
    "specialist_id",
    "specialist_name",
    "weekday",
    "date",
    "time",
    "specialty",
    "period",
    "created_at",
];

/// CSV-backed store of committed appointments
#[derive(Clone)]
pub struct BindingRepository {
    connection: CsvConnection,
}

impl BindingRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_bindings(&self) -> Result<Vec<Binding>> {
        let records = self.connection.read_table(BINDINGS_FILE, &HEADER)?;

        let mut bindings = Vec::with_capacity(records.len());
        for (line, record) in records.iter().enumerate() {
            match parse_record(record) {
                Ok(binding) => bindings.push(binding),
                Err(e) => warn!("Skipping unreadable row {} in {}: {}", line + 2, BINDINGS_FILE, e),
            }
        }
        Ok(bindings)
    }

    fn write_bindings(&self, bindings: &[Binding]) -> Result<()> {
        let rows = bindings.iter().map(|b| {
            vec![
                b.id.clone(),
                b.patient_id.clone(),
                b.patient_name.clone(),
                b.specialist_id.to_string(),
                b.specialist_name.clone(),
                b.weekday.to_string(),
                b.date.format("%Y-%m-%d").to_string(),
                b.time.to_string(),
                b.specialty.to_string(),
                b.period.to_string(),
                b.created_at.to_rfc3339(),
            ]
        });
        self.connection.write_table(BINDINGS_FILE, &HEADER, rows)
    }
}

fn parse_record(record: &StringRecord) -> Result<Binding> {
    let field = |index: usize| record.get(index).ok_or_else(|| anyhow!("missing column {}", HEADER[index]));

    Ok(Binding {
        id: field(0)?.to_string(),
        patient_id: field(1)?.to_string(),
        patient_name: field(2)?.to_string(),
        specialist_id: field(3)?.parse().context("invalid specialist_id")?,
        specialist_name: field(4)?.to_string(),
        weekday: field(5)?.parse()?,
        date: NaiveDate::parse_from_str(field(6)?, "%Y-%m-%d").context("invalid date")?,
        time: field(7)?.parse()?,
        specialty: field(8)?.parse()?,
        period: field(9)?.parse()?,
        created_at: DateTime::parse_from_rfc3339(field(10)?)
            .context("invalid created_at")?
            .with_timezone(&Utc),
    })
}

#[async_trait]
impl BindingStorage for BindingRepository {
    async fn list_bindings(&self) -> Result<Vec<Binding>> {
        self.read_bindings()
    }

    async fn store_bindings(&self, bindings: &[Binding]) -> Result<()> {
        let mut all = self.read_bindings()?;
        all.extend_from_slice(bindings);
        // single rename, so the batch lands whole or not at all
        self.write_bindings(&all)?;
        info!("Stored {} bindings", bindings.len());
        Ok(())
    }

    async fn delete_binding(&self, binding_id: &str) -> Result<bool> {
        let mut all = self.read_bindings()?;
        let before = all.len();
        all.retain(|b| b.id != binding_id);

        if all.len() == before {
            warn!("Binding not found for deletion: {}", binding_id);
            return Ok(false);
        }

        self.write_bindings(&all)?;
        info!("Deleted binding {}", binding_id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;
    use shared::{Period, Specialty, TimeSlot, Weekday};

    fn binding(specialist_id: u32, time: TimeSlot) -> Binding {
        Binding {
            id: Binding::generate_id(),
            patient_id: "patient::1".to_string(),
            patient_name: "Lucas Pereira".to_string(),
            specialist_id,
            specialist_name: "Dr. Carlos Lima".to_string(),
            weekday: Weekday::Wednesday,
            date: NaiveDate::from_ymd_opt(2025, 1, 8).unwrap(),
            time,
            specialty: Specialty::SpeechTherapy,
            period: Period::Afternoon,
            created_at: DateTime::parse_from_rfc3339("2025-01-02T09:15:00+00:00")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    #[tokio::test]
    async fn test_store_batch_and_list() -> Result<()> {
        let env = TestEnvironment::new().await?;
        let repo = BindingRepository::new(env.connection.clone());
        let batch = vec![
            binding(3, TimeSlot::from_hm(13, 0)),
            binding(3, TimeSlot::from_hm(16, 30)),
        ];

        repo.store_bindings(&batch).await?;

        assert_eq!(repo.list_bindings().await?, batch);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_binding() -> Result<()> {
        let env = TestEnvironment::new().await?;
        let repo = BindingRepository::new(env.connection.clone());
        let keep = binding(3, TimeSlot::from_hm(13, 0));
        let drop = binding(3, TimeSlot::from_hm(14, 0));
        repo.store_bindings(&[keep.clone(), drop.clone()]).await?;

        assert!(repo.delete_binding(&drop.id).await?);
        assert!(!repo.delete_binding(&drop.id).await?);
        assert!(!repo.delete_binding("binding::unknown").await?);

        assert_eq!(repo.list_bindings().await?, vec![keep]);
        Ok(())
    }
}
