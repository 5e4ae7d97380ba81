use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use csv::StringRecord;
use tracing::{info, warn};

use super::connection::CsvConnection;
use crate::domain::models::specialist::Specialist;
use crate::storage::traits::SpecialistStorage;

const SPECIALISTS_FILE: &str = "specialists.csv";
const HEADER: [&str; 4] = ["id", "name", "specialty", "available"];

/// CSV-backed specialist roster
#[derive(Clone)]
pub struct SpecialistRepository {
    connection: CsvConnection,
}

impl SpecialistRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_specialists(&self) -> Result<Vec<Specialist>> {
        let records = self.connection.read_table(SPECIALISTS_FILE, &HEADER)?;

        let mut specialists = Vec::with_capacity(records.len());
        for (line, record) in records.iter().enumerate() {
            match parse_record(record) {
                Ok(specialist) => specialists.push(specialist),
                Err(e) => warn!("Skipping unreadable row {} in {}: {}", line + 2, SPECIALISTS_FILE, e),
            }
        }
        Ok(specialists)
    }

    fn write_specialists(&self, specialists: &[Specialist]) -> Result<()> {
        let rows = specialists.iter().map(|s| {
            vec![
                s.id.to_string(),
                s.name.clone(),
                s.specialty.to_string(),
                s.available.to_string(),
            ]
        });
        self.connection.write_table(SPECIALISTS_FILE, &HEADER, rows)
    }
}

fn parse_record(record: &StringRecord) -> Result<Specialist> {
    let field = |index: usize| record.get(index).ok_or_else(|| anyhow!("missing column {}", HEADER[index]));

    Ok(Specialist {
        id: field(0)?.parse().context("invalid id")?,
        name: field(1)?.to_string(),
        specialty: field(2)?.parse()?,
        available: field(3)?.parse().context("invalid available flag")?,
    })
}

#[async_trait]
impl SpecialistStorage for SpecialistRepository {
    async fn list_specialists(&self) -> Result<Vec<Specialist>> {
        self.read_specialists()
    }

    async fn store_specialists(&self, specialists: &[Specialist]) -> Result<()> {
        let mut all = self.read_specialists()?;
        all.extend_from_slice(specialists);
        self.write_specialists(&all)?;
        info!("Stored {} specialists", specialists.len());
        Ok(())
    }

    async fn update_specialist(&self, specialist: &Specialist) -> Result<()> {
        let mut all = self.read_specialists()?;
        let existing = all
            .iter_mut()
            .find(|s| s.id == specialist.id)
            .ok_or_else(|| anyhow!("Specialist {} is not stored", specialist.id))?;
        *existing = specialist.clone();
        self.write_specialists(&all)?;
        info!("Updated specialist {}", specialist.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;
    use shared::Specialty;

    fn specialist(id: u32, name: &str, specialty: Specialty) -> Specialist {
        Specialist {
            id,
            name: name.to_string(),
            specialty,
            available: true,
        }
    }

    #[tokio::test]
    async fn test_empty_roster() -> Result<()> {
        let env = TestEnvironment::new().await?;
        let repo = SpecialistRepository::new(env.connection.clone());

        assert!(repo.list_specialists().await?.is_empty());
        assert!(env.base_directory().join(SPECIALISTS_FILE).exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_store_and_list() -> Result<()> {
        let env = TestEnvironment::new().await?;
        let repo = SpecialistRepository::new(env.connection.clone());

        repo.store_specialists(&[
            specialist(1, "Dr. João Silva", Specialty::Neurology),
            specialist(2, "Dr. Carlos Lima", Specialty::SpeechTherapy),
        ])
        .await?;
        repo.store_specialists(&[specialist(3, "Dra. Carla Mendes", Specialty::Psychology)])
            .await?;

        let listed = repo.list_specialists().await?;
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].name, "Dr. João Silva");
        assert_eq!(listed[1].specialty, Specialty::SpeechTherapy);
        assert_eq!(listed[2].id, 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_specialist() -> Result<()> {
        let env = TestEnvironment::new().await?;
        let repo = SpecialistRepository::new(env.connection.clone());
        repo.store_specialists(&[specialist(1, "Dr. João Silva", Specialty::Neurology)])
            .await?;

        let mut off = specialist(1, "Dr. João Silva", Specialty::Neurology);
        off.available = false;
        repo.update_specialist(&off).await?;

        assert!(!repo.list_specialists().await?[0].available);
        assert!(repo
            .update_specialist(&specialist(9, "Ghost", Specialty::Neurology))
            .await
            .is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_unreadable_rows_are_skipped() -> Result<()> {
        let env = TestEnvironment::new().await?;
        std::fs::write(
            env.base_directory().join(SPECIALISTS_FILE),
            "id,name,specialty,available\n1,Dr. A,Neurology,true\nx,Dr. B,Neurology,true\n3,Dr. C,Cardiology,true\n4,Dr. D\n5,Dr. E,Psychology,false\n",
        )?;
        let repo = SpecialistRepository::new(env.connection.clone());

        let listed = repo.list_specialists().await?;

        assert_eq!(listed.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 5]);
        assert!(!listed[1].available);
        Ok(())
    }
}
