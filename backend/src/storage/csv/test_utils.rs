//! Temp-directory test fixtures for the CSV repositories.
//!
//! The directory is removed when the environment is dropped, even if the
//! test panics.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::binding_repository::BindingRepository;
use super::connection::CsvConnection;
use super::patient_repository::PatientRepository;
use super::specialist_repository::SpecialistRepository;

pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("care_scheduler_test_")?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }
}

/// All three repositories over one temp directory
pub struct RepositoryTestHelper {
    pub env: TestEnvironment,
    pub specialist_repo: SpecialistRepository,
    pub patient_repo: PatientRepository,
    pub binding_repo: BindingRepository,
}

impl RepositoryTestHelper {
    pub async fn new() -> Result<Self> {
        let env = TestEnvironment::new().await?;

        Ok(RepositoryTestHelper {
            specialist_repo: SpecialistRepository::new(env.connection.clone()),
            patient_repo: PatientRepository::new(env.connection.clone()),
            binding_repo: BindingRepository::new(env.connection.clone()),
            env,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_environment_cleanup() -> Result<()> {
        let base_path;
        {
            let env = TestEnvironment::new().await?;
            base_path = env.base_directory().to_path_buf();
            assert!(base_path.exists());
            std::fs::write(base_path.join("scratch.txt"), "data")?;
        }
        assert!(!base_path.exists());
        Ok(())
    }
}
