use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Writer};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// CsvConnection owns the data directory and the table files inside it
#[derive(Clone, Debug)]
pub struct CsvConnection {
    base_directory: Arc<PathBuf>,
}

impl CsvConnection {
    /// Open a connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: Arc::new(base_path),
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of a table file inside the data directory
    pub fn table_path(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }

    /// Create the table file with its header row if it does not exist yet
    pub fn ensure_table_exists(&self, file_name: &str, header: &[&str]) -> Result<()> {
        let path = self.table_path(file_name);
        if !path.exists() {
            debug!("Creating table {} with header", path.display());
            self.write_table(file_name, header, std::iter::empty::<Vec<String>>())?;
        }
        Ok(())
    }

    /// Read every data row of a table, header excluded
    pub fn read_table(&self, file_name: &str, header: &[&str]) -> Result<Vec<StringRecord>> {
        self.ensure_table_exists(file_name, header)?;

        let path = self.table_path(file_name);
        let file = File::open(&path).with_context(|| format!("Failed to open {}", path.display()))?;
        // rows with a missing or extra column are left for the caller to reject
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(BufReader::new(file));

        let mut records = Vec::new();
        for result in reader.records() {
            records.push(result.with_context(|| format!("Malformed row in {}", path.display()))?);
        }
        Ok(records)
    }

    /// Replace a table's content through a temp file and rename
    pub fn write_table<I, R>(&self, file_name: &str, header: &[&str], rows: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator,
        R::Item: AsRef<[u8]>,
    {
        let path = self.table_path(file_name);
        let temp_path = path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let mut writer = Writer::from_writer(BufWriter::new(file));

            writer.write_record(header)?;
            for row in rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }

        fs::rename(&temp_path, &path)?;
        Ok(())
    }
}

/// Join a multi-valued field with `;`
pub(crate) fn join_values<T: ToString>(values: &[T]) -> String {
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(";")
}

/// Split a `;`-joined field, ignoring empty parts
pub(crate) fn split_values<T: std::str::FromStr>(field: &str) -> Result<Vec<T>, T::Err> {
    field
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect()
}
