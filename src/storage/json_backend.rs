use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::Result;
use crate::expense::Expense;
use crate::utils::{app_data_dir, ensure_dir};

use super::StorageBackend;

const EXPENSES_FILE: &str = "expenses.json";
const TMP_SUFFIX: &str = "tmp";

/// File-backed storage: the whole collection is one pretty-printed JSON array,
/// written atomically (tmp file + rename).
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
    expenses_file: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        let expenses_file = root.join(EXPENSES_FILE);
        Ok(Self {
            root,
            expenses_file,
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn expenses_path(&self) -> &Path {
        &self.expenses_file
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, expenses: &[Expense]) -> Result<()> {
        let json = serde_json::to_string_pretty(expenses)?;
        let tmp = tmp_path(&self.expenses_file);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.expenses_file)?;
        Ok(())
    }

    fn load(&self) -> Result<Vec<Expense>> {
        if !self.expenses_file.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.expenses_file)?;
        Ok(serde_json::from_str(&data)?)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
