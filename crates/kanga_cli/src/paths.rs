use anyhow::{anyhow, Context, Result};
use kanga_core::DEFAULT_DB_FILE_NAME;
use std::env;
use std::path::{Path, PathBuf};

const LOG_DIR_NAME: &str = "logs";

/// Resolved on-disk locations for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub db_file: PathBuf,
    pub log_dir: PathBuf,
}

impl AppPaths {
    /// Explicit paths win; otherwise the database sits next to the executable
    /// and logs go to `logs/` beside the database.
    pub fn resolve(db: Option<&Path>, log_dir: Option<&Path>) -> Result<Self> {
        let db_file = match db {
            Some(path) => path.to_path_buf(),
            None => default_db_path()?,
        };

        let log_dir = match log_dir {
            Some(path) => path.to_path_buf(),
            None => db_file
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(LOG_DIR_NAME),
        };

        Ok(Self { db_file, log_dir })
    }
}

fn default_db_path() -> Result<PathBuf> {
    let exe = env::current_exe().context("failed to locate the running executable")?;
    let dir = exe
        .parent()
        .ok_or_else(|| anyhow!("executable path '{}' has no parent", exe.display()))?;

    Ok(dir.join(DEFAULT_DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::AppPaths;
    use std::path::{Path, PathBuf};

    #[test]
    fn logs_default_to_database_sibling() {
        let paths = AppPaths::resolve(Some(Path::new("/data/tally/kanga.db")), None).unwrap();
        assert_eq!(paths.db_file, PathBuf::from("/data/tally/kanga.db"));
        assert_eq!(paths.log_dir, PathBuf::from("/data/tally/logs"));
    }

    #[test]
    fn default_database_lives_beside_executable() {
        let paths = AppPaths::resolve(None, Some(Path::new("/var/log/kanga"))).unwrap();
        let exe = std::env::current_exe().unwrap();
        assert_eq!(paths.db_file.parent(), exe.parent());
        assert!(paths.db_file.ends_with("kanga.db"));
        assert_eq!(paths.log_dir, PathBuf::from("/var/log/kanga"));
    }
}
