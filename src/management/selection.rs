use std::{fmt, io::Error, path::PathBuf};

#[derive(Debug)]
pub enum SelectionError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for SelectionError {
    fn from(err: Error) -> Self {
        SelectionError::IoError(err)
    }
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::IoError(e) => write!(f, "{}", e),
            SelectionError::SerdeError(e) => write!(f, "malformed selection file: {}", e),
        }
    }
}

impl std::error::Error for SelectionError {}

/// Playlist ids the user picked for merge and stats.
///
/// Membership is what matters; ids are kept in the order they were added,
/// which is the order merge concatenates playlists in.
pub struct SelectionManager {
    path: PathBuf,
    selected: Vec<String>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::at(Self::selection_path())
    }

    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
            selected: Vec::new(),
        }
    }

    pub async fn load() -> Result<Self, SelectionError> {
        Self::load_from(Self::selection_path()).await
    }

    pub async fn load_from(path: PathBuf) -> Result<Self, SelectionError> {
        let json = async_fs::read_to_string(&path).await?;
        let selected: Vec<String> =
            serde_json::from_str(&json).map_err(SelectionError::SerdeError)?;
        Ok(Self { path, selected })
    }

    /// Loads the selection, starting empty when the file is missing.
    pub async fn load_or_default_from(path: PathBuf) -> Result<Self, SelectionError> {
        match Self::load_from(path.clone()).await {
            Ok(selection) => Ok(selection),
            Err(SelectionError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::at(path))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn load_or_default() -> Result<Self, SelectionError> {
        Self::load_or_default_from(Self::selection_path()).await
    }

    pub async fn persist(&self) -> Result<(), SelectionError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json =
            serde_json::to_string_pretty(&self.selected).map_err(SelectionError::SerdeError)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Adds `id`; returns `false` if it was already selected.
    pub fn add(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.selected.push(id.to_string());
        true
    }

    /// Removes `id`; returns `false` if it was not selected.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.selected.len();
        self.selected.retain(|s| s != id);
        self.selected.len() != before
    }

    /// Flips membership of `id`; returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.remove(id) {
            false
        } else {
            self.add(id)
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Empties the selection and deletes its file.
    pub async fn clear(&mut self) -> Result<(), SelectionError> {
        self.selected.clear();
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SelectionError::IoError(e)),
        }
    }

    fn selection_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("sporgcli/state/selection.json");
        path
    }
}

impl Default for SelectionManager {
    fn default() -> Self {
        Self::new()
    }
}
