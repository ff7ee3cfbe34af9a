//! Filename selection for batch runs.

/// Accepts names of the form `<mask><anything><extension>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameFilter {
    mask: String,
    extension: String,
}

impl FilenameFilter {
    pub fn new(mask: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            mask: mask.into(),
            extension: extension.into(),
        }
    }

    /// Case-sensitive prefix and suffix test; nothing else is checked.
    pub fn matches(&self, name: &str) -> bool {
        name.starts_with(&self.mask) && name.ends_with(&self.extension)
    }
}
