//! Class labels

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// An opaque class identifier attached to every sample
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Category(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reads the label encoded in a glyph file name.
    ///
    /// Glyph files are named `<anything>_XY.png`; the label is the two
    /// characters `XY`, which may themselves start with an underscore
    /// (`"a__m.png"` is labelled `_m`).
    pub fn from_file_name(name: &str) -> Option<Self> {
        let stem = name.strip_suffix(".png")?;
        let chars: Vec<char> = stem.chars().collect();
        if chars.len() < 3 {
            return None;
        }

        // The separator sits right before the two label characters
        let split = chars.len() - 3;
        if chars[split] != '_' {
            return None;
        }

        Some(Category(chars[split + 1..].iter().collect()))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Category::new(name)
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        Category(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_labels() {
        assert_eq!(Category::from_file_name("glyph_09.png"), Some(Category::new("09")));
        assert_eq!(Category::from_file_name("glyph__m.png"), Some(Category::new("_m")));
        assert_eq!(Category::from_file_name("dir/a_b__r.png"), Some(Category::new("_r")));
        assert_eq!(Category::from_file_name("glyph_09.jpg"), None);
        assert_eq!(Category::from_file_name("glyph9.png"), None);
        assert_eq!(Category::from_file_name("a_b_r.png"), None);
        assert_eq!(Category::from_file_name("_9.png"), None);
    }
}
