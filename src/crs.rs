use serde::{Deserialize, Serialize};
use std::{fmt::Display, sync::Arc};

/// Coordinate reference system identifier.
///
/// Only compared and carried along, never interpreted.
#[derive(Shrinkwrap, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Crs(Arc<str>);

impl Crs {
    pub fn new(crs: &str) -> Self {
        Self(Arc::from(crs))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl From<&str> for Crs {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Crs {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn compares_by_value() {
        let crs = Crs::from("EPSG:32633");
        assert_eq!(crs, Crs::from(String::from("EPSG:32633")));
        assert_ne!(crs, Crs::from("EPSG:4326"));
        assert_eq!(crs.len(), 10);
    }
}
