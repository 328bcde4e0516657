//! Storage representation tags for vectors and matrices.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// How the values of a vector or matrix are laid out in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StorageType {
    /// One value per cell in a contiguous array (row-major for matrices).
    #[default]
    Dense,
    /// Only non-zero cells, as sorted (index, value) pairs.
    Sparse,
}

impl StorageType {
    /// Tag text: `"Dense"` or `"Sparse"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dense => "Dense",
            Self::Sparse => "Sparse",
        }
    }

    /// Returns `true` for [`StorageType::Dense`].
    #[inline]
    pub const fn is_dense(self) -> bool {
        matches!(self, Self::Dense)
    }

    /// Returns `true` for [`StorageType::Sparse`].
    #[inline]
    pub const fn is_sparse(self) -> bool {
        matches!(self, Self::Sparse)
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageType {
    type Err = Error;

    /// Parses a storage tag, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "dense" => Ok(Self::Dense),
            "sparse" => Ok(Self::Sparse),
            _ => Err(Error::construction(format!("unknown storage type {s:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("Dense".parse::<StorageType>().unwrap(), StorageType::Dense);
        assert_eq!("SPARSE".parse::<StorageType>().unwrap(), StorageType::Sparse);
        assert!("packed".parse::<StorageType>().unwrap_err().is_construction());
    }

    #[test]
    fn test_display() {
        assert_eq!(StorageType::Sparse.to_string(), "Sparse");
    }
}
