//! Identifier management using string interning for efficient string storage and comparison
//!
//! This module provides the [`Id`] type with an efficient string-interner based approach.
//! Diagram dumps repeat the same short identifiers ("B0", "T3", "A1") across thousands
//! of files, so interning keeps comparisons cheap while graph construction runs.

use std::{
    fmt,
    str::FromStr,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// Efficient identifier type using string interning
///
/// This type provides efficient storage and comparison of string identifiers
/// through string interning. Identifiers name diagram elements ("B0", "T3"),
/// element groups ("G4X2QZ"), and rhetorical relation nodes ("T1-B0+B2").
///
/// # Examples
///
/// ```
/// use scholia_core::identifier::Id;
///
/// // Create identifiers from names
/// let blob_id = Id::new("B0");
/// let text_id = Id::new("T3");
///
/// // Compare directly against string slices
/// assert_eq!(blob_id, "B0");
/// assert_ne!(blob_id, text_id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use scholia_core::identifier::Id;
    ///
    /// let arrow_id = Id::new("A2");
    /// let head_id = Id::new("AH2");
    /// ```
    pub fn new(name: &str) -> Self {
        let mut interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let symbol = interner.get_or_intern(name);
        Self(symbol)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{}", str_value)
    }
}

impl FromStr for Id {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// This is a convenience implementation that calls `Id::new`.
    ///
    /// # Examples
    ///
    /// ```
    /// use scholia_core::identifier::Id;
    ///
    /// let id: Id = "B0".into();
    /// assert_eq!(id, "B0");
    /// ```
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    ///
    /// # Examples
    ///
    /// ```
    /// use scholia_core::identifier::Id;
    ///
    /// let id = Id::new("B0");
    /// assert!(id == "B0");
    /// ```
    fn eq(&self, other: &str) -> bool {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let self_str = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        self_str == other
    }
}

impl PartialEq<&str> for Id {
    /// Allows direct comparison with string references: `id == &string`
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    /// Serializes as the interned string, so identifiers round-trip through
    /// the same textual form the annotation dumps use.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;

        impl de::Visitor<'_> for IdVisitor {
            type Value = Id;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an identifier string")
            }

            fn visit_str<E>(self, value: &str) -> Result<Id, E>
            where
                E: de::Error,
            {
                Ok(Id::new(value))
            }
        }

        deserializer.deserialize_str(IdVisitor)
    }
}
