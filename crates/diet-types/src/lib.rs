//! Validated text primitives shared across the diet workspace.
//!
//! Menu text coming back from the generator is untrusted, but the pieces we build and hand back
//! to the storage layer (dish names, portion descriptions) must stay renderable on a single
//! line. These wrappers enforce that once, at construction.

/// Errors that can occur when creating validated text types.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The input spans more than one line
    #[error("Text must fit on a single line")]
    MultiLine,
    /// The input contains a character reserved by the surrounding format
    #[error("Text must not contain '{0}'")]
    Reserved(char),
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// Returns `Err(TextError::Empty)` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Creates a single-line `NonEmptyText` that avoids every character in `reserved`.
    ///
    /// Used for fields embedded in a line-oriented format, where a newline or a delimiter
    /// character would change how the line parses back.
    pub fn single_line(input: impl AsRef<str>, reserved: &[char]) -> Result<Self, TextError> {
        let text = Self::new(input)?;
        if text.0.contains(['\n', '\r']) {
            return Err(TextError::MultiLine);
        }
        if let Some(c) = text.0.chars().find(|c| reserved.contains(c)) {
            return Err(TextError::Reserved(c));
        }
        Ok(text)
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for NonEmptyText {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}
