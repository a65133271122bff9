/// A parsed `KEY=VALUE` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
    /// 1-based line on which the key appeared.
    pub line: u32,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<String>, line: u32) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            line,
        }
    }
}

/// Summary of a load operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped_existing: usize,
    pub files_read: usize,
}

/// Text encoding used to decode env files.
///
/// A byte-order mark in the file takes precedence over the chosen encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoding(&'static encoding_rs::Encoding);

impl Encoding {
    pub fn utf8() -> Self {
        Self(encoding_rs::UTF_8)
    }

    pub fn utf16le() -> Self {
        Self(encoding_rs::UTF_16LE)
    }

    pub fn utf16be() -> Self {
        Self(encoding_rs::UTF_16BE)
    }

    pub fn windows_1252() -> Self {
        Self(encoding_rs::WINDOWS_1252)
    }

    /// Look up an encoding by its WHATWG label, e.g. `"latin1"` or `"utf-16le"`.
    pub fn for_label(label: &str) -> Option<Self> {
        encoding_rs::Encoding::for_label(label.trim().as_bytes()).map(Self)
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    pub(crate) fn decode<'a>(&self, bytes: &'a [u8]) -> std::borrow::Cow<'a, str> {
        let (text, _, _) = self.0.decode(bytes);
        text
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Self::utf8()
    }
}
