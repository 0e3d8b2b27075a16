//! In-memory BibTeX database.
//!
//! Field values are opaque strings. Each value remembers how it was
//! delimited in the source so that bare tokens such as `month = jan` or
//! `year = 2020` are written back without braces.

/// How a field value was written in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `{...}`
    Braces,
    /// `"..."`
    Quotes,
    /// A bare number, a `@string` macro name or a `#` concatenation,
    /// stored exactly as written.
    Raw,
}

/// A field value: the text between the delimiters, or the raw expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub text: String,
    pub delimiter: Delimiter,
}

impl FieldValue {
    pub fn braced(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delimiter: Delimiter::Braces,
        }
    }

    pub fn quoted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delimiter: Delimiter::Quotes,
        }
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delimiter: Delimiter::Raw,
        }
    }
}

/// A single `name = value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
}

/// A bibliography entry such as `@inproceedings{key, ...}`.
///
/// Fields keep their insertion order. Lookups by name are exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub entry_type: String,
    pub key: String,
    fields: Vec<Field>,
}

impl Entry {
    pub fn new(entry_type: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            entry_type: entry_type.into(),
            key: key.into(),
            fields: Vec::new(),
        }
    }

    /// Builder-style helper that adds a braced field.
    pub fn with_field(mut self, name: &str, text: &str) -> Self {
        self.set(name, text);
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns the text of a field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_value(name).map(|v| v.text.as_str())
    }

    pub fn get_value(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }

    /// Sets the text of a field.
    ///
    /// An existing field keeps its position and delimiter; a new field is
    /// appended and braced.
    pub fn set(&mut self, name: &str, text: impl Into<String>) {
        match self.position(name) {
            Some(i) => self.fields[i].value.text = text.into(),
            None => self.fields.push(Field {
                name: name.to_string(),
                value: FieldValue::braced(text),
            }),
        }
    }

    /// Sets a field, replacing any existing value in place.
    pub fn set_value(&mut self, name: &str, value: FieldValue) {
        match self.position(name) {
            Some(i) => self.fields[i].value = value,
            None => self.fields.push(Field {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.position(name).map(|i| self.fields.remove(i).value)
    }

    /// Moves the value of `from` to `to`.
    ///
    /// An existing `to` is overwritten in place. Otherwise the field is
    /// renamed where it stands. Returns `false` when `from` is absent.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        let Some(i) = self.position(from) else {
            return false;
        };
        if self.contains(to) {
            let value = self.fields.remove(i).value;
            self.set_value(to, value);
        } else {
            self.fields[i].name = to.to_string();
        }
        true
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// `@string`, `@preamble` and `@comment` blocks, kept so they survive a
/// round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    String { name: String, value: FieldValue },
    Preamble(FieldValue),
    /// The body of an `@comment` block, e.g. JabRef's `jabref-meta: ...`.
    Comment(String),
}

/// A parsed BibTeX file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Database {
    pub directives: Vec<Directive>,
    pub entries: Vec<Entry>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entry> {
        self.entries.iter_mut()
    }
}
