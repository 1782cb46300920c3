use crate::i18n::{Notice, TranslationKey};

/// Ordered hashtags with no duplicates (exact, case-sensitive comparison).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashtagSet(Vec<String>);

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("hashtag {0:?} already added")]
pub struct DuplicateHashtag(pub String);

impl HashtagSet {
    pub fn insert(&mut self, tag: String) -> Result<(), DuplicateHashtag> {
        if self.contains(&tag) {
            return Err(DuplicateHashtag(tag));
        }
        self.0.push(tag);
        Ok(())
    }

    pub fn remove(&mut self, tag: &str) {
        self.0.retain(|t| t != tag);
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }
}

/// The hashtag text field plus the tags entered so far.
#[derive(Debug, Clone, Default)]
pub struct HashtagInput {
    buffer: String,
    tags: HashtagSet,
}

impl HashtagInput {
    /// The field's value changed. Only the trimmed text is kept.
    pub fn on_change(&mut self, value: &str) {
        self.buffer = value.trim().to_string();
    }

    /// A key was released in the field. A space commits the pending tag.
    pub fn on_key_up(&mut self, key: &str, field_value: &str) -> Option<Notice> {
        let value = field_value.trim();
        if key != " " || value.is_empty() {
            return None;
        }
        match self.tags.insert(value.to_string()) {
            Ok(()) => {
                self.buffer.clear();
                None
            }
            Err(DuplicateHashtag(tag)) => {
                tracing::debug!(%tag, "duplicate hashtag rejected");
                Some(Notice::error(TranslationKey::TOAST_HASHTAG_EXISTS))
            }
        }
    }

    /// Types `text` as if keystroke by keystroke: change then key-up per character.
    pub fn type_text(&mut self, text: &str) -> Vec<Notice> {
        let mut field = self.buffer.clone();
        let mut notices = Vec::new();
        for ch in text.chars() {
            field.push(ch);
            self.on_change(&field);
            let mut key = [0u8; 4];
            if let Some(notice) = self.on_key_up(ch.encode_utf8(&mut key), &field) {
                notices.push(notice);
            }
            field = self.buffer.clone();
        }
        notices
    }

    pub fn remove(&mut self, tag: &str) {
        self.tags.remove(tag);
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn tags(&self) -> &HashtagSet {
        &self.tags
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
        self.tags.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_commits_the_buffer() {
        let mut input = HashtagInput::default();
        let notices = input.type_text("world ");

        assert!(notices.is_empty());
        assert_eq!(input.tags().as_slice(), ["world"]);
        assert_eq!(input.buffer(), "");
    }

    #[test]
    fn duplicate_is_rejected_with_notice() {
        let mut input = HashtagInput::default();
        input.type_text("world ");
        let notices = input.type_text("world ");

        assert_eq!(notices, [Notice::error(TranslationKey::TOAST_HASHTAG_EXISTS)]);
        assert_eq!(input.tags().as_slice(), ["world"]);
    }

    #[test]
    fn order_is_first_insertion_and_case_sensitive() {
        let mut input = HashtagInput::default();
        input.type_text("b a B c ");
        assert_eq!(input.tags().as_slice(), ["b", "a", "B", "c"]);

        // a rejected tag stays in the field
        input.type_text("a ");
        assert_eq!(input.buffer(), "a");
        assert_eq!(input.tags().as_slice(), ["b", "a", "B", "c"]);

        input.remove("a");
        assert_eq!(input.tags().as_slice(), ["b", "B", "c"]);
    }

    #[test]
    fn blank_field_and_other_keys_do_nothing() {
        let mut input = HashtagInput::default();
        assert_eq!(input.on_key_up(" ", "   "), None);
        input.on_change("rust");
        assert_eq!(input.on_key_up("t", "rust"), None);
        assert!(input.tags().is_empty());
        assert_eq!(input.buffer(), "rust");
    }

    #[test]
    fn no_duplicates_for_any_sequence() {
        let words = ["x", "y", "x", "X", "y", "z", "x"];
        for n in 0..words.len() {
            let mut input = HashtagInput::default();
            for w in &words[..=n] {
                input.type_text(&format!("{w} "));
            }
            let tags = input.tags().as_slice();
            let mut dedup = tags.to_vec();
            dedup.sort();
            dedup.dedup();
            assert_eq!(dedup.len(), tags.len());
        }
    }
}
