//! Encoding of the `Entrevistas` cell.
//!
//! The cell holds every interview report of a candidate as one string:
//! entries are separated by `;` and each entry is `url|display_name`.
//! Entries without a `|` are skipped when decoding.

use serde::{Deserialize, Serialize};
use std::str::Split;

use super::AttachmentError;

pub const ENTRY_SEPARATOR: char = ';';
pub const FIELD_SEPARATOR: char = '|';

/// A stored interview document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewAttachment {
    pub url: String,
    pub display_name: String,
}

impl InterviewAttachment {
    pub fn new(url: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            display_name: display_name.into(),
        }
    }

    /// Checks that the entry survives storage. Stored fields are trimmed, so
    /// the decoded entry equals this one up to surrounding whitespace.
    pub fn validate(&self) -> Result<(), AttachmentError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(AttachmentError::InvalidEntry("empty document URL".into()));
        }
        if url.contains(FIELD_SEPARATOR) || url.contains(ENTRY_SEPARATOR) {
            return Err(AttachmentError::InvalidEntry(format!(
                "document URL '{url}' contains a reserved separator"
            )));
        }
        validate_display_name(&self.display_name)
    }

    fn encode(&self) -> String {
        format!("{}{FIELD_SEPARATOR}{}", self.url.trim(), self.display_name.trim())
    }
}

/// Checks a display name on its own, before any document is stored for it.
pub fn validate_display_name(name: &str) -> Result<(), AttachmentError> {
    if name.contains(ENTRY_SEPARATOR) {
        return Err(AttachmentError::InvalidEntry(format!(
            "document name '{name}' contains ';'"
        )));
    }
    Ok(())
}

/// Lazy view over an encoded cell. Cloning restarts the iteration.
#[derive(Debug, Clone)]
pub struct Attachments<'a> {
    entries: Split<'a, char>,
}

impl Iterator for Attachments<'_> {
    type Item = InterviewAttachment;

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.entries.by_ref() {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            if let Some((url, name)) = entry.split_once(FIELD_SEPARATOR) {
                return Some(InterviewAttachment::new(url.trim(), name.trim()));
            }
            tracing::trace!(entry, "Skipping malformed interview entry");
        }
        None
    }
}

/// Decodes an encoded cell. Blank input yields nothing.
pub fn decode(raw: &str) -> Attachments<'_> {
    Attachments {
        entries: raw.split(ENTRY_SEPARATOR),
    }
}

/// Appends one entry to an encoded cell, adding the separator only when the
/// cell already holds something.
pub fn append_entry(
    existing: &str,
    attachment: &InterviewAttachment,
) -> Result<String, AttachmentError> {
    attachment.validate()?;
    let existing = existing.trim();
    let entry = attachment.encode();
    Ok(if existing.is_empty() {
        entry
    } else {
        format!("{existing}{ENTRY_SEPARATOR}{entry}")
    })
}

/// Encodes a full list; inverse of [`decode`] for valid entries.
pub fn encode_all<'a, I>(attachments: I) -> Result<String, AttachmentError>
where
    I: IntoIterator<Item = &'a InterviewAttachment>,
{
    attachments
        .into_iter()
        .try_fold(String::new(), |acc, attachment| append_entry(&acc, attachment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cells_decode_to_nothing() {
        assert_eq!(decode("").count(), 0);
        assert_eq!(decode("  ").count(), 0);
        assert_eq!(decode(";;").count(), 0);
    }

    #[test]
    fn malformed_entry_is_skipped() {
        let raw = "https://d/1|first.pdf;not-an-entry;https://d/2|second.pdf";
        let decoded: Vec<_> = decode(raw).collect();
        assert_eq!(
            decoded,
            vec![
                InterviewAttachment::new("https://d/1", "first.pdf"),
                InterviewAttachment::new("https://d/2", "second.pdf"),
            ]
        );
    }

    #[test]
    fn decoding_is_restartable() {
        let attachments = decode("https://d/1|a.pdf;https://d/2|b.pdf");
        let first_pass: Vec<_> = attachments.clone().collect();
        let second_pass: Vec<_> = attachments.collect();
        assert_eq!(first_pass, second_pass);
        assert_eq!(first_pass.len(), 2);
    }

    #[test]
    fn name_keeps_everything_after_first_bar() {
        let decoded: Vec<_> = decode("https://d/1|round 1 | tech.pdf").collect();
        assert_eq!(decoded[0].display_name, "round 1 | tech.pdf");
    }

    #[test]
    fn append_adds_separator_only_when_needed() {
        let first = append_entry("", &InterviewAttachment::new("https://d/1", "a.pdf")).unwrap();
        assert_eq!(first, "https://d/1|a.pdf");
        let second =
            append_entry(&first, &InterviewAttachment::new("https://d/2", "b.pdf")).unwrap();
        assert_eq!(second, "https://d/1|a.pdf;https://d/2|b.pdf");
    }

    #[test]
    fn stored_fields_are_trimmed() {
        let cell = append_entry("", &InterviewAttachment::new(" https://d/1", "a.pdf ")).unwrap();
        let decoded: Vec<_> = decode(&cell).collect();
        assert_eq!(decoded, vec![InterviewAttachment::new("https://d/1", "a.pdf")]);
    }

    #[test]
    fn entries_that_would_not_round_trip_are_refused() {
        for bad in [
            InterviewAttachment::new("", "a.pdf"),
            InterviewAttachment::new("https://d/1|x", "a.pdf"),
            InterviewAttachment::new("https://d/1;x", "a.pdf"),
            InterviewAttachment::new("https://d/1", "a;b.pdf"),
        ] {
            assert!(matches!(
                append_entry("", &bad),
                Err(AttachmentError::InvalidEntry(_))
            ));
        }
    }
}
