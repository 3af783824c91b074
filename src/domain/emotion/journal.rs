//! Read-only view of journal entries, as consumed by emotion analysis.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EntryId, UserId};

/// A journal entry and the assistant's reply to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub entry_id: EntryId,
    pub user_id: UserId,
    pub journal_date: NaiveDate,
    pub entry_text: String,
    pub ai_response: Option<String>,
}

/// Concatenates a day's entries into one classifier input.
///
/// Each entry contributes a `User:` line followed by an `AI:` line, in the
/// order given.
pub fn conversation_transcript(entries: &[JournalEntry]) -> String {
    let mut transcript = String::new();
    for entry in entries {
        transcript.push_str("User: ");
        transcript.push_str(&entry.entry_text);
        transcript.push('\n');
        transcript.push_str("AI: ");
        transcript.push_str(entry.ai_response.as_deref().unwrap_or_default());
        transcript.push('\n');
    }
    transcript
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, text: &str, reply: Option<&str>) -> JournalEntry {
        JournalEntry {
            entry_id: EntryId::new(id),
            user_id: UserId::new("u").unwrap(),
            journal_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            entry_text: text.to_string(),
            ai_response: reply.map(String::from),
        }
    }

    #[test]
    fn transcript_alternates_user_and_ai_lines() {
        let entries = vec![
            entry(1, "Rough morning", Some("That sounds hard")),
            entry(2, "Better now", Some("Glad to hear it")),
        ];

        assert_eq!(
            conversation_transcript(&entries),
            "User: Rough morning\nAI: That sounds hard\nUser: Better now\nAI: Glad to hear it\n"
        );
    }

    #[test]
    fn missing_reply_leaves_empty_ai_line() {
        let entries = vec![entry(1, "Just a note", None)];
        assert_eq!(conversation_transcript(&entries), "User: Just a note\nAI: \n");
    }

    #[test]
    fn no_entries_gives_empty_transcript() {
        assert!(conversation_transcript(&[]).is_empty());
    }
}
