//! Persisted question/answer history doubling as the answer cache.
//!
//! Entries are an append-only JSON array. Lookup is a linear scan for an exact
//! match on the trimmed, lower-cased question; the first entry wins.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// One answered question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerEnvelope {
    pub question: String,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
    pub id: String,
}

impl AnswerEnvelope {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            question: question.into(),
            answer: answer.into(),
            timestamp: now,
            id: message_id(now),
        }
    }

    /// Same question and answer with a fresh timestamp and id
    pub fn refreshed(&self) -> Self {
        let now = Utc::now();
        Self {
            question: self.question.clone(),
            answer: self.answer.clone(),
            timestamp: now,
            id: message_id(now),
        }
    }
}

/// `msg_<unix millis>_<9 random characters>`, unique within a session
pub fn message_id(now: DateTime<Utc>) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("msg_{}_{}", now.timestamp_millis(), &suffix[..9])
}

/// Cache key for a question
pub fn normalize_question(question: &str) -> String {
    question.trim().to_lowercase()
}

/// Ordered answer history, optionally backed by a JSON file
#[derive(Debug, Default)]
pub struct AnswerCache {
    path: Option<PathBuf>,
    entries: Vec<AnswerEnvelope>,
}

impl AnswerCache {
    /// Cache that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the cache file; a missing or unreadable file starts empty
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<AnswerEnvelope>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Discarding corrupt answer cache");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Could not read answer cache");
                Vec::new()
            }
        };

        tracing::debug!(path = %path.display(), entries = entries.len(), "Answer cache loaded");
        Self {
            path: Some(path),
            entries,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn entries(&self) -> &[AnswerEnvelope] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First stored answer for the same normalized question
    pub fn find(&self, question: &str) -> Option<&AnswerEnvelope> {
        let key = normalize_question(question);
        self.entries
            .iter()
            .find(|entry| normalize_question(&entry.question) == key)
    }

    /// Append an answer and persist the whole history
    pub fn append(&mut self, envelope: AnswerEnvelope) -> Result<(), CacheError> {
        self.entries.push(envelope);
        self.save()
    }

    /// Forget every answer and remove the backing file
    pub fn clear(&mut self) -> Result<(), CacheError> {
        self.entries.clear();
        if let Some(path) = &self.path {
            match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Write the history to disk; a no-op for in-memory caches
    pub fn save(&self) -> Result<(), CacheError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case_and_surrounding_whitespace() {
        let mut cache = AnswerCache::in_memory();
        cache
            .append(AnswerEnvelope::new("Quantos Java?", "Temos 3."))
            .unwrap();

        let hit = cache.find(" quantos java? ").unwrap();
        assert_eq!(hit.answer, "Temos 3.");
        assert!(cache.find("quantos  java?").is_none());
    }

    #[test]
    fn test_first_matching_entry_wins() {
        let mut cache = AnswerCache::in_memory();
        cache.append(AnswerEnvelope::new("Resumo", "primeiro")).unwrap();
        cache.append(AnswerEnvelope::new("RESUMO", "segundo")).unwrap();
        assert_eq!(cache.find("resumo").unwrap().answer, "primeiro");
    }

    #[test]
    fn test_refreshed_keeps_text_and_changes_id() {
        let original = AnswerEnvelope::new("Resumo", "texto");
        let refreshed = original.refreshed();
        assert_eq!(refreshed.question, original.question);
        assert_eq!(refreshed.answer, original.answer);
        assert_ne!(refreshed.id, original.id);
        assert!(refreshed.timestamp >= original.timestamp);
    }

    #[test]
    fn test_message_id_shape() {
        let id = message_id(Utc::now());
        let parts: Vec<_> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "msg");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
    }

    #[test]
    fn test_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ai_chat_cache.json");

        let mut cache = AnswerCache::load(&path);
        assert!(cache.is_empty());
        cache
            .append(AnswerEnvelope::new("Quantos sabem React?", "4"))
            .unwrap();

        let reloaded = AnswerCache::load(&path);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.entries()[0], cache.entries()[0]);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ai_chat_cache.json");
        std::fs::write(&path, "[{broken").unwrap();

        let cache = AnswerCache::load(&path);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ai_chat_cache.json");
        let mut cache = AnswerCache::load(&path);
        cache.append(AnswerEnvelope::new("a", "b")).unwrap();
        assert!(path.exists());

        cache.clear().unwrap();
        assert!(cache.is_empty());
        assert!(!path.exists());
        // clearing twice is fine
        cache.clear().unwrap();
    }
}
