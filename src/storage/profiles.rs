//! Shared profile store
//!
//! All users live in one JSON array. Every save reads the whole array,
//! replaces (or appends) the current user's entry and writes the array back.
//! Other users' entries are carried as raw JSON so they survive untouched even
//! if they don't match the current profile schema.
//!
//! There is no locking: two processes saving at once will lose one update.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{TrackerError, TrackerResult};
use crate::models::UserProfile;

use super::file_io::{read_json, write_json_atomic};

const USER_NAME_KEY: &str = "userName";

/// Repository for the shared profiles file
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored entry
    ///
    /// A missing file is an empty store. Content that is not a JSON array is
    /// treated as empty too; only I/O failures are returned as errors.
    fn read_entries(&self) -> TrackerResult<Vec<Value>> {
        match read_json::<Value, _>(&self.path) {
            Ok(Value::Array(entries)) => Ok(entries),
            Ok(Value::Null) => Ok(Vec::new()),
            Ok(_) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "profile store is not a JSON array, ignoring contents"
                );
                Ok(Vec::new())
            }
            Err(TrackerError::Json(msg)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %msg,
                    "profile store is unreadable, ignoring contents"
                );
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Load the profile stored for `user_name`
    ///
    /// Returns `None` when no entry exists. Unreadable fields inside an entry
    /// are coerced field by field, so the records of a partly damaged profile
    /// are kept.
    pub fn load(&self, user_name: &str) -> TrackerResult<Option<UserProfile>> {
        let entries = self.read_entries()?;

        let Some(entry) = entries.into_iter().find(|e| entry_user(e) == Some(user_name)) else {
            return Ok(None);
        };

        match serde_json::from_value::<UserProfile>(entry) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                tracing::warn!(
                    user = user_name,
                    error = %e,
                    "stored profile is malformed, starting fresh"
                );
                Ok(None)
            }
        }
    }

    /// Write `profile` into the store, replacing any entry with the same user name
    pub fn save(&self, profile: &UserProfile) -> TrackerResult<()> {
        let mut entries = self.read_entries()?;
        let value = serde_json::to_value(profile)?;

        match entries
            .iter_mut()
            .find(|e| entry_user(e) == Some(profile.user_name.as_str()))
        {
            Some(existing) => *existing = value,
            None => entries.push(value),
        }

        write_json_atomic(&self.path, &entries)?;
        tracing::debug!(user = %profile.user_name, path = %self.path.display(), "profile saved");
        Ok(())
    }

    /// User names that have a stored profile, in file order
    pub fn user_names(&self) -> TrackerResult<Vec<String>> {
        Ok(self
            .read_entries()?
            .iter()
            .filter_map(|e| entry_user(e).map(str::to_string))
            .collect())
    }
}

fn entry_user(entry: &Value) -> Option<&str> {
    entry.get(USER_NAME_KEY).and_then(Value::as_str)
}
