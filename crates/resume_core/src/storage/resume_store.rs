//! Résumé record store over a key-value backend.
//!
//! # Responsibility
//! - Own the serialized list of `StoredResume` records under one key.
//! - Gate every data write behind `validate_resume_data`.
//! - Translate backend failures into `StorageError` codes.
//!
//! # Invariants
//! - Every operation reads and/or writes the whole list; there is no partial
//!   update path.
//! - New records are prepended; replaced records keep their position.
//! - A record's `updated_at` strictly increases on every persisted update.
//! - A failed validation never reaches the backend.
//! - Items that do not decode as `StoredResume` are written back verbatim.
//! - Content that is not a JSON array is never overwritten.

use super::clock::{now_millis, Clock, SystemClock};
use super::error::{StorageError, StorageErrorCode, StorageResult};
use super::kv::KeyValueStore;
use crate::config::{IdStrategy, ReadPolicy, StoreConfig};
use crate::model::resume::{ResumeData, StoredResume};
use crate::model::validation::validate_resume_data;
use chrono::{DateTime, Duration, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use uuid::Uuid;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const FALLBACK_RANDOM_CHARS: usize = 8;

/// One item of the stored array.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Slot {
    Record(StoredResume),
    /// Item that failed to decode, kept as read.
    Retained(Value),
}

impl Slot {
    fn id(&self) -> Option<&str> {
        match self {
            Self::Record(entry) => Some(entry.id.as_str()),
            Self::Retained(value) => value.get("id").and_then(Value::as_str),
        }
    }
}

enum StoredList {
    Readable(Vec<Slot>),
    Unreadable(String),
}

pub struct ResumeStore<S: KeyValueStore, C: Clock = SystemClock> {
    kv: S,
    clock: C,
    config: StoreConfig,
}

impl<S: KeyValueStore> ResumeStore<S> {
    /// Creates a store with default configuration and wall-clock time.
    pub fn new(kv: S) -> Self {
        Self {
            kv,
            clock: SystemClock,
            config: StoreConfig::default(),
        }
    }
}

impl<S: KeyValueStore, C: Clock> ResumeStore<S, C> {
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_clock<C2: Clock>(self, clock: C2) -> ResumeStore<S, C2> {
        ResumeStore {
            kv: self.kv,
            clock,
            config: self.config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns every stored record, most recent first.
    pub fn get_all_resumes(&self) -> StorageResult<Vec<StoredResume>> {
        self.read_all()
    }

    /// Finds one record by ID. Absence is not an error.
    pub fn get_resume_by_id(&self, id: &str) -> StorageResult<Option<StoredResume>> {
        Ok(self.read_all()?.into_iter().find(|entry| entry.id == id))
    }

    /// Replaces the record with the same ID in place, or prepends it. An item
    /// that failed to decode is replaced too when its `id` matches.
    pub fn upsert_resume(&self, entry: StoredResume) -> StorageResult<StoredResume> {
        let mut list = self.read_for_write()?;
        let slot = Slot::Record(entry.clone());
        match list.iter().position(|existing| existing.id() == Some(entry.id.as_str())) {
            Some(idx) => list[idx] = slot,
            None => list.insert(0, slot),
        }
        self.write_all(&list)?;
        info!(
            "event=resume_upsert module=storage status=ok records={}",
            list.len()
        );
        Ok(entry)
    }

    /// Removes every record whose ID is listed. Unknown IDs are ignored.
    pub fn delete_resumes<I, T>(&self, ids: I) -> StorageResult<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let ids: HashSet<String> = ids.into_iter().map(|id| id.as_ref().to_string()).collect();
        let before = self.read_for_write()?;
        let before_len = before.len();
        let next: Vec<Slot> = before
            .into_iter()
            .filter(|slot| slot.id().map_or(true, |id| !ids.contains(id)))
            .collect();
        self.write_all(&next)?;
        info!(
            "event=resume_delete module=storage status=ok removed={} records={}",
            before_len - next.len(),
            next.len()
        );
        Ok(())
    }

    /// Creates and persists a new record for `data`.
    ///
    /// # Contract
    /// - A fresh ID is generated per `StoreConfig::id_strategy`.
    /// - `data.created_at` is kept when present; `updated_at` is set to now.
    ///
    /// # Errors
    /// - `UNKNOWN` listing all validation errors; nothing is written.
    /// - Any read/write failure of the backing store.
    pub fn create_entry_from_data(&self, data: ResumeData) -> StorageResult<StoredResume> {
        let now = now_millis(&self.clock);
        let id = generate_entry_id(self.config.id_strategy, now);

        let normalized = ResumeData {
            created_at: data.created_at.or(Some(now)),
            updated_at: Some(now),
            ..data
        };
        ensure_valid(&normalized)?;

        self.upsert_resume(StoredResume {
            id,
            created_at: now,
            updated_at: now,
            resume_data: normalized,
        })
    }

    /// Replaces the data of an existing record.
    ///
    /// # Contract
    /// - Keeps the record's `id` and outer `created_at`.
    /// - Keeps `resume_data.created_at`, falling back to the record's own
    ///   `created_at`.
    /// - Stamps a new `updated_at` on both the record and its data.
    ///
    /// # Errors
    /// - `UNKNOWN` when no record has this ID, or when validation fails.
    pub fn update_entry_data(&self, id: &str, data: ResumeData) -> StorageResult<StoredResume> {
        let mut list = self.read_for_write()?;
        let found = list.iter().enumerate().find_map(|(idx, slot)| match slot {
            Slot::Record(entry) if entry.id == id => Some((idx, entry)),
            _ => None,
        });
        let (idx, existing) =
            found.ok_or_else(|| StorageError::unknown(format!("resume entry `{id}` not found")))?;

        let previous = existing
            .resume_data
            .updated_at
            .map_or(existing.updated_at, |inner| inner.max(existing.updated_at));
        let now = advance_past(now_millis(&self.clock), previous);

        let merged = ResumeData {
            created_at: existing.resume_data.created_at.or(Some(existing.created_at)),
            updated_at: Some(now),
            ..data
        };
        ensure_valid(&merged)?;

        let updated = StoredResume {
            id: existing.id.clone(),
            created_at: existing.created_at,
            updated_at: now,
            resume_data: merged,
        };
        list[idx] = Slot::Record(updated.clone());
        self.write_all(&list)?;
        info!("event=resume_update module=storage status=ok records={}", list.len());
        Ok(updated)
    }

    fn read_all(&self) -> StorageResult<Vec<StoredResume>> {
        match self.load()? {
            StoredList::Readable(slots) => Ok(slots
                .into_iter()
                .filter_map(|slot| match slot {
                    Slot::Record(entry) => Some(entry),
                    Slot::Retained(_) => None,
                })
                .collect()),
            StoredList::Unreadable(reason) => self.corrupt(reason),
        }
    }

    fn read_for_write(&self) -> StorageResult<Vec<Slot>> {
        match self.load()? {
            StoredList::Readable(slots) => Ok(slots),
            StoredList::Unreadable(reason) => {
                warn!("event=resume_write module=storage status=refused reason=\"{reason}\"");
                Err(StorageError::new(
                    StorageErrorCode::ParseError,
                    format!("refusing to overwrite malformed local storage: {reason}"),
                ))
            }
        }
    }

    fn load(&self) -> StorageResult<StoredList> {
        let raw = self
            .kv
            .get_item(&self.config.storage_key)
            .map_err(StorageError::from_read)?;
        let raw = match raw {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(StoredList::Readable(Vec::new())),
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                return Ok(StoredList::Unreadable(format!(
                    "stored content is not valid JSON: {err}"
                )))
            }
        };
        let Value::Array(items) = value else {
            return Ok(StoredList::Unreadable(
                "stored content is not an array".to_string(),
            ));
        };

        let mut slots = Vec::with_capacity(items.len());
        for (idx, item) in items.into_iter().enumerate() {
            match StoredResume::deserialize(&item) {
                Ok(entry) => slots.push(Slot::Record(entry)),
                Err(err) => match self.config.read_policy {
                    ReadPolicy::Lenient => {
                        warn!(
                            "event=resume_read module=storage status=degraded policy=lenient record={idx} reason=\"{err}\""
                        );
                        slots.push(Slot::Retained(item));
                    }
                    ReadPolicy::Strict => {
                        return Err(StorageError::new(
                            StorageErrorCode::ParseError,
                            format!("failed to read local storage, record #{idx} is malformed: {err}"),
                        ))
                    }
                },
            }
        }
        Ok(StoredList::Readable(slots))
    }

    fn corrupt(&self, reason: String) -> StorageResult<Vec<StoredResume>> {
        match self.config.read_policy {
            ReadPolicy::Lenient => {
                warn!(
                    "event=resume_read module=storage status=degraded policy=lenient reason=\"{reason}\""
                );
                Ok(Vec::new())
            }
            ReadPolicy::Strict => Err(StorageError::new(
                StorageErrorCode::ParseError,
                format!("failed to read local storage, data is malformed: {reason}"),
            )),
        }
    }

    fn write_all(&self, list: &[Slot]) -> StorageResult<()> {
        let serialized = serde_json::to_string(list).map_err(|err| {
            StorageError::unknown(format!("failed to serialize resume list: {err}"))
        })?;
        self.kv
            .set_item(&self.config.storage_key, &serialized)
            .map_err(|err| {
                let mapped = StorageError::from_write(err);
                warn!(
                    "event=resume_write module=storage status=error error_code={} bytes={}",
                    mapped.code,
                    serialized.len()
                );
                mapped
            })
    }
}

fn ensure_valid(data: &ResumeData) -> StorageResult<()> {
    let report = validate_resume_data(data);
    if report.is_valid {
        return Ok(());
    }
    warn!(
        "event=resume_validate module=storage status=rejected errors={}",
        report.errors.len()
    );
    Err(StorageError::validation(&report.errors))
}

/// Returns `now`, or one millisecond past `previous` when the clock has not
/// moved beyond it.
fn advance_past(now: DateTime<Utc>, previous: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

fn generate_entry_id(strategy: IdStrategy, now: DateTime<Utc>) -> String {
    match strategy {
        IdStrategy::Uuid => Uuid::new_v4().to_string(),
        IdStrategy::TimestampRandom => {
            let mut random = Uuid::new_v4().as_u128();
            let suffix: String = (0..FALLBACK_RANDOM_CHARS)
                .map(|_| {
                    let digit = (random % 36) as usize;
                    random /= 36;
                    BASE36_DIGITS[digit] as char
                })
                .collect();
            format!("{}-{suffix}", now.timestamp_millis())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{advance_past, generate_entry_id};
    use crate::config::IdStrategy;
    use crate::model::timestamp::parse;

    #[test]
    fn timestamp_random_ids_have_millis_prefix_and_base36_suffix() {
        let now = parse("2024-05-01T08:30:00.123Z").unwrap();
        let id = generate_entry_id(IdStrategy::TimestampRandom, now);
        let (prefix, suffix) = id.split_once('-').unwrap();
        assert_eq!(prefix, now.timestamp_millis().to_string());
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn uuid_ids_parse_as_uuid() {
        let now = parse("2024-05-01T08:30:00Z").unwrap();
        let id = generate_entry_id(IdStrategy::Uuid, now);
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn advance_past_bumps_stalled_clock() {
        let previous = parse("2024-05-01T08:30:00.500Z").unwrap();
        let stalled = parse("2024-05-01T08:30:00.100Z").unwrap();
        assert_eq!(
            advance_past(stalled, previous),
            parse("2024-05-01T08:30:00.501Z").unwrap()
        );
        let later = parse("2024-05-01T08:31:00Z").unwrap();
        assert_eq!(advance_past(later, previous), later);
    }
}
