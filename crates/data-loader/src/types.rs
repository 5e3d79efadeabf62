//! Core record types for users and events.
//!
//! Records arrive as loosely-shaped JSON documents: ids may be plain
//! strings or `{"$oid": ...}` objects, tags may be a comma-delimited string
//! or a list, and a few fields exist under two historical names. All of
//! that is absorbed here, at the boundary, so the rest of the workspace
//! only sees one shape.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Opaque unique identifier for a user
pub type UserId = String;

/// Opaque unique identifier for an event
pub type EventId = String;

// =============================================================================
// Identifier decoding
// =============================================================================

/// Every id shape seen in record dumps
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Plain(String),
    Number(i64),
    Oid {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Plain(s) => s,
            RawId::Number(n) => n.to_string(),
            RawId::Oid { oid } => oid,
        }
    }
}

fn de_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

fn de_opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw.map(String::from).filter(|id| !id.is_empty()))
}

fn de_id_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let raw = Option::<Vec<RawId>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(String::from)
        .collect())
}

// =============================================================================
// Tag-like fields
// =============================================================================

/// A field that is either a delimited string or a list of strings.
///
/// Only the feature builder looks inside; everything downstream works on
/// the normalized token sequence it produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagField {
    List(Vec<String>),
    Delimited(String),
}

impl TagField {
    /// Separator used by delimited tag strings
    pub const DELIMITER: char = ',';

    /// Pieces of a tag field: a delimited string is split, a list is used as-is
    pub fn split_pieces(&self) -> Vec<&str> {
        match self {
            TagField::List(items) => items.iter().map(String::as_str).collect(),
            TagField::Delimited(s) => s.split(Self::DELIMITER).collect(),
        }
    }

    /// Pieces of a category field: a string is one value, a list is used as-is
    pub fn whole_pieces(&self) -> Vec<&str> {
        match self {
            TagField::List(items) => items.iter().map(String::as_str).collect(),
            TagField::Delimited(s) => vec![s.as_str()],
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            TagField::List(items) => items.is_empty(),
            TagField::Delimited(s) => s.is_empty(),
        }
    }
}

// =============================================================================
// User records
// =============================================================================

/// A user document from the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(alias = "_id", deserialize_with = "de_id")]
    pub id: UserId,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, rename = "interestedTags")]
    pub interested_tags: Option<TagField>,

    #[serde(default, rename = "visitedEvents", deserialize_with = "de_id_list")]
    pub visited_events: Vec<EventId>,

    #[serde(default, rename = "registeredEvents", deserialize_with = "de_id_list")]
    pub registered_events: Vec<EventId>,
}

impl UserRecord {
    /// Create a user with no interests and no history
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            username: None,
            name: None,
            interested_tags: None,
            visited_events: Vec::new(),
            registered_events: Vec::new(),
        }
    }

    /// Username for display, falling back to the profile name and then the id
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(&self.id)
    }

    /// Every event the user already visited or registered for
    pub fn consumed_events(&self) -> impl Iterator<Item = &EventId> {
        self.visited_events.iter().chain(self.registered_events.iter())
    }
}

// =============================================================================
// Event records
// =============================================================================

/// Embedded creator reference: either a bare id or a populated user document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreatorRef {
    Id(String),
    Document {
        #[serde(rename = "_id", alias = "id", default, deserialize_with = "de_opt_id")]
        id: Option<String>,
    },
}

impl CreatorRef {
    fn id(&self) -> Option<&str> {
        match self {
            CreatorRef::Id(id) => Some(id.as_str()),
            CreatorRef::Document { id } => id.as_deref(),
        }
        .filter(|id| !id.is_empty())
    }
}

/// An event document from the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(alias = "_id", deserialize_with = "de_id")]
    pub id: EventId,

    #[serde(default, rename = "creatorId", deserialize_with = "de_opt_id")]
    pub creator_id: Option<UserId>,

    #[serde(default)]
    pub creator: Option<CreatorRef>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub category: Option<TagField>,

    #[serde(default)]
    pub tags: Option<TagField>,

    #[serde(default, rename = "eventTags")]
    pub event_tags: Option<TagField>,

    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default, rename = "eventRating")]
    pub event_rating: Option<f64>,

    #[serde(default, rename = "ratingCount")]
    pub rating_count: Option<f64>,

    #[serde(default, rename = "isActive")]
    pub is_active: bool,
}

impl EventRecord {
    /// Create an active event with no features
    pub fn new(id: impl Into<EventId>) -> Self {
        Self {
            id: id.into(),
            creator_id: None,
            creator: None,
            name: None,
            description: None,
            category: None,
            tags: None,
            event_tags: None,
            rating: None,
            event_rating: None,
            rating_count: None,
            is_active: true,
        }
    }

    /// Resolved creator id, from either `creatorId` or the embedded creator
    pub fn creator_id(&self) -> Option<&str> {
        self.creator_id
            .as_deref()
            .or_else(|| self.creator.as_ref().and_then(CreatorRef::id))
    }

    /// Tag field under whichever name the document used
    pub fn tag_field(&self) -> Option<&TagField> {
        self.event_tags.as_ref().or(self.tags.as_ref())
    }

    /// Average rating on a 0-5 scale, 0.0 when unrated
    pub fn rating_value(&self) -> f64 {
        self.event_rating.or(self.rating).unwrap_or(0.0)
    }

    /// Number of ratings behind `rating_value`
    pub fn rating_count_value(&self) -> f64 {
        self.rating_count.unwrap_or(0.0)
    }

    /// True when the event carries a usable quality signal
    pub fn has_rating(&self) -> bool {
        self.rating_value() > 0.0 && self.rating_count_value() > 0.0
    }

    // Builder helpers, mostly for fixtures and the HTTP payload path

    pub fn with_creator(mut self, creator_id: impl Into<UserId>) -> Self {
        self.creator_id = Some(creator_id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(TagField::List(tags.into_iter().map(Into::into).collect()));
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(TagField::Delimited(category.into()));
        self
    }

    pub fn with_rating(mut self, rating: f64, count: f64) -> Self {
        self.rating = Some(rating);
        self.rating_count = Some(count);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

// =============================================================================
// DataIndex - In-memory document store
// =============================================================================

/// Holds every user and event and answers the store queries.
///
/// Events keep their load order so that training passes see the corpus in
/// a stable order from run to run.
#[derive(Debug, Default)]
pub struct DataIndex {
    pub(crate) users: HashMap<UserId, UserRecord>,
    pub(crate) events: Vec<EventRecord>,
    /// Position of each event in `events`
    pub(crate) event_positions: HashMap<EventId, usize>,
}

impl DataIndex {
    /// Creates a new, empty DataIndex
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a user by ID
    pub fn get_user(&self, id: &str) -> Option<&UserRecord> {
        self.users.get(id)
    }

    /// Get an event by ID
    pub fn get_event(&self, id: &str) -> Option<&EventRecord> {
        self.event_positions.get(id).map(|&pos| &self.events[pos])
    }

    /// All events in load order
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// All users, in no particular order
    pub fn users(&self) -> impl Iterator<Item = &UserRecord> {
        self.users.values()
    }

    /// Insert a user, replacing any previous record with the same id
    pub fn insert_user(&mut self, user: UserRecord) {
        self.users.insert(user.id.clone(), user);
    }

    /// Insert an event, replacing any previous record with the same id in place
    pub fn insert_event(&mut self, event: EventRecord) {
        match self.event_positions.get(&event.id) {
            Some(&pos) => self.events[pos] = event,
            None => {
                self.event_positions.insert(event.id.clone(), self.events.len());
                self.events.push(event);
            }
        }
    }

    /// Get counts for debugging/validation
    pub fn counts(&self) -> (usize, usize) {
        (self.users.len(), self.events.len())
    }
}
