//! Packing item model and its closed category/bucket sets.
//!
//! # Invariants
//! - `PackingItem::name` is trimmed and non-blank.
//! - Only `bucket` changes after construction, and only through the store.

use super::now_epoch_ms;
use super::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a packing item.
pub type ItemId = Uuid;

/// Room or owner grouping for a packing item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryId {
    Kitchen,
    Bathroom,
    LivingRoom,
    Cats,
    Personal,
    Room,
    Work,
    Laundry,
}

impl CategoryId {
    /// All categories in display order.
    pub const ALL: [CategoryId; 8] = [
        Self::Kitchen,
        Self::Bathroom,
        Self::LivingRoom,
        Self::Cats,
        Self::Personal,
        Self::Room,
        Self::Work,
        Self::Laundry,
    ];

    /// Wire identifier, e.g. `living-room`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kitchen => "kitchen",
            Self::Bathroom => "bathroom",
            Self::LivingRoom => "living-room",
            Self::Cats => "cats",
            Self::Personal => "personal",
            Self::Room => "room",
            Self::Work => "work",
            Self::Laundry => "laundry",
        }
    }

    /// Human label for pickers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Kitchen => "Kitchen",
            Self::Bathroom => "Bathroom",
            Self::LivingRoom => "Living Room",
            Self::Cats => "Cats",
            Self::Personal => "Personal",
            Self::Room => "Room",
            Self::Work => "Work",
            Self::Laundry => "Laundry",
        }
    }

    /// Exact-match parse of a wire identifier. No case folding.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == value)
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::ALL[0]
    }
}

/// Disposition of a packing item on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BucketId {
    /// Stays at home for daily use.
    Keep,
    /// Donated or gifted.
    GiveAway,
    /// Packed for the trip.
    TakeAway,
}

impl BucketId {
    /// All buckets in board column order.
    pub const ALL: [BucketId; 3] = [Self::Keep, Self::GiveAway, Self::TakeAway];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keep => "keep",
            Self::GiveAway => "give-away",
            Self::TakeAway => "take-away",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Keep => "Keep",
            Self::GiveAway => "Give Away",
            Self::TakeAway => "Take Away",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Keep => "Stays with you for daily use.",
            Self::GiveAway => "Donate or gift to someone else.",
            Self::TakeAway => "Pack for the trip and carry along.",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bucket| bucket.as_str() == value)
    }
}

impl Default for BucketId {
    fn default() -> Self {
        Self::ALL[0]
    }
}

/// Persisted packing item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingItem {
    pub id: ItemId,
    pub name: String,
    pub category: CategoryId,
    pub bucket: BucketId,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl PackingItem {
    /// Builds an item from validated input with a fresh id and timestamp.
    pub fn create(input: NewPackingItem) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            category: input.category,
            bucket: input.bucket,
            created_at: now_epoch_ms(),
        }
    }

    /// Re-checks invariants on records that did not come through `create`,
    /// e.g. snapshots read back from storage.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankText("name"));
        }
        Ok(())
    }
}

/// Validated input for a new packing item.
///
/// Fields are private so the only way in is `new`/`from_wire`, which trim
/// and check the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPackingItem {
    name: String,
    category: CategoryId,
    bucket: BucketId,
}

impl NewPackingItem {
    pub fn new(
        name: &str,
        category: CategoryId,
        bucket: BucketId,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: require_text("name", name)?,
            category,
            bucket,
        })
    }

    /// Builds input from untyped wire strings, rejecting values outside
    /// the closed sets.
    pub fn from_wire(name: &str, category: &str, bucket: &str) -> Result<Self, ValidationError> {
        let name = require_text("name", name)?;
        let category = CategoryId::parse(category)
            .ok_or_else(|| ValidationError::UnknownCategory(category.to_string()))?;
        let bucket = BucketId::parse(bucket)
            .ok_or_else(|| ValidationError::UnknownBucket(bucket.to_string()))?;
        Ok(Self {
            name,
            category,
            bucket,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> CategoryId {
        self.category
    }

    pub fn bucket(&self) -> BucketId {
        self.bucket
    }
}
