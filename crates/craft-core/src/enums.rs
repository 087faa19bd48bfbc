//! Status enums, entity kinds, and pipeline stages for autocraft.
//!
//! Status enums serialize with the upper-case wire literals used by the
//! pipeline (`DOU_REVIEW`, `APPROVED`). Status enums with state machines provide
//! `allowed_next_states()` to enforce valid transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a project.
///
/// ```text
/// ingestion → dou_review → rtm_build → test_build
///                 ↑            │            │
///                 └────────────┴────────────┘  (DOU regenerated)
/// ```
///
/// Staying in the current state is always allowed, so re-running a stage
/// that does not move the project is a valid no-op transition.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Ingestion,
    DouReview,
    RtmBuild,
    TestBuild,
}

impl ProjectStatus {
    /// Valid next states from the current state, excluding the current state itself.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Ingestion => &[Self::DouReview],
            Self::DouReview => &[Self::RtmBuild],
            Self::RtmBuild => &[Self::TestBuild, Self::DouReview],
            Self::TestBuild => &[Self::DouReview],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self == next || self.allowed_next_states().contains(&next)
    }

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ingestion => "INGESTION",
            Self::DouReview => "DOU_REVIEW",
            Self::RtmBuild => "RTM_BUILD",
            Self::TestBuild => "TEST_BUILD",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DouStatus
// ---------------------------------------------------------------------------

/// Review status of a Document of Understanding.
///
/// ```text
/// draft → approved
///   ↑        │
///   └────────┘  (regenerated)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DouStatus {
    Draft,
    Approved,
}

impl DouStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Approved],
            Self::Approved => &[Self::Draft],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self == next || self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Approved => "APPROVED",
        }
    }
}

impl fmt::Display for DouStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Every kind of node in the artifact hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Project,
    RawAsset,
    Dou,
    RtmItem,
    TestScenario,
    TestCase,
    AutomatedTest,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::RawAsset => "raw_asset",
            Self::Dou => "dou",
            Self::RtmItem => "rtm_item",
            Self::TestScenario => "test_scenario",
            Self::TestCase => "test_case",
            Self::AutomatedTest => "automated_test",
        }
    }

    /// Parent kind in the hierarchy. `None` for the root.
    #[must_use]
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Project => None,
            Self::RawAsset | Self::Dou => Some(Self::Project),
            Self::RtmItem => Some(Self::Dou),
            Self::TestScenario => Some(Self::RtmItem),
            Self::TestCase => Some(Self::TestScenario),
            Self::AutomatedTest => Some(Self::TestCase),
        }
    }

    /// Whether at most one child of this kind may exist under its parent.
    #[must_use]
    pub const fn is_singular(self) -> bool {
        matches!(self, Self::Dou | Self::AutomatedTest)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// One generation step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Dou,
    Rtm,
    Scenarios,
    TestCases,
    AutomatedTest,
}

impl Stage {
    /// Every stage in pipeline order.
    pub const ALL: [Self; 5] = [
        Self::Dou,
        Self::Rtm,
        Self::Scenarios,
        Self::TestCases,
        Self::AutomatedTest,
    ];

    /// The entity kind this stage produces.
    #[must_use]
    pub const fn output_kind(self) -> EntityKind {
        match self {
            Self::Dou => EntityKind::Dou,
            Self::Rtm => EntityKind::RtmItem,
            Self::Scenarios => EntityKind::TestScenario,
            Self::TestCases => EntityKind::TestCase,
            Self::AutomatedTest => EntityKind::AutomatedTest,
        }
    }

    /// Whether the generator output for this stage is a structured record list.
    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Rtm | Self::Scenarios | Self::TestCases)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dou => "dou",
            Self::Rtm => "rtm",
            Self::Scenarios => "scenarios",
            Self::TestCases => "test_cases",
            Self::AutomatedTest => "automated_test",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
