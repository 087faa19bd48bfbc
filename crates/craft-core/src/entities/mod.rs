//! Entity structs for every artifact in the QA hierarchy.
//!
//! Each entity maps to a table in the libSQL store. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and schema
//! validation.

mod asset;
mod automated_test;
mod dou;
mod project;
mod rtm_item;
mod test_case;
mod test_scenario;
mod tree;

pub use asset::RawAsset;
pub use automated_test::AutomatedTest;
pub use dou::Dou;
pub use project::{Project, StatusChange};
pub use rtm_item::RtmItem;
pub use test_case::TestCase;
pub use test_scenario::TestScenario;
pub use tree::{DouNode, ProjectTree, RtmItemNode, ScenarioNode, TestCaseNode};
