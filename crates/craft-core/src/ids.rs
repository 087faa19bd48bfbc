//! ID prefixes for store-assigned identifiers.
//!
//! IDs are generated by the store as `<prefix>-<16 hex chars>`, e.g.
//! `prj-3fa85f6457174562`.

pub const PREFIX_PROJECT: &str = "prj";
pub const PREFIX_ASSET: &str = "ast";
pub const PREFIX_DOU: &str = "dou";
pub const PREFIX_RTM_ITEM: &str = "rtm";
pub const PREFIX_SCENARIO: &str = "scn";
pub const PREFIX_TEST_CASE: &str = "tcs";
pub const PREFIX_AUTOMATED_TEST: &str = "aut";

/// Every prefix in hierarchy order.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_PROJECT,
    PREFIX_ASSET,
    PREFIX_DOU,
    PREFIX_RTM_ITEM,
    PREFIX_SCENARIO,
    PREFIX_TEST_CASE,
    PREFIX_AUTOMATED_TEST,
];
