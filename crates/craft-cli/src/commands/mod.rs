pub mod asset;
pub mod dispatch;
pub mod dou;
pub mod generate;
pub mod project;
pub mod schema;
