pub mod admin;
pub mod lifecycle;
pub mod oracle;
pub mod play;
pub mod upkeep;
