pub mod metadata;
pub mod pacing;
pub mod providers;
pub mod recommendations;
