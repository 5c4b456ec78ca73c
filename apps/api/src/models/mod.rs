pub mod journal;
pub mod progress;
