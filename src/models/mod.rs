pub mod exam;
pub mod question;
pub mod slot;

pub use exam::{Audience, EndSemTagMode, ExamType, TrackingMode};
pub use question::{CoDescriptions, Question};
pub use slot::{CellCoord, OrPair, Slot, SlotRequirement};
