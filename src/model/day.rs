use serde::{Deserialize, Serialize};

/// One teaching day. Ordinal order matches the weekly grid, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    pub const ALL: [Day; 5] = [Day::Monday, Day::Tuesday, Day::Wednesday, Day::Thursday, Day::Friday];
}

/// A time slot within a day, 1-indexed, `1..=MAX_BLOCK`.
pub type Block = u8;
