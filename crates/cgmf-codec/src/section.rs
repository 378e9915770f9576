//! One-way header/data/footer classification for a single file pass.

/// Where the current line falls within a file.
///
/// Transitions are one-way: the first line that parses as data moves
/// `BeforeData -> InData`, and the first subsequent line that fails to parse
/// as data moves `InData -> AfterData`. There is no backtracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    BeforeData,
    InData,
    AfterData,
}

impl Section {
    /// First data line seen.
    pub fn begin_data(&mut self) {
        if *self == Section::BeforeData {
            *self = Section::InData;
        }
    }

    /// First non-data line after data.
    pub fn end_data(&mut self) {
        if *self == Section::InData {
            *self = Section::AfterData;
        }
    }

    pub fn is_before_data(self) -> bool {
        self == Section::BeforeData
    }

    pub fn is_in_data(self) -> bool {
        self == Section::InData
    }

    pub fn is_after_data(self) -> bool {
        self == Section::AfterData
    }
}
