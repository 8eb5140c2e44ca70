/// Gate between editing analysis preferences and running the analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LockState {
    #[default]
    Locked,
    Unlocked,
}

impl LockState {
    pub fn toggled(self) -> Self {
        match self {
            Self::Locked => Self::Unlocked,
            Self::Unlocked => Self::Locked,
        }
    }

    pub fn is_locked(self) -> bool {
        matches!(self, Self::Locked)
    }

    /// Preference inputs are read-only while locked.
    pub fn inputs_disabled(self) -> bool {
        self.is_locked()
    }

    /// The analysis action is only available while locked.
    pub fn analysis_enabled(self) -> bool {
        self.is_locked()
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Locked => "\u{1F512}",
            Self::Unlocked => "\u{1F513}",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
        }
    }
}
