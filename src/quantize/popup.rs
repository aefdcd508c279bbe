use super::{Ratio, DENOMINATORS};

/// Something the user picked in the quantize popup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PopupAction {
    /// A new base denominator; the current modifiers are kept.
    Value(u32),
    /// The dotted toggle's new state; clears triplet.
    Dotted(bool),
    /// The triplet toggle's new state; clears dotted.
    Triplet(bool),
}

/// View model for the direct-selection popup.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizePopup {
    pub hidden: bool,
    pub value: Ratio,
    pub values: &'static [u32],
    pub dotted: bool,
    pub triplet: bool,
}

impl QuantizePopup {
    pub(crate) fn new(hidden: bool, value: Ratio, dotted: bool, triplet: bool) -> Self {
        Self {
            hidden,
            value,
            values: &DENOMINATORS,
            dotted,
            triplet,
        }
    }

    pub fn is_selected(&self, denominator: u32) -> bool {
        self.value == Ratio::from(denominator)
    }

    /// Action fired by clicking the dotted button.
    pub fn toggle_dotted(&self) -> PopupAction {
        PopupAction::Dotted(!self.dotted)
    }

    /// Action fired by clicking the triplet button.
    pub fn toggle_triplet(&self) -> PopupAction {
        PopupAction::Triplet(!self.triplet)
    }
}
