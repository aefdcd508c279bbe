use super::{calc_quantize, decompose, PopupAction, QuantizePopup, DENOMINATORS};
use log::debug;
use std::fmt;

/// Receives the newly encoded quantize value. Fire-and-forget.
pub type OnSelect = Box<dyn FnMut(f64)>;

/// What the selector shows for the current value.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorView {
    pub denominator: String,
    pub triplet: bool,
    pub dotted: bool,
    pub popup: QuantizePopup,
}

impl fmt::Display for SelectorView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "♪ {}", self.denominator)?;
        if self.triplet {
            write!(f, " 3")?;
        }
        if self.dotted {
            write!(f, " •")?;
        }
        Ok(())
    }
}

/// Compact control for picking the quantize grid.
///
/// The current `value` is a prop owned by the caller: selecting a new value
/// only reports it through `on_select`, and the caller feeds it back with
/// [`QuantizeSelector::set_value`].
pub struct QuantizeSelector {
    value: f64,
    popup_hidden: bool,
    on_select: OnSelect,
}

impl QuantizeSelector {
    pub fn new(value: f64, on_select: OnSelect) -> Self {
        Self {
            value,
            popup_hidden: true,
            on_select,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    pub fn popup_hidden(&self) -> bool {
        self.popup_hidden
    }

    /// Click on the main content area.
    pub fn toggle_popup(&mut self) {
        self.popup_hidden = !self.popup_hidden;
    }

    pub fn view(&self) -> SelectorView {
        let quantize = decompose(self.value);
        SelectorView {
            denominator: quantize.denominator.to_string(),
            triplet: quantize.triplet,
            dotted: quantize.dotted,
            popup: self.popup(),
        }
    }

    pub fn popup(&self) -> QuantizePopup {
        let quantize = decompose(self.value);
        QuantizePopup::new(
            self.popup_hidden,
            quantize.denominator,
            quantize.dotted,
            quantize.triplet,
        )
    }

    /// Steps through [`DENOMINATORS`]: a negative `delta_y` (wheel up) moves
    /// to the next entry, anything else to the previous one. The index is
    /// clamped at both ends and the modifiers are kept.
    pub fn on_wheel(&mut self, delta_y: f64) {
        let quantize = decompose(self.value);
        let current = quantize
            .denominator_index()
            .map_or(-1, |index| index as isize);
        let delta = if delta_y < 0.0 { 1 } else { -1 };
        let index = (current + delta).clamp(0, DENOMINATORS.len() as isize - 1) as usize;
        debug!(
            "Quantize wheel step: index {} -> {} (delta_y {})",
            current, index, delta_y
        );
        self.select(calc_quantize(
            f64::from(DENOMINATORS[index]),
            quantize.dotted,
            quantize.triplet,
        ));
    }

    pub fn change_value(&mut self, denominator: u32) {
        let quantize = decompose(self.value);
        self.select(calc_quantize(
            f64::from(denominator),
            quantize.dotted,
            quantize.triplet,
        ));
    }

    pub fn change_dotted(&mut self, dotted: bool) {
        let denominator = decompose(self.value).denominator.to_f64();
        self.select(calc_quantize(denominator, dotted, false));
    }

    pub fn change_triplet(&mut self, triplet: bool) {
        let denominator = decompose(self.value).denominator.to_f64();
        self.select(calc_quantize(denominator, false, triplet));
    }

    pub fn apply(&mut self, action: PopupAction) {
        match action {
            PopupAction::Value(denominator) => self.change_value(denominator),
            PopupAction::Dotted(dotted) => self.change_dotted(dotted),
            PopupAction::Triplet(triplet) => self.change_triplet(triplet),
        }
    }

    fn select(&mut self, value: f64) {
        debug!("Quantize selected: {}", value);
        (self.on_select)(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn selector(value: f64) -> (QuantizeSelector, Rc<RefCell<Vec<f64>>>) {
        let selected = Rc::new(RefCell::new(Vec::new()));
        let sink = selected.clone();
        let selector = QuantizeSelector::new(value, Box::new(move |v| sink.borrow_mut().push(v)));
        (selector, selected)
    }

    #[test]
    fn test_popup_starts_hidden_and_toggles() {
        let (mut selector, _) = selector(8.0);
        assert!(selector.popup_hidden());
        selector.toggle_popup();
        assert!(!selector.popup_hidden());
        assert!(!selector.view().popup.hidden);
    }

    #[test]
    fn test_view_shows_triplet_marker() {
        let (selector, _) = selector(12.0);
        let view = selector.view();
        assert_eq!(view.denominator, "8");
        assert!(view.triplet);
        assert!(!view.dotted);
        assert_eq!(view.to_string(), "♪ 8 3");
    }

    #[test]
    fn test_wheel_up_moves_forward() {
        let (mut selector, selected) = selector(8.0);
        selector.on_wheel(-1.0);
        assert_eq!(*selected.borrow(), vec![16.0]);
    }

    #[test]
    fn test_wheel_down_moves_back() {
        let (mut selector, selected) = selector(8.0);
        selector.on_wheel(3.0);
        assert_eq!(*selected.borrow(), vec![4.0]);
    }

    #[test]
    fn test_unknown_denominator_wheel_down_clamps_to_first() {
        let (mut selector, selected) = selector(5.0);
        selector.on_wheel(1.0);
        assert_eq!(*selected.borrow(), vec![1.0]);
    }

    #[test]
    fn test_apply_routes_popup_actions() {
        let (mut selector, selected) = selector(8.0);
        selector.apply(PopupAction::Value(32));
        selector.apply(PopupAction::Triplet(true));
        assert_eq!(*selected.borrow(), vec![32.0, 12.0]);
    }
}
