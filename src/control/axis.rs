use crate::transform::ValueAxis;
use log::debug;

/// Receives the value of a clicked axis label.
pub type OnClickAxis = Box<dyn FnMut(f64)>;

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub value: f64,
    pub text: String,
    pub y: f64,
}

/// Clickable value labels beside a graph.
///
/// Label values may live on a shifted scale: `offset` is added to a label
/// to find its raw value on the graph, e.g. pitch bend labels run
/// `-0x2000..0x2000` over a `0..0x4000` graph.
pub struct GraphAxis {
    values: Vec<f64>,
    offset: f64,
    on_click: OnClickAxis,
}

impl GraphAxis {
    pub fn new(values: Vec<f64>, offset: f64, on_click: OnClickAxis) -> Self {
        Self {
            values,
            offset,
            on_click,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Labels top to bottom, each at the row of its raw value.
    pub fn labels(&self, axis: &ValueAxis) -> Vec<AxisLabel> {
        self.values
            .iter()
            .rev()
            .map(|&value| AxisLabel {
                value,
                text: format!("{}", value),
                y: axis.value_to_y_exact(value + self.offset),
            })
            .collect()
    }

    /// Clicks the label at `index` in the caller's order. Returns false when
    /// there is no such label.
    pub fn click(&mut self, index: usize) -> bool {
        match self.values.get(index) {
            Some(&value) => {
                debug!("Axis label clicked: {}", value);
                (self.on_click)(value);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_labels_top_to_bottom() {
        let axis = GraphAxis::new(vec![0.0, 64.0, 127.0], 0.0, Box::new(|_| {}));
        let values = ValueAxis::new(131.0, 2.0, 127.0).unwrap();
        let labels = axis.labels(&values);
        let texts: Vec<&str> = labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["127", "64", "0"]);
        assert_eq!(labels[0].y, 2.0);
        assert_eq!(labels[2].y, 129.0);
    }

    #[test]
    fn test_partial_axis_keeps_raw_rows() {
        let axis = GraphAxis::new(vec![32.0, 64.0], 0.0, Box::new(|_| {}));
        let values = ValueAxis::new(131.0, 2.0, 127.0).unwrap();
        let labels = axis.labels(&values);
        assert_eq!(labels[0].y, values.value_to_y_exact(64.0));
        assert_eq!(labels[1].y, values.value_to_y_exact(32.0));
        assert!((labels[1].y - 97.0).abs() < 1e-9);
    }

    #[test]
    fn test_offset_shifts_labels_onto_graph() {
        let axis = GraphAxis::new(vec![-8192.0, 0.0], 8192.0, Box::new(|_| {}));
        let values = ValueAxis::new(200.0, 2.0, 16384.0).unwrap();
        let labels = axis.labels(&values);
        assert_eq!(labels[0].y, 100.0);
        assert_eq!(labels[1].y, 198.0);
    }

    #[test]
    fn test_click_forwards_value() {
        let clicked = Rc::new(RefCell::new(Vec::new()));
        let sink = clicked.clone();
        let mut axis = GraphAxis::new(
            vec![-8192.0, 0.0, 8191.0],
            8192.0,
            Box::new(move |v| sink.borrow_mut().push(v)),
        );
        assert!(axis.click(0));
        assert!(!axis.click(3));
        assert_eq!(*clicked.borrow(), vec![-8192.0]);
    }
}
