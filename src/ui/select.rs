use super::region::View;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

/// A selection control. The first option is always the non-selectable
/// placeholder, whose value is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectView {
    pub options: Vec<SelectOption>,
    pub selected: String,
}

impl SelectView {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            options: vec![SelectOption {
                value: String::new(),
                label: placeholder.into(),
                disabled: true,
            }],
            selected: String::new(),
        }
    }

    pub fn push_option(&mut self, value: impl ToString, label: impl Into<String>) {
        self.options.push(SelectOption {
            value: value.to_string(),
            label: label.into(),
            disabled: false,
        });
    }

    /// Change the selection. Unknown values leave it untouched.
    pub fn select(&mut self, value: &str) -> bool {
        if self.options.iter().any(|option| option.value == value) {
            self.selected = value.to_string();
            true
        } else {
            false
        }
    }

    /// The chosen value, or `None` while the placeholder is selected.
    pub fn selected_value(&self) -> Option<&str> {
        if self.selected.is_empty() {
            None
        } else {
            Some(&self.selected)
        }
    }

    pub fn placeholder(&self) -> &SelectOption {
        &self.options[0]
    }

    /// Options after the placeholder, in insertion order.
    pub fn choices(&self) -> &[SelectOption] {
        &self.options[1..]
    }
}

impl View for SelectView {
    fn clear(&mut self) {
        self.options.truncate(1);
        self.selected.clear();
    }
}
