//! Label states that can be attached to a keypoint region.
//!
//! A region carries zero or more label states. Each state kind knows which
//! label names are selected and, when it has one, the color of the selection.

use serde::{Deserialize, Serialize};

use crate::color_utils::label_color;

/// Capability shared by every label state kind.
pub trait SelectedLabels {
    /// Key used for this state's names in serialized output.
    fn field_name(&self) -> &'static str;

    /// Color of the current selection, if this kind has colors.
    fn selected_color(&self) -> Option<&str>;

    /// Names of the currently selected labels, in declaration order.
    fn selected_names(&self) -> Vec<String>;
}

/// A single selectable label with its background color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Label text
    pub value: String,
    /// Background color as `#rrggbb`
    pub background: String,
    /// Whether the label is currently selected
    #[serde(default)]
    pub selected: bool,
}

/// Keypoint label control: a named set of colored labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyPointLabels {
    /// Control name
    pub name: String,
    /// Name of the image object this control labels
    pub to_name: String,
    labels: Vec<Label>,
}

impl KeyPointLabels {
    /// Create an empty control.
    pub fn new(name: impl Into<String>, to_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            to_name: to_name.into(),
            labels: Vec::new(),
        }
    }

    /// Add a label with a palette color.
    pub fn with_label(self, value: impl Into<String>) -> Self {
        let color = label_color(self.labels.len());
        self.with_colored_label(value, color)
    }

    /// Add a label with an explicit background color.
    pub fn with_colored_label(mut self, value: impl Into<String>, background: impl Into<String>) -> Self {
        self.labels.push(Label {
            value: value.into(),
            background: background.into(),
            selected: false,
        });
        self
    }

    /// All labels of this control.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Mark a label as selected. Returns false if no label has this value.
    pub fn select(&mut self, value: &str) -> bool {
        self.set_selected(value, true)
    }

    /// Mark a label as not selected. Returns false if no label has this value.
    pub fn unselect(&mut self, value: &str) -> bool {
        self.set_selected(value, false)
    }

    fn set_selected(&mut self, value: &str, selected: bool) -> bool {
        match self.labels.iter_mut().find(|l| l.value == value) {
            Some(label) => {
                label.selected = selected;
                true
            }
            None => false,
        }
    }
}

impl SelectedLabels for KeyPointLabels {
    fn field_name(&self) -> &'static str {
        crate::constants::DEFAULT_LABEL_FIELD
    }

    fn selected_color(&self) -> Option<&str> {
        self.labels
            .iter()
            .find(|l| l.selected)
            .map(|l| l.background.as_str())
    }

    fn selected_names(&self) -> Vec<String> {
        self.labels
            .iter()
            .filter(|l| l.selected)
            .map(|l| l.value.clone())
            .collect()
    }
}

/// Free-form choices attached to a region. Choices carry no color.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Choices {
    /// Control name
    pub name: String,
    choices: Vec<String>,
    selected: Vec<String>,
}

impl Choices {
    /// Create a choice set from the available options.
    pub fn new(name: impl Into<String>, choices: Vec<String>) -> Self {
        Self {
            name: name.into(),
            choices,
            selected: Vec::new(),
        }
    }

    /// Select an option. Unknown options are rejected.
    pub fn select(&mut self, choice: &str) -> bool {
        if !self.choices.iter().any(|c| c == choice) {
            return false;
        }
        if !self.selected.iter().any(|c| c == choice) {
            self.selected.push(choice.to_string());
        }
        true
    }
}

impl SelectedLabels for Choices {
    fn field_name(&self) -> &'static str {
        crate::constants::CHOICES_FIELD
    }

    fn selected_color(&self) -> Option<&str> {
        None
    }

    fn selected_names(&self) -> Vec<String> {
        self.choices
            .iter()
            .filter(|c| self.selected.contains(c))
            .cloned()
            .collect()
    }
}

/// Closed set of label state kinds a keypoint region accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LabelState {
    /// Colored keypoint labels
    KeyPointLabels(KeyPointLabels),
    /// Uncolored choices
    Choices(Choices),
}

impl SelectedLabels for LabelState {
    fn field_name(&self) -> &'static str {
        match self {
            LabelState::KeyPointLabels(s) => s.field_name(),
            LabelState::Choices(s) => s.field_name(),
        }
    }

    fn selected_color(&self) -> Option<&str> {
        match self {
            LabelState::KeyPointLabels(s) => s.selected_color(),
            LabelState::Choices(s) => s.selected_color(),
        }
    }

    fn selected_names(&self) -> Vec<String> {
        match self {
            LabelState::KeyPointLabels(s) => s.selected_names(),
            LabelState::Choices(s) => s.selected_names(),
        }
    }
}

impl From<KeyPointLabels> for LabelState {
    fn from(state: KeyPointLabels) -> Self {
        LabelState::KeyPointLabels(state)
    }
}

impl From<Choices> for LabelState {
    fn from(state: Choices) -> Self {
        LabelState::Choices(state)
    }
}
