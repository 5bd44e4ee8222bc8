use super::region::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Danger,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLine {
    pub label: Option<&'static str>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub tone: Tone,
    pub lines: Vec<PanelLine>,
}

impl Panel {
    pub fn message(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            lines: vec![PanelLine {
                label: None,
                text: text.into(),
            }],
        }
    }

    pub fn fields(tone: Tone, fields: Vec<(&'static str, String)>) -> Self {
        Self {
            tone,
            lines: fields
                .into_iter()
                .map(|(label, text)| PanelLine {
                    label: Some(label),
                    text,
                })
                .collect(),
        }
    }

    pub fn field(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.label == Some(label))
            .map(|line| line.text.as_str())
    }

    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| match line.label {
                Some(label) => format!("{}: {}", label, line.text),
                None => line.text.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A result area scoped to one form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelView {
    pub panel: Option<Panel>,
}

impl PanelView {
    pub fn show(&mut self, panel: Panel) {
        self.panel = Some(panel);
    }
}

impl View for PanelView {
    fn clear(&mut self) {
        self.panel = None;
    }
}
