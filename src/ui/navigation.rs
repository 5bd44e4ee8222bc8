use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Overview,
    Tickets,
    Reports,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Overview, Section::Tickets, Section::Reports];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Overview => "Overview",
            Section::Tickets => "Tickets",
            Section::Reports => "Reports",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overview" => Ok(Section::Overview),
            "tickets" => Ok(Section::Tickets),
            "reports" => Ok(Section::Reports),
            other => Err(format!("Unknown section '{}'", other)),
        }
    }
}

/// Which section is visible. Exactly one is active at a time.
#[derive(Debug, Clone)]
pub struct Navigation {
    active: Section,
}

impl Default for Navigation {
    fn default() -> Self {
        Self {
            active: Section::Overview,
        }
    }
}

impl Navigation {
    pub fn select(&mut self, section: Section) {
        self.active = section;
    }

    pub fn active(&self) -> Section {
        self.active
    }

    pub fn is_visible(&self, section: Section) -> bool {
        self.active == section
    }

    /// Nav controls in display order with their active flag.
    pub fn items(&self) -> Vec<(Section, bool)> {
        Section::ALL
            .iter()
            .map(|section| (*section, *section == self.active))
            .collect()
    }
}
