//! Navigable panels and the appearance setting.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Dashboard,
    Tasks,
    Lists,
    AiAnalysis,
    Settings,
}

impl Panel {
    pub const ALL: [Panel; 5] = [
        Panel::Dashboard,
        Panel::Tasks,
        Panel::Lists,
        Panel::AiAnalysis,
        Panel::Settings,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Tasks => "My Tasks",
            Self::Lists => "My Lists",
            Self::AiAnalysis => "AI Analysis",
            Self::Settings => "Settings",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Appearance {
    #[default]
    Dark,
    Light,
}

impl Appearance {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }
}
