use std::fmt;

use serde::Serialize;

/// Color themes a card header can use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderTemplate {
    Blue,
    Wathet,
    Turquoise,
    Carmine,
    Violet,
    Indigo,
    Red,
    Green,
    Yellow,
    Purple,
    Grey,
    #[default]
    Default,
}

impl HeaderTemplate {
    pub const ALL: [HeaderTemplate; 12] = [
        HeaderTemplate::Blue,
        HeaderTemplate::Wathet,
        HeaderTemplate::Turquoise,
        HeaderTemplate::Carmine,
        HeaderTemplate::Violet,
        HeaderTemplate::Indigo,
        HeaderTemplate::Red,
        HeaderTemplate::Green,
        HeaderTemplate::Yellow,
        HeaderTemplate::Purple,
        HeaderTemplate::Grey,
        HeaderTemplate::Default,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HeaderTemplate::Blue => "blue",
            HeaderTemplate::Wathet => "wathet",
            HeaderTemplate::Turquoise => "turquoise",
            HeaderTemplate::Carmine => "carmine",
            HeaderTemplate::Violet => "violet",
            HeaderTemplate::Indigo => "indigo",
            HeaderTemplate::Red => "red",
            HeaderTemplate::Green => "green",
            HeaderTemplate::Yellow => "yellow",
            HeaderTemplate::Purple => "purple",
            HeaderTemplate::Grey => "grey",
            HeaderTemplate::Default => "default",
        }
    }

    pub fn allowed() -> String {
        Self::ALL.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for HeaderTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_templates_only() {
        assert_eq!(HeaderTemplate::parse("wathet"), Some(HeaderTemplate::Wathet));
        assert_eq!(HeaderTemplate::parse("grey"), Some(HeaderTemplate::Grey));
        assert_eq!(HeaderTemplate::parse("gray"), None);
        assert_eq!(HeaderTemplate::default(), HeaderTemplate::Default);
    }
}
