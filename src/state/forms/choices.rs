//! Enumerated choices offered by the intake form

use serde::{Deserialize, Serialize};

/// A closed set of options a select-style field can take
pub trait Choice: Copy + PartialEq + 'static {
    /// Every option, in display order
    const ALL: &'static [Self];

    /// Human-readable label
    fn label(self) -> &'static str;

    /// Step to the next/previous option, wrapping. An unset choice starts at
    /// the first option going forward and the last going backward.
    fn cycle(current: Option<Self>, forward: bool) -> Option<Self> {
        let all = Self::ALL;
        if all.is_empty() {
            return None;
        }
        let next_index = match current.and_then(|c| all.iter().position(|o| *o == c)) {
            None if forward => 0,
            None => all.len() - 1,
            Some(i) if forward => (i + 1) % all.len(),
            Some(0) => all.len() - 1,
            Some(i) => i - 1,
        };
        Some(all[next_index])
    }
}

/// Kind of project the client wants built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    NewWebsite,
    WebsiteRedesign,
    EcommerceStore,
    WebApplication,
    WordpressSite,
    CustomDevelopment,
}

impl Choice for ProjectType {
    const ALL: &'static [Self] = &[
        Self::NewWebsite,
        Self::WebsiteRedesign,
        Self::EcommerceStore,
        Self::WebApplication,
        Self::WordpressSite,
        Self::CustomDevelopment,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::NewWebsite => "New Website",
            Self::WebsiteRedesign => "Website Redesign",
            Self::EcommerceStore => "E-commerce Store",
            Self::WebApplication => "Web Application",
            Self::WordpressSite => "WordPress Site",
            Self::CustomDevelopment => "Custom Development",
        }
    }
}

/// Preferred delivery timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "asap")]
    Asap,
    #[serde(rename = "1-2-weeks")]
    OneToTwoWeeks,
    #[default]
    #[serde(rename = "1-month")]
    OneMonth,
    #[serde(rename = "2-3-months")]
    TwoToThreeMonths,
    #[serde(rename = "flexible")]
    Flexible,
}

impl Timeline {
    pub fn description(self) -> &'static str {
        match self {
            Self::Asap => "Need it done as quickly as possible",
            Self::OneToTwoWeeks => "Standard turnaround time",
            Self::OneMonth => "Allows for detailed planning",
            Self::TwoToThreeMonths => "Complex project timeline",
            Self::Flexible => "No specific deadline",
        }
    }
}

impl Choice for Timeline {
    const ALL: &'static [Self] = &[
        Self::Asap,
        Self::OneToTwoWeeks,
        Self::OneMonth,
        Self::TwoToThreeMonths,
        Self::Flexible,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Asap => "ASAP (Rush Job)",
            Self::OneToTwoWeeks => "1-2 Weeks",
            Self::OneMonth => "1 Month",
            Self::TwoToThreeMonths => "2-3 Months",
            Self::Flexible => "Flexible",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod project_type {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_has_six_options() {
            assert_eq!(ProjectType::ALL.len(), 6);
        }

        #[test]
        fn test_parses_known_wire_value() {
            let parsed: ProjectType = serde_json::from_str("\"ecommerce-store\"").unwrap();
            assert_eq!(parsed, ProjectType::EcommerceStore);
        }

        #[test]
        fn test_rejects_unknown_wire_value() {
            assert!(serde_json::from_str::<ProjectType>("\"mobile-app\"").is_err());
            assert!(serde_json::from_str::<ProjectType>("\"\"").is_err());
        }

        #[test]
        fn test_serde_uses_wire_values() {
            let json = serde_json::to_string(&ProjectType::WordpressSite).unwrap();
            assert_eq!(json, "\"wordpress-site\"");
        }
    }

    mod timeline {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_default_is_one_month() {
            assert_eq!(Timeline::default(), Timeline::OneMonth);
        }

        #[test]
        fn test_serde_uses_wire_values() {
            let wire: Vec<String> = Timeline::ALL
                .iter()
                .map(|t| serde_json::to_string(t).unwrap())
                .collect();
            assert_eq!(
                wire,
                vec!["\"asap\"", "\"1-2-weeks\"", "\"1-month\"", "\"2-3-months\"", "\"flexible\""]
            );
        }

        #[test]
        fn test_every_option_has_description() {
            assert!(Timeline::ALL.iter().all(|t| !t.description().is_empty()));
        }
    }

    mod cycle {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_unset_forward_starts_at_first() {
            assert_eq!(
                ProjectType::cycle(None, true),
                Some(ProjectType::NewWebsite)
            );
        }

        #[test]
        fn test_unset_backward_starts_at_last() {
            assert_eq!(
                ProjectType::cycle(None, false),
                Some(ProjectType::CustomDevelopment)
            );
        }

        #[test]
        fn test_forward_wraps() {
            assert_eq!(
                Timeline::cycle(Some(Timeline::Flexible), true),
                Some(Timeline::Asap)
            );
        }

        #[test]
        fn test_backward_wraps() {
            assert_eq!(
                Timeline::cycle(Some(Timeline::Asap), false),
                Some(Timeline::Flexible)
            );
        }
    }
}
