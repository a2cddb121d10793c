//! Dashboard tabs and role-based visibility.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every panel the dashboard can show. Serialized with the same ids the
/// action scripts use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tab {
    #[serde(rename = "request-form")]
    RequestForm,
    #[serde(rename = "prompt-test")]
    PromptTest,
    #[serde(rename = "my-projects")]
    MyProjects,
    #[serde(rename = "guide")]
    Guide,
    #[serde(rename = "request-management")]
    RequestManagement,
    #[serde(rename = "project-management")]
    ProjectManagement,
    #[serde(rename = "statistics")]
    Statistics,
    #[serde(rename = "token-management")]
    TokenManagement,
}

pub const USER_TABS: [Tab; 4] = [Tab::RequestForm, Tab::PromptTest, Tab::MyProjects, Tab::Guide];

pub const ADMIN_TABS: [Tab; 4] = [
    Tab::RequestManagement,
    Tab::ProjectManagement,
    Tab::Statistics,
    Tab::TokenManagement,
];

impl Tab {
    pub fn id(self) -> &'static str {
        match self {
            Tab::RequestForm => "request-form",
            Tab::PromptTest => "prompt-test",
            Tab::MyProjects => "my-projects",
            Tab::Guide => "guide",
            Tab::RequestManagement => "request-management",
            Tab::ProjectManagement => "project-management",
            Tab::Statistics => "statistics",
            Tab::TokenManagement => "token-management",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::RequestForm => "Request Form",
            Tab::PromptTest => "Prompt Test",
            Tab::MyProjects => "My Projects",
            Tab::Guide => "Guide",
            Tab::RequestManagement => "Request Management",
            Tab::ProjectManagement => "Project Management",
            Tab::Statistics => "Statistics",
            Tab::TokenManagement => "Token Management",
        }
    }

    pub fn is_admin(self) -> bool {
        ADMIN_TABS.contains(&self)
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Tabs shown in the tab bar for the current role.
pub fn visible_tabs(is_admin: bool) -> &'static [Tab] {
    if is_admin { &ADMIN_TABS } else { &USER_TABS }
}

pub fn first_tab(is_admin: bool) -> Tab {
    visible_tabs(is_admin)[0]
}

/// The panel to render for `selected`, or `None` when the selection is not
/// part of the role's tab set. The content area then stays empty.
pub fn resolve_content(is_admin: bool, selected: Tab) -> Option<Tab> {
    visible_tabs(is_admin).contains(&selected).then_some(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_sets_are_disjoint() {
        for tab in USER_TABS {
            assert!(!tab.is_admin());
            assert!(!visible_tabs(true).contains(&tab));
        }
        for tab in ADMIN_TABS {
            assert!(tab.is_admin());
        }
    }

    #[test]
    fn test_resolve_content_hides_foreign_tab() {
        assert_eq!(resolve_content(false, Tab::Guide), Some(Tab::Guide));
        assert_eq!(resolve_content(false, Tab::Statistics), None);
        assert_eq!(resolve_content(true, Tab::RequestForm), None);
        assert_eq!(resolve_content(true, Tab::Statistics), Some(Tab::Statistics));
    }

    #[test]
    fn test_serde_ids() {
        let tab: Tab = serde_json::from_str("\"token-management\"").unwrap();
        assert_eq!(tab, Tab::TokenManagement);
        assert_eq!(serde_json::to_string(&Tab::PromptTest).unwrap(), "\"prompt-test\"");
        assert!(serde_json::from_str::<Tab>("\"settings\"").is_err());
        assert_eq!(first_tab(true), Tab::RequestManagement);
        assert_eq!(first_tab(false), Tab::RequestForm);
    }
}
