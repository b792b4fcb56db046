use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Role carried in the token's `roles` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Vendor,
}

impl FromStr for Role {
    type Err = String;

    /// Case-insensitive; a Spring style `ROLE_` prefix is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.strip_prefix("ROLE_").unwrap_or(&upper) {
            "ADMIN" => Ok(Role::Admin),
            "VENDOR" => Ok(Role::Vendor),
            _ => Err(format!("unknown role '{}'", s)),
        }
    }
}

/// Screens reachable by a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum Screen {
    Login,
    Dashboard,
    Vendors,
    Transactions,
    Orders,
    History,
    Report,
}

/// Set of views a session is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ViewSet {
    Unauthenticated,
    Admin,
    Vendor,
}

impl ViewSet {
    pub fn for_role(role: Option<Role>) -> Self {
        match role {
            Some(Role::Admin) => ViewSet::Admin,
            Some(Role::Vendor) => ViewSet::Vendor,
            None => ViewSet::Unauthenticated,
        }
    }

    pub fn views(&self) -> &'static [Screen] {
        match self {
            ViewSet::Unauthenticated => &[Screen::Login],
            ViewSet::Admin => &[Screen::Dashboard, Screen::Vendors, Screen::Transactions],
            ViewSet::Vendor => &[Screen::Orders, Screen::History, Screen::Report],
        }
    }

    /// First screen shown after dispatch.
    pub fn landing(&self) -> Screen {
        self.views()[0]
    }

    pub fn allows(&self, screen: Screen) -> bool {
        self.views().contains(&screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing_is_lenient_about_case_and_prefix() {
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("vendor".parse::<Role>(), Ok(Role::Vendor));
        assert_eq!("ROLE_ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert!("MANAGER".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn view_sets_land_on_first_screen() {
        assert_eq!(ViewSet::Admin.landing(), Screen::Dashboard);
        assert_eq!(ViewSet::Vendor.landing(), Screen::Orders);
        assert_eq!(ViewSet::Unauthenticated.landing(), Screen::Login);
        assert!(!ViewSet::Vendor.allows(Screen::Transactions));
        assert!(ViewSet::Admin.allows(Screen::Vendors));
    }
}
