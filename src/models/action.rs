//! Punch actions recorded by the time clock.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PayrollError;

/// A single kind of punch.
///
/// The stored label (as written to the event log) differs from the
/// snake_case name used in JSON payloads.
///
/// # Example
///
/// ```
/// use timesheet_payroll::models::Action;
///
/// let action: Action = "Lunch Break Out".parse().unwrap();
/// assert_eq!(action, Action::LunchOut);
/// assert_eq!(action.label(), "Lunch Break Out");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Start of the working day.
    SignIn,
    /// End of the working day.
    SignOut,
    /// Leaving for lunch.
    LunchOut,
    /// Back from lunch.
    LunchIn,
}

impl Action {
    /// All actions, in the order the form presents them.
    pub const ALL: [Action; 4] = [
        Action::SignIn,
        Action::SignOut,
        Action::LunchOut,
        Action::LunchIn,
    ];

    /// Returns the label stored in the event log.
    pub fn label(&self) -> &'static str {
        match self {
            Action::SignIn => "Sign In",
            Action::SignOut => "Sign Out",
            Action::LunchOut => "Lunch Break Out",
            Action::LunchIn => "Lunch Break In",
        }
    }

    /// Returns true for punches that may be recorded at most once per day.
    pub fn is_once_per_day(&self) -> bool {
        matches!(self, Action::SignIn | Action::SignOut)
    }

    fn snake_name(&self) -> &'static str {
        match self {
            Action::SignIn => "sign_in",
            Action::SignOut => "sign_out",
            Action::LunchOut => "lunch_out",
            Action::LunchIn => "lunch_in",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Action {
    type Err = PayrollError;

    /// Parses a stored label or a snake_case name, ignoring case and
    /// surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Action::ALL
            .into_iter()
            .find(|a| {
                a.label().eq_ignore_ascii_case(needle) || a.snake_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| PayrollError::UnknownAction {
                value: s.to_string(),
            })
    }
}
