//! The closed set of base store actions and the selection a store is built with.

use crate::api::ConfigError;
use std::fmt;
use std::str::FromStr;

/// One of the five base CRUD actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StoreAction {
    FetchAll,
    FetchOne,
    Create,
    Update,
    Remove,
}

impl StoreAction {
    pub const ALL: [StoreAction; 5] = [
        StoreAction::FetchAll,
        StoreAction::FetchOne,
        StoreAction::Create,
        StoreAction::Update,
        StoreAction::Remove,
    ];

    /// Canonical action name.
    pub fn name(&self) -> &'static str {
        match self {
            StoreAction::FetchAll => "fetchAll",
            StoreAction::FetchOne => "fetchOne",
            StoreAction::Create => "create",
            StoreAction::Update => "update",
            StoreAction::Remove => "remove",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for StoreAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the canonical names and their snake_case spellings.
impl FromStr for StoreAction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fetchAll" | "fetch_all" => Ok(StoreAction::FetchAll),
            "fetchOne" | "fetch_one" => Ok(StoreAction::FetchOne),
            "create" => Ok(StoreAction::Create),
            "update" => Ok(StoreAction::Update),
            "remove" => Ok(StoreAction::Remove),
            other => Err(ConfigError::UnknownAction(other.to_string())),
        }
    }
}

/// A fixed subset of [`StoreAction`]s.
///
/// ```rust
/// use rest_store::framework::{ActionSet, StoreAction};
///
/// let read_only = ActionSet::parse(["fetchAll", "fetchOne"]).unwrap();
/// assert!(read_only.contains(StoreAction::FetchAll));
/// assert!(!read_only.contains(StoreAction::Remove));
///
/// assert!(ActionSet::parse(["archive"]).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionSet(u8);

impl ActionSet {
    pub fn all() -> Self {
        StoreAction::ALL.into_iter().collect()
    }

    pub fn empty() -> Self {
        Self(0)
    }

    /// Validates every name against the closed set of actions.
    pub fn parse<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| name.as_ref().parse::<StoreAction>())
            .collect()
    }

    pub fn insert(&mut self, action: StoreAction) {
        self.0 |= action.bit();
    }

    pub fn contains(&self, action: StoreAction) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = StoreAction> + '_ {
        StoreAction::ALL
            .into_iter()
            .filter(move |action| self.contains(*action))
    }
}

impl Default for ActionSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<StoreAction> for ActionSet {
    fn from_iter<I: IntoIterator<Item = StoreAction>>(iter: I) -> Self {
        let mut set = ActionSet::empty();
        for action in iter {
            set.insert(action);
        }
        set
    }
}

impl fmt::Debug for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
