use std::fmt;

/// The closed set of views the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewId {
    #[default]
    Home,
    Explore,
    Leaderboard,
    Adopted,
}

/// Path table. Exact string match only: no trailing-slash, case or
/// percent-decoding normalization.
const ROUTES: [(&str, ViewId); 4] = [
    ("/", ViewId::Home),
    ("/explore", ViewId::Explore),
    ("/leaderboard", ViewId::Leaderboard),
    ("/adopted", ViewId::Adopted),
];

impl ViewId {
    pub const ALL: [ViewId; 4] = [Self::Home, Self::Explore, Self::Leaderboard, Self::Adopted];

    /// Resolve a location pathname. Total over all strings; anything outside
    /// the route table falls back to [`ViewId::Home`].
    pub fn from_path(path: &str) -> Self {
        ROUTES
            .iter()
            .find(|(route, _)| *route == path)
            .map(|(_, view)| *view)
            .unwrap_or_default()
    }

    /// Canonical path for this view.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Explore => "/explore",
            Self::Leaderboard => "/leaderboard",
            Self::Adopted => "/adopted",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Explore => "explore",
            Self::Leaderboard => "leaderboard",
            Self::Adopted => "adopted",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
