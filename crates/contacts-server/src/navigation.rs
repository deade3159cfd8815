//! Navigation state and the UI flags derived from it.
//!
//! A [`Navigation`] describes the page transition in flight, if any. Nothing
//! here is stored: the flags are recomputed from the descriptor on every render.

/// Phase of the in-flight navigation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavigationState {
    #[default]
    Idle,
    Loading,
}

/// Where a pending navigation is headed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingLocation {
    pub pathname: String,
    /// Query string including the leading `?`, or empty.
    pub search: String,
}

impl PendingLocation {
    /// Split an href like `/contacts/1?q=x` into pathname and search.
    pub fn parse(href: &str) -> Self {
        let href = href.split('#').next().unwrap_or_default();
        match href.split_once('?') {
            Some((path, query)) => Self {
                pathname: path.to_string(),
                search: format!("?{query}"),
            },
            None => Self {
                pathname: href.to_string(),
                search: String::new(),
            },
        }
    }

    /// Whether the query string carries `key`, with or without a value.
    pub fn has_query_param(&self, key: &str) -> bool {
        let query = self.search.trim_start_matches('?');
        url::form_urlencoded::parse(query.as_bytes()).any(|(k, _)| k == key)
    }
}

/// The in-flight navigation descriptor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Navigation {
    pub state: NavigationState,
    pub location: Option<PendingLocation>,
}

/// What the layout shows while a navigation is pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiState {
    Idle,
    Searching,
    Loading,
}

impl Navigation {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn loading(href: &str) -> Self {
        Self {
            state: NavigationState::Loading,
            location: Some(PendingLocation::parse(href)),
        }
    }

    /// A navigation is pending and its query string contains `q`.
    pub fn is_searching(&self) -> bool {
        self.location
            .as_ref()
            .is_some_and(|loc| loc.has_query_param("q"))
    }

    /// The detail pane dims while loading anything other than a search.
    pub fn shows_detail_loading(&self) -> bool {
        self.state == NavigationState::Loading && !self.is_searching()
    }

    /// The one flag the layout shows; a pending search takes precedence.
    pub fn ui_state(&self) -> UiState {
        if self.is_searching() {
            UiState::Searching
        } else if self.shows_detail_loading() {
            UiState::Loading
        } else {
            UiState::Idle
        }
    }
}

/// Class for a sidebar link to `to`: `"active"`, `"pending"` or `""`.
pub fn nav_link_class(to: &str, current_path: &str, navigation: &Navigation) -> &'static str {
    if path_matches(to, current_path) {
        return "active";
    }
    let pending = navigation.state != NavigationState::Idle
        && navigation
            .location
            .as_ref()
            .is_some_and(|loc| path_matches(to, &loc.pathname));
    if pending {
        "pending"
    } else {
        ""
    }
}

/// `path` is `to` or lies beneath it on a segment boundary.
fn path_matches(to: &str, path: &str) -> bool {
    let to = trim_trailing_slash(to);
    let path = trim_trailing_slash(path);
    if to == "/" {
        return path == "/";
    }
    path == to || path.strip_prefix(to).is_some_and(|rest| rest.starts_with('/'))
}

fn trim_trailing_slash(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}
