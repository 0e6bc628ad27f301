// URL path -> window identity, so navigation and the desktop stay in sync

use crate::state::window::WindowRecord;
use crate::state::OpenOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteWindow {
    pub kind: String,
    pub key: Option<String>,
    pub title: String,
}

impl RouteWindow {
    fn page(kind: &str, title: &str) -> Self {
        Self {
            kind: kind.to_string(),
            key: None,
            title: title.to_string(),
        }
    }

    fn keyed(kind: &str, key: &str) -> Self {
        Self {
            kind: kind.to_string(),
            key: Some(key.to_string()),
            title: key.to_string(),
        }
    }

    pub fn matches(&self, record: &WindowRecord) -> bool {
        record.matches_identity(&self.kind, self.key.as_deref())
    }

    /// Routed windows open maximized, like a page load
    pub fn open_options(&self) -> OpenOptions {
        OpenOptions {
            key: self.key.clone(),
            title: Some(self.title.clone()),
            maximized: true,
            ..OpenOptions::default()
        }
    }
}

/// Window a path should show, or `None` for paths the desktop doesn't own
pub fn route_window(path: &str) -> Option<RouteWindow> {
    // Drop query string and fragment
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let route = match segments.as_slice() {
        [] => RouteWindow::page("home", "Home"),
        ["explore"] => RouteWindow::page("explore", "Explore"),
        ["search"] => RouteWindow::page("search", "Search"),
        ["community"] => RouteWindow::page("community", "Community"),
        ["login"] => RouteWindow::page("login", "Login"),
        ["settings"] => RouteWindow::page("settings", "Settings"),
        ["about"] => RouteWindow::page("about", "About"),
        ["contact"] => RouteWindow::page("contact", "Contact"),
        ["posts"] => RouteWindow::page("posts", "Posts"),
        ["profile"] => RouteWindow::page("profile", "Profile"),
        ["profile", username] => RouteWindow::keyed("profile", username),
        ["post", slug] | ["posts", slug] => RouteWindow::keyed("post", slug),
        _ => return None,
    };
    Some(route)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_home() {
        assert_eq!(route_window("/"), Some(RouteWindow::page("home", "Home")));
        assert_eq!(route_window(""), Some(RouteWindow::page("home", "Home")));
    }

    #[test]
    fn ignores_trailing_slash_and_query() {
        assert_eq!(
            route_window("/search/?q=rust#top"),
            Some(RouteWindow::page("search", "Search"))
        );
    }

    #[test]
    fn keyed_routes_carry_their_key() {
        let post = route_window("/post/hello-world").unwrap();
        assert_eq!(post.kind, "post");
        assert_eq!(post.key.as_deref(), Some("hello-world"));
        assert_eq!(route_window("/posts/hello-world"), Some(post));

        let profile = route_window("/profile/max").unwrap();
        assert_eq!(profile.kind, "profile");
        assert_eq!(profile.key.as_deref(), Some("max"));
        assert_eq!(route_window("/profile").unwrap().key, None);
    }

    #[test]
    fn unknown_paths_are_ignored() {
        assert!(route_window("/admin").is_none());
        assert!(route_window("/post/a/b").is_none());
    }

    #[test]
    fn routed_windows_open_maximized() {
        let options = route_window("/community").unwrap().open_options();
        assert!(options.maximized);
        assert_eq!(options.title.as_deref(), Some("Community"));
    }
}
