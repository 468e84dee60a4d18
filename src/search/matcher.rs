//! URI substring matching over an application's redirect, home page and logout URIs.

use crate::graph::Application;

/// Every URI worth checking on an application, in a stable order:
/// web redirect URIs, web home page, web logout URL, then SPA redirect URIs.
/// Absent and empty values are skipped.
pub fn candidate_uris(app: &Application) -> impl Iterator<Item = &str> {
    let web = app.web.as_ref();
    let spa = app.spa.as_ref();

    let web_redirects = web
        .and_then(|w| w.redirect_uris.as_deref())
        .unwrap_or_default()
        .iter()
        .map(String::as_str);
    let home_page = web.and_then(|w| w.home_page_url.as_deref());
    let logout = web.and_then(|w| w.logout_url.as_deref());
    let spa_redirects = spa
        .and_then(|s| s.redirect_uris.as_deref())
        .unwrap_or_default()
        .iter()
        .map(String::as_str);

    web_redirects
        .chain(home_page)
        .chain(logout)
        .chain(spa_redirects)
        .filter(|uri| !uri.is_empty())
}

/// First candidate URI containing `needle` as a literal, case-sensitive substring.
///
/// An empty needle never matches.
pub fn first_match<'a>(app: &'a Application, needle: &str) -> Option<&'a str> {
    if needle.is_empty() {
        return None;
    }

    candidate_uris(app).find(|uri| uri.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::models::{SpaApplication, WebApplication};

    fn web_app(redirects: &[&str], home: Option<&str>, logout: Option<&str>) -> Application {
        Application {
            display_name: Some("Test".into()),
            web: Some(WebApplication {
                redirect_uris: Some(redirects.iter().map(|s| s.to_string()).collect()),
                home_page_url: home.map(String::from),
                logout_url: logout.map(String::from),
            }),
            ..Application::default()
        }
    }

    #[test]
    fn test_candidate_order() {
        let mut app = web_app(
            &["https://a.example.com/cb"],
            Some("https://home.example.com"),
            Some("https://logout.example.com"),
        );
        app.spa = Some(SpaApplication {
            redirect_uris: Some(vec!["https://spa.example.com".into()]),
        });

        let uris: Vec<&str> = candidate_uris(&app).collect();
        assert_eq!(
            uris,
            vec![
                "https://a.example.com/cb",
                "https://home.example.com",
                "https://logout.example.com",
                "https://spa.example.com",
            ]
        );
    }

    #[test]
    fn test_matches_redirect_uri() {
        let app = web_app(&["https://app.example.com/auth"], None, None);
        assert_eq!(
            first_match(&app, "example.com"),
            Some("https://app.example.com/auth")
        );
    }

    #[test]
    fn test_matches_home_and_logout() {
        let app = web_app(&[], Some("https://portal.contoso.com"), None);
        assert_eq!(
            first_match(&app, "portal"),
            Some("https://portal.contoso.com")
        );

        let app = web_app(&[], None, Some("https://contoso.com/signout"));
        assert_eq!(
            first_match(&app, "/signout"),
            Some("https://contoso.com/signout")
        );
    }

    #[test]
    fn test_matches_spa_redirect() {
        let app = Application {
            spa: Some(SpaApplication {
                redirect_uris: Some(vec!["http://localhost:3000".into()]),
            }),
            ..Application::default()
        };
        assert_eq!(
            first_match(&app, "localhost"),
            Some("http://localhost:3000")
        );
    }

    #[test]
    fn test_first_matching_uri_wins() {
        let app = web_app(
            &["https://one.example.com", "https://two.example.com"],
            None,
            None,
        );
        assert_eq!(
            first_match(&app, "example.com"),
            Some("https://one.example.com")
        );
    }

    #[test]
    fn test_case_sensitive() {
        let app = web_app(&["https://App.Example.com/auth"], None, None);
        assert_eq!(first_match(&app, "example.com"), None);
        assert!(first_match(&app, "Example.com").is_some());
    }

    #[test]
    fn test_absent_and_empty_fields_never_match() {
        let app = Application::default();
        assert_eq!(candidate_uris(&app).count(), 0);
        assert_eq!(first_match(&app, "x"), None);

        let app = web_app(&[""], Some(""), None);
        assert_eq!(candidate_uris(&app).count(), 0);
        assert_eq!(first_match(&app, "x"), None);
    }

    #[test]
    fn test_empty_needle_never_matches() {
        let app = web_app(&["https://app.example.com"], None, None);
        assert_eq!(first_match(&app, ""), None);
    }

    #[test]
    fn test_no_wildcards() {
        let app = web_app(&["https://app.example.com"], None, None);
        assert_eq!(first_match(&app, "app.*.com"), None);
        assert_eq!(first_match(&app, "app.example.com "), None);
    }
}
