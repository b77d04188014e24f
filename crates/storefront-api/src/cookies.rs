//! Session cookie construction.
//!
//! Both cookies are `HttpOnly`, `SameSite=Strict`, scoped to the configured
//! path, and `Secure` when configured. Clearing overwrites them with an
//! empty value that expires immediately.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cookie::time::Duration as CookieDuration;

use storefront_core::config::CookieConfig;

fn base_cookie(config: &CookieConfig, name: &str, value: String) -> Cookie<'static> {
    Cookie::build((name.to_owned(), value))
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Strict)
        .path(config.path.clone())
        .build()
}

fn with_lifetime(mut cookie: Cookie<'static>, lifetime: chrono::Duration) -> Cookie<'static> {
    cookie.set_max_age(CookieDuration::seconds(lifetime.num_seconds().max(0)));
    cookie
}

/// Adds the access token cookie.
pub fn set_access_cookie(
    jar: CookieJar,
    config: &CookieConfig,
    token: &str,
    lifetime: chrono::Duration,
) -> CookieJar {
    let cookie = base_cookie(config, &config.access_name, token.to_owned());
    jar.add(with_lifetime(cookie, lifetime))
}

/// Adds the refresh token cookie.
pub fn set_refresh_cookie(
    jar: CookieJar,
    config: &CookieConfig,
    token: &str,
    lifetime: chrono::Duration,
) -> CookieJar {
    let cookie = base_cookie(config, &config.refresh_name, token.to_owned());
    jar.add(with_lifetime(cookie, lifetime))
}

/// Overwrites both session cookies with immediately expiring blanks.
pub fn clear_session_cookies(jar: CookieJar, config: &CookieConfig) -> CookieJar {
    [&config.access_name, &config.refresh_name]
        .into_iter()
        .fold(jar, |jar, name| {
            let mut cookie = base_cookie(config, name, String::new());
            cookie.make_removal();
            jar.add(cookie)
        })
}

/// The refresh token presented by the client, if any.
pub fn refresh_token(jar: &CookieJar, config: &CookieConfig) -> Option<String> {
    jar.get(&config.refresh_name)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
}

/// The access token presented in the cookie, if any.
pub fn access_token(jar: &CookieJar, config: &CookieConfig) -> Option<String> {
    jar.get(&config.access_name)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
}
