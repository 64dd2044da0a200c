//! Portal login
//!
//! Logging in is a form round trip: GET the login page, copy every field of
//! its first form (hidden tokens included), fill in the credentials, submit,
//! and check where the portal lands us.

use crate::config::{Config, Credentials, PortalConfig};
use crate::crawler::fetcher::{build_http_client, fetch_page, HttpPageSource};
use crate::HarvestError;
use reqwest::{Client, Method};
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

/// Form field carrying the login id
pub const USERNAME_FIELD: &str = "username";

/// Form field carrying the password
pub const PASSWORD_FIELD: &str = "password";

static FORM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("form").expect("static selector"));
static INPUT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("input").expect("static selector"));

/// The first form of the login page, ready to be submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    /// Absolute submit URL
    pub action: Url,

    /// GET or POST
    pub method: Method,

    /// Field names and values in document order
    pub fields: Vec<(String, String)>,
}

impl LoginForm {
    /// Reads the first `<form>` of a page
    ///
    /// Submit buttons and image inputs are skipped, as are unchecked
    /// checkboxes and radio buttons. Returns None if the page has no form.
    pub fn parse(html: &str, page_url: &Url) -> Option<Self> {
        let document = Html::parse_document(html);
        let form = document.select(&FORM).next()?;

        let action = match form.value().attr("action").map(str::trim) {
            Some(action) if !action.is_empty() => page_url.join(action).ok()?,
            _ => page_url.clone(),
        };

        let method = match form.value().attr("method") {
            Some(method) if method.eq_ignore_ascii_case("get") => Method::GET,
            _ => Method::POST,
        };

        let mut fields = Vec::new();
        for input in form.select(&INPUT) {
            let name = match input.value().attr("name") {
                Some(n) if !n.is_empty() => n,
                _ => continue,
            };
            let input_type = input
                .value()
                .attr("type")
                .unwrap_or("text")
                .to_ascii_lowercase();

            if matches!(input_type.as_str(), "submit" | "image" | "button" | "reset") {
                continue;
            }

            if (input_type == "radio" || input_type == "checkbox")
                && input.value().attr("checked").is_none()
            {
                continue;
            }

            let value = input.value().attr("value").unwrap_or_default();
            fields.push((name.to_string(), value.to_string()));
        }

        Some(Self {
            action,
            method,
            fields,
        })
    }

    /// Sets a field, appending it if the form does not have it
    pub fn set(&mut self, name: &str, value: &str) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some(existing) => existing.1 = value.to_string(),
            None => self.fields.push((name.to_string(), value.to_string())),
        }
    }
}

/// An authenticated portal session
///
/// Holds the cookie-carrying client that completed the login.
pub struct Session {
    client: Client,
    home_url: Url,
}

impl Session {
    /// Builds a client from `config` and logs in with `credentials`
    pub async fn login(config: &Config, credentials: &Credentials) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.user_agent)?;
        let home_url = login(&client, &config.portal, credentials).await?;
        Ok(Self { client, home_url })
    }

    /// Page the login landed on
    pub fn home_url(&self) -> &Url {
        &self.home_url
    }

    /// Turns the session into a page source for the crawler
    pub fn into_page_source(self) -> HttpPageSource {
        HttpPageSource::new(self.client)
    }
}

/// Logs in to the portal with an existing client
///
/// # Arguments
///
/// * `client` - A cookie-keeping client (see `build_http_client`)
/// * `portal` - Portal location and paths
/// * `credentials` - Login id and password
///
/// # Returns
///
/// * `Ok(Url)` - The home page the portal redirected to
/// * `Err(HarvestError::Authentication)` - The portal did not land on the home path
/// * `Err(HarvestError)` - The login page could not be fetched or submitted
pub async fn login(
    client: &Client,
    portal: &PortalConfig,
    credentials: &Credentials,
) -> Result<Url, HarvestError> {
    let login_url = portal.login_url()?;
    tracing::info!("Logging in at {} as {}", login_url, credentials.id);

    let page = fetch_page(client, &login_url).await?;
    let mut form = LoginForm::parse(&page.body, &page.url).ok_or_else(|| {
        HarvestError::MissingForm {
            url: page.url.to_string(),
        }
    })?;

    form.set(USERNAME_FIELD, &credentials.id);
    form.set(PASSWORD_FIELD, &credentials.password);

    let request = client.request(form.method.clone(), form.action.clone());
    let request = if form.method == Method::GET {
        request.query(&form.fields)
    } else {
        request.form(&form.fields)
    };

    let response = request.send().await.map_err(|source| HarvestError::Http {
        url: form.action.to_string(),
        source,
    })?;

    let landing = response.url().clone();
    tracing::debug!(
        "Login form submitted, landed on {} ({})",
        landing,
        response.status()
    );

    if landing.path() != portal.home_path {
        tracing::error!("Login landed on {} instead of {}", landing.path(), portal.home_path);
        return Err(HarvestError::Authentication {
            user: credentials.id.clone(),
        });
    }

    tracing::info!("Logged in as {}", credentials.id);
    Ok(landing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_page_url() -> Url {
        Url::parse("https://portal.example/auth/login").unwrap()
    }

    #[test]
    fn test_parse_form_fields() {
        let html = r#"
            <html><body>
            <form action="/auth/login" method="post">
                <input type="hidden" name="_token" value="abc123">
                <input type="text" name="username" value="">
                <input type="password" name="password">
                <input type="checkbox" name="remember" value="1">
                <input type="checkbox" name="agree" value="yes" checked>
                <input type="submit" name="go" value="Login">
                <input type="text" value="nameless">
            </form>
            </body></html>
        "#;

        let form = LoginForm::parse(html, &login_page_url()).unwrap();
        assert_eq!(form.action.as_str(), "https://portal.example/auth/login");
        assert_eq!(form.method, Method::POST);
        assert_eq!(
            form.fields,
            vec![
                ("_token".to_string(), "abc123".to_string()),
                ("username".to_string(), String::new()),
                ("password".to_string(), String::new()),
                ("agree".to_string(), "yes".to_string()),
            ]
        );
    }

    #[test]
    fn test_first_form_wins() {
        let html = r#"
            <form action="/first"><input name="a" value="1"></form>
            <form action="/second"><input name="b" value="2"></form>
        "#;
        let form = LoginForm::parse(html, &login_page_url()).unwrap();
        assert_eq!(form.action.path(), "/first");
        assert_eq!(form.fields, vec![("a".to_string(), "1".to_string())]);
    }

    #[test]
    fn test_missing_action_posts_back_to_page() {
        let html = r#"<form><input name="username"></form>"#;
        let form = LoginForm::parse(html, &login_page_url()).unwrap();
        assert_eq!(form.action, login_page_url());
    }

    #[test]
    fn test_get_method() {
        let html = r#"<form method="GET" action="search"></form>"#;
        let form = LoginForm::parse(html, &login_page_url()).unwrap();
        assert_eq!(form.method, Method::GET);
        assert_eq!(form.action.as_str(), "https://portal.example/auth/search");
    }

    #[test]
    fn test_no_form() {
        assert!(LoginForm::parse("<html><body></body></html>", &login_page_url()).is_none());
    }

    #[test]
    fn test_set_overrides_and_appends() {
        let html = r#"<form><input name="username" value="old"></form>"#;
        let mut form = LoginForm::parse(html, &login_page_url()).unwrap();
        form.set(USERNAME_FIELD, "learner");
        form.set(PASSWORD_FIELD, "secret");
        assert_eq!(
            form.fields,
            vec![
                ("username".to_string(), "learner".to_string()),
                ("password".to_string(), "secret".to_string()),
            ]
        );
    }
}
