use super::{flash_list, layout};
use crate::api::flash::Flash;

fn credentials_page(title: &str, action: &str, submit: &str, footer: &str, flashes: &[Flash]) -> String {
    let body = format!(
        "<main class=\"auth\">\n<div class=\"card\">\n<h1>{title}</h1>\n{flashes}\n\
         <form method=\"post\" action=\"{action}\">\n\
         <label>Username<br><input type=\"text\" name=\"username\" required autofocus></label><br>\n\
         <label>Password<br><input type=\"password\" name=\"password\" required></label><br>\n\
         <button type=\"submit\">{submit}</button>\n</form>\n<p>{footer}</p>\n</div>\n</main>",
        flashes = flash_list(flashes),
    );
    layout(title, &body)
}

#[must_use]
pub fn login_page(flashes: &[Flash]) -> String {
    credentials_page(
        "Admin Login",
        "/login",
        "Log in",
        "No account? <a href=\"/register\">Register</a>",
        flashes,
    )
}

#[must_use]
pub fn register_page(flashes: &[Flash]) -> String {
    credentials_page(
        "Create Admin Account",
        "/register",
        "Register",
        "Already registered? <a href=\"/login\">Log in</a>",
        flashes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_page_posts_to_login() {
        let html = login_page(&[]);
        assert!(html.contains("action=\"/login\""));
        assert!(html.contains("name=\"password\""));
    }

    #[test]
    fn test_register_page_links_back_to_login() {
        let html = register_page(&[]);
        assert!(html.contains("action=\"/register\""));
        assert!(html.contains("href=\"/login\""));
    }
}
