//! Server-rendered HTML pages.
//!
//! Every value that came from a user or the database goes through
//! [`text`] or [`attr`] before it reaches the markup.

pub mod auth;
pub mod dashboard;

use std::borrow::Cow;
use std::fmt::Write;

use crate::api::flash::Flash;

const STYLE: &str = r"
body { font-family: system-ui, sans-serif; margin: 0; background: #f4f6f9; color: #222; }
header { display: flex; justify-content: space-between; align-items: center; padding: .75rem 1.5rem; background: #1f3a5f; color: #fff; }
header a { color: #fff; }
header img { width: 32px; height: 32px; border-radius: 50%; vertical-align: middle; margin-right: .5rem; }
main { padding: 1.5rem; }
.card { background: #fff; border-radius: 6px; padding: 1rem; margin-bottom: 1rem; box-shadow: 0 1px 2px rgba(0,0,0,.08); }
.auth { max-width: 360px; margin: 4rem auto; }
.stats { display: flex; gap: 1rem; flex-wrap: wrap; }
.stats .card { flex: 1; min-width: 140px; text-align: center; }
.stats strong { display: block; font-size: 1.6rem; }
.flash { padding: .6rem 1rem; border-radius: 4px; margin-bottom: .75rem; }
.flash-success { background: #dff5e3; }
.flash-error { background: #fde2e1; }
.flash-info { background: #e1effd; }
table { width: 100%; border-collapse: collapse; }
th, td { padding: .4rem .5rem; border-bottom: 1px solid #e5e5e5; text-align: left; }
input, select, button { padding: .35rem .5rem; margin: .15rem 0; }
form.inline { display: flex; gap: .5rem; flex-wrap: wrap; align-items: center; }
.pagination a, .pagination span { margin-right: .35rem; }
";

pub(crate) fn text(value: &str) -> Cow<'_, str> {
    html_escape::encode_text(value)
}

pub(crate) fn attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

pub(crate) fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        text(title)
    )
}

pub(crate) fn flash_list(flashes: &[Flash]) -> String {
    flashes.iter().fold(String::new(), |mut out, flash| {
        let _ = write!(
            out,
            "<div class=\"flash flash-{}\">{}</div>",
            flash.kind.as_str(),
            text(&flash.message)
        );
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::flash::FlashKind;

    #[test]
    fn test_flash_list_escapes_messages() {
        let html = flash_list(&[Flash {
            kind: FlashKind::Error,
            message: "<script>alert(1)</script>".to_string(),
        }]);

        assert!(html.contains("flash-error"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_layout_escapes_title() {
        let html = layout("A & B", "<p>body</p>");
        assert!(html.contains("<title>A &amp; B</title>"));
        assert!(html.contains("<p>body</p>"));
    }
}
