// views/mod.rs - HTML fragments shared by every page
pub mod detail_row;

pub use detail_row::{detail_list, DetailRow};

use std::fmt;

use crate::middleware::AuthUser;
use crate::pages::NAV;

/// An HTML fragment that is safe to emit as-is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    /// Trusted markup, emitted verbatim
    pub fn raw(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Untrusted text, escaped
    pub fn text(text: &str) -> Self {
        Self(escape(text))
    }

    pub fn concat<I: IntoIterator<Item = Markup>>(parts: I) -> Self {
        Self(parts.into_iter().map(|m| m.0).collect())
    }

    pub fn push(&mut self, other: Markup) {
        self.0.push_str(&other.0);
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Page heading with a one-line description
pub fn heading(title: &str, description: &str) -> Markup {
    Markup::raw(format!(
        "<header class=\"page-header\"><h1>{}</h1><p>{}</p></header>",
        escape(title),
        escape(description)
    ))
}

/// Muted placeholder shown when a view has nothing to list
pub fn empty_state(message: &str) -> Markup {
    Markup::raw(format!("<p class=\"empty-state\">{}</p>", escape(message)))
}

/// Full document: navigation over every page route, then `body`.
pub fn layout(title: &str, active: &str, user: Option<&AuthUser>, body: Markup) -> Markup {
    let nav = Markup::concat(NAV.iter().map(|(path, label)| {
        let current = if *path == active { " aria-current=\"page\"" } else { "" };
        Markup::raw(format!(
            "<li><a href=\"{}\"{}>{}</a></li>",
            escape(path),
            current,
            escape(label)
        ))
    }));

    let account = match user {
        Some(user) => format!(
            "<span class=\"account\">{}</span> <a href=\"/api/auth/sign-out\">Sign out</a>",
            escape(&user.name)
        ),
        None => "<a href=\"/api/auth/sign-out\">Sign out</a>".to_string(),
    };

    Markup::raw(format!(
        "<!DOCTYPE html>\
         <html lang=\"en\">\
         <head><meta charset=\"utf-8\"><title>{title} · Finboard</title>\
         <link rel=\"icon\" href=\"/favicon.ico\">\
         <link rel=\"stylesheet\" href=\"/_next/static/app.css\"></head>\
         <body><nav><a href=\"/dashboard\"><img src=\"/logo.svg\" alt=\"Finboard\"></a>\
         <ul>{nav}</ul>{account}</nav>\
         <main>{body}</main></body></html>",
        title = escape(title),
        nav = nav,
        account = account,
        body = body,
    ))
}

/// Document without navigation, for pages seen before sign-in
pub fn bare_layout(title: &str, body: Markup) -> Markup {
    Markup::raw(format!(
        "<!DOCTYPE html>\
         <html lang=\"en\">\
         <head><meta charset=\"utf-8\"><title>{title} · Finboard</title>\
         <link rel=\"icon\" href=\"/favicon.ico\">\
         <link rel=\"stylesheet\" href=\"/_next/static/app.css\"></head>\
         <body class=\"bare\"><img src=\"/logo.svg\" alt=\"Finboard\">\
         <main>{body}</main></body></html>",
        title = escape(title),
        body = body,
    ))
}
