use contacts_core::Contact;

use super::{document, escape};
use crate::navigation::{nav_link_class, Navigation, UiState};
use crate::routes::root::RootData;

const TITLE: &str = "Contacts";

/// Render the root layout: sidebar with search, "New" form and contact list,
/// plus the detail pane.
///
/// The list shows exactly `data.contacts`, in order.
pub fn render_root(data: &RootData, navigation: &Navigation, current_path: &str) -> String {
    let ui = navigation.ui_state();
    let searching = ui == UiState::Searching;
    let q = data.q.as_deref().unwrap_or_default();

    let mut body = String::new();
    body.push_str("<div id=\"sidebar\">\n");
    body.push_str(&format!("<h1>{TITLE}</h1>\n<div>\n"));
    body.push_str(&format!(
        "<form id=\"search-form\" role=\"search\" action=\"/\" data-replace=\"{}\">\n",
        search_replaces_history(data.q.as_deref()),
    ));
    body.push_str(&format!(
        "<input id=\"q\" aria-label=\"Search contacts\" placeholder=\"Search\" type=\"search\" name=\"q\" value=\"{}\" class=\"{}\"{}>\n",
        escape(q),
        if searching { "loading" } else { "" },
        if data.q.is_some() { " autofocus" } else { "" },
    ));
    body.push_str(&format!(
        "<div id=\"search-spinner\" aria-hidden=\"true\"{}></div>\n",
        if searching { "" } else { " hidden" },
    ));
    body.push_str("</form>\n");
    body.push_str("<form method=\"post\" action=\"/\">\n<button type=\"submit\">New</button>\n</form>\n");
    body.push_str("</div>\n");
    body.push_str("<nav>\n");
    render_contact_list(&mut body, &data.contacts, navigation, current_path);
    body.push_str("</nav>\n");
    body.push_str("</div>\n");

    body.push_str(&format!(
        "<div id=\"detail\" class=\"{}\">\n",
        if ui == UiState::Loading { "loading" } else { "" },
    ));
    body.push_str(
        "<p id=\"index-page\">Search for a contact, or create a new one with <i>New</i>.</p>\n",
    );
    body.push_str("</div>");

    document(TITLE, &body)
}

/// The first search pushes a history entry; later ones replace it.
pub fn search_replaces_history(q: Option<&str>) -> bool {
    q.is_some()
}

fn render_contact_list(
    out: &mut String,
    contacts: &[Contact],
    navigation: &Navigation,
    current_path: &str,
) {
    if contacts.is_empty() {
        out.push_str("<p><i>No contacts</i></p>\n");
        return;
    }

    out.push_str("<ul>\n");
    for contact in contacts {
        let to = format!("/contacts/{}", contact.id);
        let label = match contact.display_name() {
            Some(name) => escape(&name),
            None => "<i>No Name</i>".to_string(),
        };
        let star = if contact.favorite { " <span>★</span>" } else { "" };
        out.push_str(&format!(
            "<li><a href=\"{}\" class=\"{}\">{label}{star}</a></li>\n",
            escape(&to),
            nav_link_class(&to, current_path, navigation),
        ));
    }
    out.push_str("</ul>\n");
}
