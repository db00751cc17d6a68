use std::{borrow::Cow, fmt::Write as _};

use shared::protocol::Todo;

/// Renders the whole collection as the list fragment shown in `#todo-list`.
///
/// One `<li>` per record, in server order. An empty collection renders as an
/// empty string.
pub fn render_todo_list(todos: &[Todo]) -> String {
    let mut markup = String::new();
    for todo in todos {
        render_entry(&mut markup, todo);
    }
    markup
}

fn render_entry(out: &mut String, todo: &Todo) {
    let description = todo.description.as_deref().unwrap_or_default();
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        "<li>id: {} </br>title: {} </br>description: {} </br>status: {} </br></li> </br>",
        todo.id,
        escape_html(&todo.title),
        escape_html(description),
        escape_html(todo.status.as_str()),
    );
}

pub fn escape_html(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(raw);
    }

    let mut escaped = String::with_capacity(raw.len() + 8);
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
