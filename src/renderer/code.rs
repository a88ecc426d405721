use pulldown_cmark::CodeBlockKind;

pub fn open_code_block(kind: &CodeBlockKind, state: &mut super::State) {
    let lang = match kind {
        CodeBlockKind::Fenced(info) => info.split_whitespace().next().unwrap_or(""),
        CodeBlockKind::Indented => "",
    };
    if lang.is_empty() {
        state.out.push_str("<div class=\"codehilite\"><pre><code>");
    } else {
        state.out.push_str(&format!(
            "<div class=\"codehilite\"><pre><code class=\"language-{}\">",
            super::escape_attribute(lang)
        ));
    }
}

pub fn close_code_block(state: &mut super::State) {
    state.out.push_str("</code></pre></div>\n");
}

pub fn render_inline_code(code: &str, state: &mut super::State) {
    state.out.push_str(&format!("<code>{}</code>", super::escape(code)));
}
