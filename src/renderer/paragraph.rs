pub fn open_paragraph(state: &mut super::State) {
    state.out.push_str("<p>");
}

pub fn close_paragraph(state: &mut super::State) {
    state.out.push_str("</p>\n");
}

pub fn open_block_quote(state: &mut super::State) {
    state.out.push_str("<blockquote>\n");
}

pub fn close_block_quote(state: &mut super::State) {
    state.out.push_str("</blockquote>\n");
}

pub fn render_rule(state: &mut super::State) {
    state.out.push_str("<hr />\n");
}

pub fn render_hard_break(state: &mut super::State) {
    state.out.push_str("<br />\n");
}
