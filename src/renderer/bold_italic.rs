fn render_tag(name: &str, open: bool, state: &mut super::State) {
    if open {
        state.out.push_str(&format!("<{}>", name));
    } else {
        state.out.push_str(&format!("</{}>", name));
    }
}

pub fn render_bold(open: bool, state: &mut super::State) {
    render_tag("strong", open, state)
}

pub fn render_italic(open: bool, state: &mut super::State) {
    render_tag("em", open, state)
}
