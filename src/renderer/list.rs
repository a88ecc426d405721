pub fn open_list(start: Option<u64>, state: &mut super::State) {
    match start {
        None => state.out.push_str("<ul>\n"),
        Some(1) => state.out.push_str("<ol>\n"),
        Some(n) => state.out.push_str(&format!("<ol start=\"{}\">\n", n)),
    }
}

pub fn close_list(start: Option<u64>, state: &mut super::State) {
    match start {
        None => state.out.push_str("</ul>\n"),
        Some(_) => state.out.push_str("</ol>\n"),
    }
}

pub fn open_item(state: &mut super::State) {
    state.out.push_str("<li>");
}

pub fn close_item(state: &mut super::State) {
    state.out.push_str("</li>\n");
}
