use pulldown_cmark::HeadingLevel;

fn level_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

pub fn open_heading(level: HeadingLevel, state: &mut super::State) {
    state.out.push_str(&format!("<h{}>", level_number(level)));
}

pub fn close_heading(level: HeadingLevel, state: &mut super::State) {
    state.out.push_str(&format!("</h{}>\n", level_number(level)));
}
