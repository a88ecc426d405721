use pulldown_cmark::Event;

const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Escaped link target, or `#` when the target uses a scheme that could run script.
pub fn sanitize_url(dest: &str) -> String {
    let trimmed = dest.trim();
    let scheme_end = trimmed.find(|c: char| matches!(c, ':' | '/' | '?' | '#'));
    if let Some(i) = scheme_end {
        if trimmed[i..].starts_with(':') {
            let scheme = trimmed[..i].to_ascii_lowercase();
            if !ALLOWED_SCHEMES.contains(&scheme.as_str()) {
                return "#".to_owned();
            }
        }
    }
    super::escape_attribute(trimmed)
}

fn title_attribute(title: &str) -> String {
    if title.is_empty() {
        String::new()
    } else {
        format!(" title=\"{}\"", super::escape_attribute(title))
    }
}

pub fn open_link(dest: &str, title: &str, state: &mut super::State) {
    state.out.push_str(&format!(
        "<a href=\"{}\"{}>",
        sanitize_url(dest),
        title_attribute(title)
    ));
}

pub fn close_link(state: &mut super::State) {
    state.out.push_str("</a>");
}

pub fn open_image(dest: &str, title: &str, state: &mut super::State) {
    state.out.push_str(&format!(
        "<img src=\"{}\"{} alt=\"",
        sanitize_url(dest),
        title_attribute(title)
    ));
    state.image_depth = 1;
}

/// Alt text is plain: nested markup is dropped, only its text is kept.
pub fn render_alt_text(event: Event, state: &mut super::State) {
    match event {
        Event::Text(text) | Event::Code(text) => {
            state.out.push_str(&super::escape_attribute(&text))
        }
        Event::SoftBreak | Event::HardBreak => state.out.push(' '),
        Event::Start(pulldown_cmark::Tag::Image(..)) => state.image_depth += 1,
        Event::End(pulldown_cmark::Tag::Image(..)) => {
            state.image_depth -= 1;
            if state.image_depth == 0 {
                state.out.push_str("\" />");
            }
        }
        _ => {}
    }
}
