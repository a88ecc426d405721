//! Markup to HTML.
//!
//! Entry text is parsed as CommonMark by `pulldown_cmark` and written out
//! here event by event. Everything that reaches the output is escaped, raw
//! HTML in the input included, so the result is safe to embed in a page.

use pulldown_cmark::{Event, Options, Parser, Tag};

mod bold_italic;
mod code;
mod heading;
mod link;
mod list;
mod paragraph;

pub struct State {
    out: String,
    // nesting depth of images whose alt text is being written
    image_depth: usize,
}

pub fn render(markup: &str) -> String {
    let mut state = State {
        out: String::with_capacity(markup.len() + markup.len() / 2),
        image_depth: 0,
    };
    for event in Parser::new_ext(markup, Options::empty()) {
        render_event(event, &mut state);
    }
    state.out
}

fn render_event(event: Event, state: &mut State) {
    if state.image_depth > 0 {
        return link::render_alt_text(event, state);
    }
    match event {
        Event::Start(tag) => render_start(tag, state),
        Event::End(tag) => render_end(tag, state),
        Event::Text(text) => render_text(&text, state),
        Event::Code(code) => code::render_inline_code(&code, state),
        // raw HTML is shown, never interpreted
        Event::Html(html) => render_text(&html, state),
        Event::SoftBreak => state.out.push('\n'),
        Event::HardBreak => paragraph::render_hard_break(state),
        Event::Rule => paragraph::render_rule(state),
        _ => {}
    }
}

fn render_start(tag: Tag, state: &mut State) {
    match tag {
        Tag::Paragraph => paragraph::open_paragraph(state),
        Tag::Heading(level, ..) => heading::open_heading(level, state),
        Tag::BlockQuote => paragraph::open_block_quote(state),
        Tag::CodeBlock(kind) => code::open_code_block(&kind, state),
        Tag::List(start) => list::open_list(start, state),
        Tag::Item => list::open_item(state),
        Tag::Emphasis => bold_italic::render_italic(true, state),
        Tag::Strong => bold_italic::render_bold(true, state),
        Tag::Link(_, dest, title) => link::open_link(&dest, &title, state),
        Tag::Image(_, dest, title) => link::open_image(&dest, &title, state),
        _ => {}
    }
}

fn render_end(tag: Tag, state: &mut State) {
    match tag {
        Tag::Paragraph => paragraph::close_paragraph(state),
        Tag::Heading(level, ..) => heading::close_heading(level, state),
        Tag::BlockQuote => paragraph::close_block_quote(state),
        Tag::CodeBlock(_) => code::close_code_block(state),
        Tag::List(start) => list::close_list(start, state),
        Tag::Item => list::close_item(state),
        Tag::Emphasis => bold_italic::render_italic(false, state),
        Tag::Strong => bold_italic::render_bold(false, state),
        Tag::Link(..) => link::close_link(state),
        _ => {}
    }
}

fn render_text(value: &str, state: &mut State) {
    state.out.push_str(&escape(value));
}

pub(crate) fn escape(value: &str) -> String {
    htmlescape::encode_minimal(value)
}

pub(crate) fn escape_attribute(value: &str) -> String {
    escape(value).replace('"', "&quot;")
}
