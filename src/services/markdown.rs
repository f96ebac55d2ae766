//! Markdown to HTML rendering for model output

use pulldown_cmark::{html, Event, Options, Parser};

/// Render Markdown text as an HTML fragment
///
/// Raw HTML embedded in the source is emitted as escaped text.
pub fn markdown_to_html(input: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(input, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut output = String::with_capacity(input.len() + input.len() / 2);
    html::push_html(&mut output, parser);
    output
}
