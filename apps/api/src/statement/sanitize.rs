//! Allow-list HTML sanitizer for generated statements.
//!
//! Model output is untrusted. Only formatting tags survive; every attribute
//! is dropped, and `script`/`style` are removed together with their content.

use std::collections::HashSet;

use ammonia::Builder;

const ALLOWED_TAGS: &[&str] = &[
    "h2", "h3", "h4", "p", "br", "strong", "em", "b", "i", "ul", "ol", "li",
];

pub fn sanitize_statement(html: &str) -> String {
    Builder::empty()
        .add_tags(ALLOWED_TAGS)
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(html)
        .to_string()
}
