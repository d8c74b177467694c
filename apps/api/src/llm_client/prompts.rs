// Shared prompt fragments. Feature modules keep their own prompts.rs
// alongside them and pull cross-cutting pieces from here.

/// Output contract for any prompt whose result is rendered as a page fragment.
pub const HTML_FRAGMENT_OUTPUT: &str = "\
    OUTPUT REQUIREMENTS:\n\
    - Respond with an HTML fragment only: no <html>, <head> or <body> wrapper.\n\
    - Use <h3> for headers, <p> for paragraphs, <strong> and <em> for emphasis, \
    <ul>/<li> for lists.\n\
    - Do NOT use markdown, code fences, scripts, styles or inline attributes.\n\
    - Do NOT include explanations or apologies outside the statement itself.";
