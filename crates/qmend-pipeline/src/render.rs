// Query reassembly.

use qmend_core::Token;

/// Join resolved tokens back into a single query string.
///
/// Tokens must already be in `order`; values are joined with single
/// spaces and there is no trailing separator. When `format` is true,
/// changed tokens are wrapped in the marker pair; unchanged tokens are
/// rendered bare.
pub fn render(tokens: &[Token], format: bool, marker: &(String, String)) -> String {
    let mut rendered = String::new();
    for (idx, token) in tokens.iter().enumerate() {
        if idx > 0 {
            rendered.push(' ');
        }
        if format && token.changed {
            rendered.push_str(&marker.0);
            rendered.push_str(&token.resolved);
            rendered.push_str(&marker.1);
        } else {
            rendered.push_str(&token.resolved);
        }
    }
    rendered
}
