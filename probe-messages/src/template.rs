//! `{name}` placeholder rendering for message templates.

use std::fmt::Display;

/// A message template plus the values bound to its placeholders.
///
/// Rendering is a single left-to-right pass: bound values are inserted
/// verbatim and never rescanned, and placeholders without a binding are
/// left in the output unchanged.
pub struct Template {
    text: &'static str,
    bindings: Vec<(&'static str, String)>,
}

impl Template {
    pub fn new(text: &'static str) -> Self {
        Self {
            text,
            bindings: Vec::new(),
        }
    }

    /// Binds a placeholder. A later binding of the same name wins.
    pub fn bind(mut self, name: &'static str, value: impl Display) -> Self {
        self.bindings.push((name, value.to_string()));
        self
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        self.bindings
            .iter()
            .rev()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut rest = self.text;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                return out;
            };

            let name = &after[..close];
            match self.lookup(name) {
                Some(value) => out.push_str(value),
                None => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            }
            rest = &after[close + 1..];
        }

        out.push_str(rest);
        out
    }
}

/// Renders a template, formatting each value with `Display`.
///
/// ```
/// use probe_messages::msg;
/// let line = msg!("took {ms}ms", ms = format_args!("{:.0}", 99.6));
/// assert_eq!(line, "took 100ms");
/// ```
#[macro_export]
macro_rules! msg {
    ($template:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::template::Template::new($template)
            $(.bind(stringify!($key), $value))*
            .render()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_all_occurrences() {
        let text = Template::new("{a} and {a} but {b}")
            .bind("a", "x")
            .bind("b", 7)
            .render();
        assert_eq!(text, "x and x but 7");
    }

    #[test]
    fn test_unknown_placeholder_kept() {
        assert_eq!(Template::new("value: {missing}").render(), "value: {missing}");
    }

    #[test]
    fn test_bound_values_are_not_rescanned() {
        let text = Template::new("{a}/{b}").bind("a", "{b}").bind("b", "y").render();
        assert_eq!(text, "{b}/y");
    }

    #[test]
    fn test_unterminated_brace_kept() {
        let text = Template::new("{a} then {oops").bind("a", 1).render();
        assert_eq!(text, "1 then {oops");
    }

    #[test]
    fn test_later_binding_wins() {
        let text = Template::new("{a}").bind("a", 1).bind("a", 2).render();
        assert_eq!(text, "2");
    }

    #[test]
    fn test_macro_accepts_display_values() {
        assert_eq!(msg!("plain"), "plain");
        assert_eq!(
            msg!("{ms}ms over {limit}ms", ms = format_args!("{:.0}", 5200.4), limit = 5000.0,),
            "5200ms over 5000ms"
        );
    }
}
