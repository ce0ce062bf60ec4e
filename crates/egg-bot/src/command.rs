//! Prefix command parsing.

/// A parsed command: lowercased name plus the trimmed argument text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub name: String,
    pub args: &'a str,
}

/// Parse `content` as a command if it starts with `prefix` immediately
/// followed by a command name.
///
/// `"!Egg buy milk"` with prefix `"!"` yields name `egg` and args `buy milk`.
/// `"! egg"` and `"!"` are not commands.
#[must_use]
pub fn parse<'a>(prefix: &str, content: &'a str) -> Option<Invocation<'a>> {
    let rest = content.strip_prefix(prefix)?;
    let name_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
    if name_len == 0 {
        return None;
    }
    let (name, args) = rest.split_at(name_len);
    Some(Invocation {
        name: name.to_lowercase(),
        args: args.trim(),
    })
}
