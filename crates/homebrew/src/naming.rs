//! Formula class names and cask tokens.

/// Converts a formula name into its Ruby class name.
///
/// Mirrors Homebrew's `Formulary.class_s`: separators (`-`, `_`, `.`, space)
/// are dropped and capitalize the next character, `@<digit>` becomes
/// `AT<digit>`, and `+` becomes `x`. `some-binary@1` becomes `SomeBinaryAT1`.
#[must_use]
pub fn formula_class_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut chars = lowered.chars().peekable();
    let mut output = String::with_capacity(lowered.len());

    let Some(first) = chars.next() else {
        return output;
    };
    output.extend(first.to_uppercase());

    while let Some(c) = chars.next() {
        match c {
            '-' | '_' | '.' | ' ' => {
                if let Some(next) = chars.next() {
                    output.extend(next.to_uppercase());
                }
            }
            '+' => output.push('x'),
            '@' => match chars.peek() {
                Some(d) if d.is_ascii_digit() => {
                    output.push_str("AT");
                    output.push(*d);
                    chars.next();
                }
                _ => output.push(c),
            },
            _ => output.push(c),
        }
    }

    output
}

/// Converts a display name into a cask token (`My App` becomes `my-app`).
#[must_use]
pub fn cask_token(name: &str) -> String {
    name.replace(' ', "-").to_lowercase()
}
