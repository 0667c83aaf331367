use console::{style, Emoji};
use nalgebra::Vector3;

pub static CHECK: Emoji<'static, 'static> = Emoji("✓", "+");
pub static CROSS: Emoji<'static, 'static> = Emoji("✗", "x");
pub static ARROW: Emoji<'static, 'static> = Emoji("▶", ">");

pub const RULE_WIDTH: usize = 72;

pub fn bold<T: AsRef<str>>(text: T) -> String {
    style(text.as_ref()).bold().to_string()
}

pub fn warning<T: AsRef<str>>(text: T) -> String {
    style(text.as_ref()).color256(214).bold().to_string()
}

pub fn highlight<T: AsRef<str>>(text: T) -> String {
    style(text.as_ref()).blue().bold().to_string()
}

pub fn light<T: AsRef<str>>(text: T) -> String {
    style(text.as_ref()).color256(245).to_string()
}

/// Single rule line (`-`) and double rule line (`=`).
pub fn rules() -> (String, String) {
    ("-".repeat(RULE_WIDTH), "=".repeat(RULE_WIDTH))
}

/// Tool name, version and one-line description framed by rule lines.
pub fn banner(name: &str, version: &str, about: &str) -> String {
    let (line, dline) = rules();
    format!(
        "\n{} {}\n{}\n{}\nPart of a {} project.\n{}\n",
        highlight(name),
        version,
        line,
        about,
        highlight("rigging-tools"),
        dline
    )
}

/// Green check mark followed by the message.
pub fn status<T: AsRef<str>>(message: T) -> String {
    format!("{} {}", style(format!("{}", CHECK)).green(), message.as_ref())
}

/// Red failure line naming the error kind, e.g. `✗ Error [DegenerateChainError]: ...`.
pub fn failure(kind: &str, message: &str) -> String {
    let head = style("Error").red().to_string();
    format!("{} {}", style(format!("{}", CROSS)).red(), bold(format!("{} [{}]: {}", head, kind, message)))
}

/// Plain `x, y, z` with a fixed number of decimals. Never styled, so it stays parseable.
pub fn triple(v: &Vector3<f64>, precision: usize) -> String {
    format!("{:.p$}, {:.p$}, {:.p$}", v.x, v.y, v.z, p = precision)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triple() {
        let v = Vector3::new(1.0, 3.121320343559643, -4.0);
        assert_eq!(triple(&v, 6), "1.000000, 3.121320, -4.000000");
        assert_eq!(triple(&v, 0), "1, 3, -4");
    }

    #[test]
    fn test_failure_names_kind() {
        let line = console::strip_ansi_codes(&failure("DegenerateChainError", "start and end joints coincide")).to_string();
        assert!(line.ends_with("Error [DegenerateChainError]: start and end joints coincide"));
    }

    #[test]
    fn test_banner_rules() {
        let banner = console::strip_ansi_codes(&banner("Pole Vector Calculator", "1.0.0", "About.")).to_string();
        assert!(banner.contains("Pole Vector Calculator 1.0.0"));
        assert!(banner.contains(&"=".repeat(RULE_WIDTH)));
    }
}
