//! Markup stripping for generated text
//!
//! Turns lightly marked-up model output into plain lines with `•`
//! bullets, ready to drop into HTML or a PDF paragraph.

use lazy_static::lazy_static;
use regex::Regex;
use log::trace;

/// Canonical bullet for both hyphen and numbered lists
pub const BULLET: &str = "• ";

lazy_static! {
    static ref HEADING: Regex = Regex::new(r"(?m)^#+[ \t]*").unwrap();
    static ref HYPHEN_BULLET: Regex
      = Regex::new(r"(?m)^[ \t]*-[ \t]+").unwrap();
    static ref NUMBERED_BULLET: Regex
      = Regex::new(r"(?m)^[ \t]*[0-9]+[.)][ \t]+").unwrap();
    static ref BLANK_RUN: Regex = Regex::new(r"\n{3,}").unwrap();
}

/// Normalize raw generated text into plain bulleted prose.
///
/// Total and pure. Idempotent: the rule pass repeats until the text
/// stops changing.
pub fn normalize(raw: &str) -> String
{   let mut current = apply_rules(raw);
    loop
    {   let next = apply_rules(&current);
        if next == current
        {   return current;
        }
        trace!("Normalization pass changed text, repeating");
        current = next;
    }
}

/// One ordered pass over all rules
fn apply_rules(text: &str) -> String
{   let text = text.replace("**", "");
    let text = HEADING.replace_all(&text, "");
    let text = text.replace('`', "");
    let text = text.replace("~~", "");
    let text = text.replace("__", "");
    let text = text.replace('_', " ");
    let text = HYPHEN_BULLET.replace_all(&text, BULLET);
    let text = NUMBERED_BULLET.replace_all(&text, BULLET);
    let text = BLANK_RUN.replace_all(&text, "\n\n");
    text.trim().to_string()
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn strips_markup_into_bullets()
    {   let raw = "## Title\n**Bold** text\n- item one\n1. item two\n\n\n\nEnd";
        assert_eq!(
          normalize(raw)
        , "Title\nBold text\n• item one\n• item two\n\nEnd"
        );
    }

    #[test]
    fn headings_only_at_line_start()
    {   assert_eq!(normalize("### Plan\nLearn C#"), "Plan\nLearn C#");
    }

    #[test]
    fn code_strike_and_underscores()
    {   assert_eq!(
          normalize("Use `cargo` ~~never~~ __often__ with snake_case_name")
        , "Use cargo never often with snake case name"
        );
    }

    #[test]
    fn bullets_need_trailing_space()
    {   assert_eq!(normalize("-not a bullet"), "-not a bullet");
        assert_eq!(normalize("  -   indented"), "• indented");
        assert_eq!(normalize("2) second\n10. tenth"), "• second\n• tenth");
        assert_eq!(normalize("3.14 is pi"), "3.14 is pi");
    }

    #[test]
    fn nested_markers_settle_in_one_call()
    {   // The heading strip exposes another heading
        assert_eq!(normalize("## # Deep"), "Deep");
        // Dropping the backtick forms a fresh `**`
        assert_eq!(normalize("*`*x"), "x");
        assert_eq!(normalize("***x**"), "*x");
    }

    #[test]
    fn empty_and_whitespace_inputs()
    {   assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\n\t "), "");
    }
}
