use proptest::prelude::*;
use guidance_core::normalize;

#[test]
fn literal_document_normalizes()
{   let raw = "## Title\n**Bold** text\n- item one\n1. item two\n\n\n\nEnd";
    assert_eq!(
      normalize(raw)
    , "Title\nBold text\n• item one\n• item two\n\nEnd"
    );
}

#[test]
fn typical_model_answer()
{   let raw = "\
# Career Guidance

**1. Suitable Career Paths**
* Backend engineer
- Data_engineer
- `ML` engineer


2) Next Steps
   - Build a ~~toy~~ __real__ project
";
    assert_eq!(
      normalize(raw)
    , "Career Guidance\n\n• Suitable Career Paths\n* Backend engineer\n\
       • Data engineer\n• ML engineer\n\n• Next Steps\n• Build a toy real project"
    );
}

proptest! {
    #[test]
    fn normalize_is_idempotent(raw in "[#*_~`\\-0-9.) a-zA-Z\t\n•]{0,80}") {
        let once = normalize(&raw);
        let twice = normalize(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalize_is_idempotent_on_any_text(raw in "\\PC*") {
        let once = normalize(&raw);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn output_has_no_removed_markers(raw in "[#*_~`\\- a-z\n]{0,60}") {
        let out = normalize(&raw);
        prop_assert!(!out.contains("**"));
        prop_assert!(!out.contains('`'));
        prop_assert!(!out.contains("~~"));
        prop_assert!(!out.contains('_'));
        prop_assert!(!out.contains("\n\n\n"));
        prop_assert_eq!(out.trim(), out.as_str());
    }
}
