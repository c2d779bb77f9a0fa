use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::Selection;

/// Substituted for blank lines in list transforms.
pub const LINE_PLACEHOLDER: &str = "Clause text";

/// Substituted for an empty selection in heading transforms.
pub const HEADING_PLACEHOLDER: &str = "Heading";

const BULLET_PREFIX: &str = "• ";

/// Heading depth available from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    H2,
    H3,
}

impl HeadingLevel {
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::H2 => "## ",
            Self::H3 => "### ",
        }
    }
}

/// A toolbar markup operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkupAction {
    Bold,
    Italic,
    Underline,
    BulletList,
    NumberedList,
    Heading(HeadingLevel),
}

impl MarkupAction {
    /// Marker placed on both sides of the selection, for wrap actions.
    pub const fn wrap_marker(self) -> Option<&'static str> {
        match self {
            Self::Bold => Some("**"),
            Self::Italic => Some("*"),
            Self::Underline => Some("__"),
            Self::BulletList | Self::NumberedList | Self::Heading(_) => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::BulletList => "bullets",
            Self::NumberedList => "numbers",
            Self::Heading(HeadingLevel::H2) => "h2",
            Self::Heading(HeadingLevel::H3) => "h3",
        }
    }
}

impl fmt::Display for MarkupAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown markup action `{0}`")]
pub struct UnknownAction(pub String);

impl FromStr for MarkupAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bold" => Ok(Self::Bold),
            "italic" => Ok(Self::Italic),
            "underline" => Ok(Self::Underline),
            "bullets" => Ok(Self::BulletList),
            "numbers" => Ok(Self::NumberedList),
            "h2" => Ok(Self::Heading(HeadingLevel::H2)),
            "h3" => Ok(Self::Heading(HeadingLevel::H3)),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

/// Result of a transform: the new text and the selection to restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub text: String,
    pub selection: Selection,
}

/// Apply `action` to the `selection` of `text`.
///
/// Out-of-range selections are clamped to the text first. Wrapping never
/// unwraps: applying the same marker twice nests it.
pub fn apply(text: &str, selection: Selection, action: MarkupAction) -> Edit {
    let selection = selection.clamped(text);
    let range = selection.byte_range(text);
    let (before, selected, after) = (
        &text[..range.start],
        &text[range.clone()],
        &text[range.end..],
    );

    let block = match action {
        MarkupAction::Bold | MarkupAction::Italic | MarkupAction::Underline => {
            let marker = action.wrap_marker().unwrap_or_default();
            let shift = marker.chars().count();
            return Edit {
                text: format!("{before}{marker}{selected}{marker}{after}"),
                selection: Selection::new(selection.start() + shift, selection.end() + shift),
            };
        }
        MarkupAction::BulletList => prefix_lines(selected, |_| BULLET_PREFIX.to_string()),
        MarkupAction::NumberedList => prefix_lines(selected, |i| format!("{}. ", i + 1)),
        MarkupAction::Heading(level) => {
            let body = if selected.is_empty() {
                HEADING_PLACEHOLDER
            } else {
                selected
            };
            format!("{}{body}", level.prefix())
        }
    };
    replace_selection(before, &block, after, selection.start())
}

fn prefix_lines(selected: &str, prefix: impl Fn(usize) -> String) -> String {
    selected
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            let line = if line.trim().is_empty() {
                LINE_PLACEHOLDER
            } else {
                line
            };
            format!("{}{line}", prefix(i))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn replace_selection(before: &str, block: &str, after: &str, start: usize) -> Edit {
    Edit {
        text: format!("{before}{block}{after}"),
        selection: Selection::new(start, start + block.chars().count()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn selected(edit: &Edit) -> String {
        edit.text[edit.selection.byte_range(&edit.text)].to_string()
    }

    // --- wrap ---

    #[test]
    fn test_bold_wraps_full_selection() {
        let edit = apply("Hello", Selection::new(0, 5), MarkupAction::Bold);
        assert_eq!(edit.text, "**Hello**");
        assert_eq!(edit.selection, Selection::new(2, 7));
        assert_eq!(selected(&edit), "Hello");
    }

    #[test]
    fn test_italic_wraps_middle_of_text() {
        let edit = apply("the Seller shall", Selection::new(4, 10), MarkupAction::Italic);
        assert_eq!(edit.text, "the *Seller* shall");
        assert_eq!(selected(&edit), "Seller");
    }

    #[test]
    fn test_underline_on_caret_inserts_empty_pair() {
        let edit = apply("ab", Selection::caret(1), MarkupAction::Underline);
        assert_eq!(edit.text, "a____b");
        assert_eq!(edit.selection, Selection::caret(3));
    }

    #[test]
    fn test_wrap_twice_nests_instead_of_unwrapping() {
        let first = apply("Hello", Selection::new(0, 5), MarkupAction::Bold);
        let second = apply(&first.text, first.selection, MarkupAction::Bold);
        assert_eq!(second.text, "****Hello****");
        assert_eq!(selected(&second), "Hello");
    }

    #[test]
    fn test_wrap_counts_chars_not_bytes() {
        let edit = apply("§ Käufer", Selection::new(2, 8), MarkupAction::Bold);
        assert_eq!(edit.text, "§ **Käufer**");
        assert_eq!(edit.selection, Selection::new(4, 10));
        assert_eq!(selected(&edit), "Käufer");
    }

    // --- lists ---

    #[test]
    fn test_numbered_list_prefixes_each_line() {
        let edit = apply("a\nb", Selection::new(0, 3), MarkupAction::NumberedList);
        assert_eq!(edit.text, "1. a\n2. b");
        assert_eq!(edit.selection, Selection::new(0, 9));
    }

    #[test]
    fn test_bullet_list_replaces_blank_lines() {
        let edit = apply("first\n  \nthird", Selection::new(0, 14), MarkupAction::BulletList);
        assert_eq!(edit.text, "• first\n• Clause text\n• third");
        assert_eq!(selected(&edit), edit.text);
    }

    #[test]
    fn test_bullet_list_on_caret_inserts_placeholder() {
        let edit = apply("Intro: ", Selection::caret(7), MarkupAction::BulletList);
        assert_eq!(edit.text, "Intro: • Clause text");
        assert_eq!(selected(&edit), "• Clause text");
    }

    #[test]
    fn test_list_keeps_surrounding_text() {
        let edit = apply("x\ny\nz", Selection::new(2, 3), MarkupAction::NumberedList);
        assert_eq!(edit.text, "x\n1. y\nz");
        assert_eq!(edit.selection, Selection::new(2, 6));
    }

    // --- headings ---

    #[test]
    fn test_h2_prefixes_selection() {
        let edit = apply(
            "Payment Terms",
            Selection::new(0, 13),
            MarkupAction::Heading(HeadingLevel::H2),
        );
        assert_eq!(edit.text, "## Payment Terms");
        assert_eq!(edit.selection, Selection::new(0, 16));
    }

    #[test]
    fn test_h3_on_caret_uses_placeholder() {
        let edit = apply("", Selection::caret(0), MarkupAction::Heading(HeadingLevel::H3));
        assert_eq!(edit.text, "### Heading");
        assert_eq!(edit.selection, Selection::new(0, 11));
    }

    // --- input handling ---

    #[test]
    fn test_out_of_range_selection_is_clamped() {
        let edit = apply("abc", Selection::new(1, 99), MarkupAction::Bold);
        assert_eq!(edit.text, "a**bc**");
        assert_eq!(edit.selection, Selection::new(3, 5));
    }

    #[test]
    fn test_action_names_round_trip() {
        for action in [
            MarkupAction::Bold,
            MarkupAction::Italic,
            MarkupAction::Underline,
            MarkupAction::BulletList,
            MarkupAction::NumberedList,
            MarkupAction::Heading(HeadingLevel::H2),
            MarkupAction::Heading(HeadingLevel::H3),
        ] {
            assert_eq!(action.to_string().parse::<MarkupAction>(), Ok(action));
        }
        assert_eq!(
            "strike".parse::<MarkupAction>(),
            Err(UnknownAction("strike".to_string()))
        );
    }

    fn wrap_action() -> impl Strategy<Value = MarkupAction> {
        prop_oneof![
            Just(MarkupAction::Bold),
            Just(MarkupAction::Italic),
            Just(MarkupAction::Underline),
        ]
    }

    proptest! {
        #[test]
        fn prop_double_wrap_grows_by_four_markers(
            text in "[a-zé \n]{0,24}",
            a in 0usize..30,
            b in 0usize..30,
            action in wrap_action(),
        ) {
            let marker = action.wrap_marker().unwrap();
            let sel = Selection::new(a, b).clamped(&text);
            let first = apply(&text, sel, action);
            let second = apply(&first.text, first.selection, action);
            prop_assert_eq!(
                second.text.chars().count(),
                text.chars().count() + 4 * marker.chars().count()
            );
            let original = text[sel.byte_range(&text)].to_string();
            prop_assert_eq!(selected(&second), original.clone());
            let doubled = marker.repeat(2);
            let expected_inner = format!("{doubled}{original}{doubled}");
            prop_assert!(second.text.contains(&expected_inner));
        }

        #[test]
        fn prop_transforms_leave_valid_selection(
            text in "[a-z \n]{0,24}",
            a in 0usize..30,
            b in 0usize..30,
        ) {
            for action in [MarkupAction::BulletList, MarkupAction::NumberedList, MarkupAction::Heading(HeadingLevel::H2)] {
                let edit = apply(&text, Selection::new(a, b), action);
                prop_assert!(edit.selection.end() <= edit.text.chars().count());
            }
        }
    }
}
