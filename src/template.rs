//! Placeholder substitution for template text.
//!
//! Placeholders use the `{{NAME}}` syntax with no nesting. Names missing
//! from the variable table pass through untouched; strict callers check the
//! output with [`unresolved_placeholders`] afterwards.

use crate::profile::VariableTable;

/// Replace every known `{{NAME}}` placeholder with its resolved value.
///
/// Replacement is textual and order-independent: resolved values never
/// contain placeholder syntax, so each entry can be applied in turn without
/// affecting the others. Repeated occurrences of one placeholder all receive
/// the same value. The input is not mutated.
pub fn substitute(content: &str, table: &VariableTable) -> String {
    let mut output = content.to_string();
    for (name, value) in table.iter() {
        output = output.replace(&marker(name), value);
    }
    output
}

/// Names of `{{NAME}}` markers still present in `content`, in order of
/// first appearance and deduplicated.
pub fn unresolved_placeholders(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut rest = content;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) if is_placeholder_name(&after[..end]) => {
                let name = &after[..end];
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
                rest = &after[end + 2..];
            }
            // Not a marker; re-scan from just past the stray braces so a
            // real marker following them is still found.
            Some(_) => rest = after,
            None => break,
        }
    }

    names
}

fn marker(name: &str) -> String {
    format!("{{{{{name}}}}}")
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;

    #[test]
    fn substitutes_both_variables_for_claude() {
        let table = Profile::Claude.variables();
        let input = "Check {{SCRIPTS_DIR}}/test.sh and {{IDE_DIR}}/directory";

        let output = substitute(input, &table);

        assert_eq!(output, "Check .claude/scripts/NioPD/test.sh and .claude/directory");
    }

    #[test]
    fn substitutes_both_variables_for_iflow() {
        let table = Profile::Iflow.variables();
        let input = "Check {{SCRIPTS_DIR}}/test.sh and {{IDE_DIR}}/directory";

        let output = substitute(input, &table);

        assert_eq!(output, "Check .iflow/scripts/NioPD/test.sh and .iflow/directory");
        assert!(!output.contains(".claude/"));
    }

    #[test]
    fn repeated_placeholder_gets_same_value() {
        let table = Profile::Claude.variables();
        let output = substitute("{{IDE_DIR}} then {{IDE_DIR}} again", &table);
        assert_eq!(output, ".claude then .claude again");
    }

    #[test]
    fn unknown_placeholders_pass_through() {
        let table = Profile::Claude.variables();
        let output = substitute("keep {{MYSTERY_VAR}} as-is", &table);
        assert_eq!(output, "keep {{MYSTERY_VAR}} as-is");
    }

    #[test]
    fn substitution_leaves_input_without_placeholders_alone() {
        let table = Profile::Iflow.variables();
        let input = "plain text, no markers";
        assert_eq!(substitute(input, &table), input);
    }

    #[test]
    fn unresolved_placeholders_reports_leftovers() {
        let names = unresolved_placeholders("a {{FIRST}} b {{SECOND}} c {{FIRST}}");
        assert_eq!(names, vec!["FIRST".to_string(), "SECOND".to_string()]);
    }

    #[test]
    fn unresolved_placeholders_ignores_non_name_braces() {
        assert!(unresolved_placeholders("shell ${{ matrix.os }} syntax").is_empty());
        assert!(unresolved_placeholders("dangling {{ brace").is_empty());
        assert!(unresolved_placeholders("{{}}").is_empty());
    }

    #[test]
    fn unresolved_placeholders_sees_markers_after_stray_braces() {
        assert_eq!(
            unresolved_placeholders("{{ junk {{REAL_VAR}} tail }}"),
            vec!["REAL_VAR".to_string()]
        );
    }

    #[test]
    fn fully_substituted_output_has_no_markers() {
        let table = Profile::Claude.variables();
        let output = substitute("{{SCRIPTS_DIR}} and {{IDE_DIR}}", &table);
        assert!(unresolved_placeholders(&output).is_empty());
        assert!(!output.contains("{{"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        // Filler that cannot introduce placeholder syntax or a profile root.
        fn filler() -> impl Strategy<Value = String> {
            "[ a-zA-Z0-9_:-]{0,40}"
        }

        fn table_placeholder() -> impl Strategy<Value = &'static str> {
            prop_oneof![Just("{{SCRIPTS_DIR}}"), Just("{{IDE_DIR}}")]
        }

        // Documents interleaving filler with placeholders drawn from the table.
        fn covered_document() -> impl Strategy<Value = String> {
            prop::collection::vec((filler(), table_placeholder()), 0..8).prop_map(|parts| {
                let mut doc = String::new();
                for (text, placeholder) in parts {
                    doc.push_str(&text);
                    doc.push_str(placeholder);
                }
                doc
            })
        }

        proptest! {
            // Placeholder closure: table-covered documents come out marker-free.
            #[test]
            fn covered_documents_close(doc in covered_document()) {
                for profile in Profile::ALL {
                    let output = substitute(&doc, &profile.variables());
                    prop_assert!(!output.contains("{{"));
                    prop_assert!(unresolved_placeholders(&output).is_empty());
                }
            }

            // Substitution is a fixed point: a second pass changes nothing.
            #[test]
            fn substitution_is_idempotent(doc in covered_document()) {
                let table = Profile::Iflow.variables();
                let once = substitute(&doc, &table);
                prop_assert_eq!(substitute(&once, &table), once);
            }

            // Profile isolation on arbitrary covered documents.
            #[test]
            fn outputs_never_leak_the_other_root(doc in covered_document()) {
                let claude = substitute(&doc, &Profile::Claude.variables());
                let iflow = substitute(&doc, &Profile::Iflow.variables());
                prop_assert!(!claude.contains(".iflow/"));
                prop_assert!(!iflow.contains(".claude/"));
            }
        }
    }
}
