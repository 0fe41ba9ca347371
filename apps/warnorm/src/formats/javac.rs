//! javac warnings as printed by Ant (`[javac]` prefix) and Maven HPI builds.
//!
//! ```text
//! [javac] src/Foo.java:7: warning: [unchecked] unchecked call
//! [WARNING] /ws/src/Foo.java:[12,5] [deprecation] foo() in Bar has been deprecated
//! ```
//!
//! Backslash separators are rewritten to `/`; the category is taken from the
//! `[lint]` tag, or guessed from the message for deprecations. Maven lines
//! carry no inline severity, so their `[WARNING]`/`[ERROR]` prefix decides.

use crate::models::IssueBuilder;
use crate::parser::LinePatternParser;
use crate::severity;
use regex::Captures;

pub const ID: &str = "ant-javac";

const PATTERN: &str = r"^\s*(?:\[(?P<tag>\w+)\]\s*)?(?P<file>\S.*\.java):\[?(?P<line>\d+)(?:,(?P<column>\d+))?\]?:?\s*(?:(?P<severity>warning|error|WARNING|ERROR)\s*:\s*)?(?:\[(?P<category>[^\]]+)\]\s*)?(?P<message>.*)$";

pub fn parser() -> LinePatternParser {
    LinePatternParser::builder(ID, "Java compiler (Ant)", PATTERN)
        .refine(normalize)
        .build()
        .expect("valid ant-javac pattern")
}

fn normalize(caps: &Captures<'_>, builder: &mut IssueBuilder) -> bool {
    if let Some(file) = caps.name("file") {
        builder.set_file_name(file.as_str().trim().replace('\\', "/"));
    }
    let message = caps.name("message").map(|m| m.as_str()).unwrap_or_default();
    let category = match caps.name("category") {
        Some(tag) => capitalize(tag.as_str().trim()),
        None if message.contains("deprecated") => "Deprecation".to_string(),
        None => String::new(),
    };
    builder.set_category(category);
    if caps.name("severity").is_none() {
        if let Some(tag) = caps.name("tag") {
            builder.set_priority(severity::classify(tag.as_str()));
        }
    }
    true
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use crate::parser::parse_text;

    const HPI: &str = r"[INFO] Compiling 12 source files
    [javac] C:\Build\Results\jobs\ADT-Base\workspace\tasks\src\main\java\hudson\plugins\tasks\TasksDescriptor.java:46: warning: [deprecation] newInstance(org.kohsuke.stapler.StaplerRequest) in hudson.model.Descriptor has been deprecated
    [javac]         return new TasksDescriptor(req);
    [javac] C:\Build\Results\jobs\ADT-Base\workspace\tasks\src\main\java\hudson\plugins\tasks\TasksReporterDescriptor.java:34: warning: newInstance(org.kohsuke.stapler.StaplerRequest) in hudson.model.Descriptor has been deprecated
";

    #[test]
    fn test_parses_hpi_compile_log() {
        let issues = parse_text(&parser(), HPI).unwrap();
        assert_eq!(issues.len(), 2);

        let first = issues.get(0).unwrap();
        assert_eq!(first.priority(), Priority::Normal);
        assert_eq!(first.category(), "Deprecation");
        assert_eq!(first.line_start(), 46);
        assert_eq!(first.line_end(), 46);
        assert_eq!(
            first.message(),
            "newInstance(org.kohsuke.stapler.StaplerRequest) in hudson.model.Descriptor has been deprecated"
        );
        assert_eq!(
            first.file_name(),
            "C:/Build/Results/jobs/ADT-Base/workspace/tasks/src/main/java/hudson/plugins/tasks/TasksDescriptor.java"
        );

        let second = issues.get(1).unwrap();
        assert_eq!(second.category(), "Deprecation");
        assert_eq!(second.line_start(), 34);
        assert_eq!(
            second.file_name(),
            "C:/Build/Results/jobs/ADT-Base/workspace/tasks/src/main/java/hudson/plugins/tasks/TasksReporterDescriptor.java"
        );
    }

    #[test]
    fn test_error_and_other_lint_tag() {
        let text = "[javac] src/Foo.java:7: error: [unchecked] unchecked call\n";
        let issues = parse_text(&parser(), text).unwrap();
        let issue = issues.get(0).unwrap();
        assert_eq!(issue.priority(), Priority::High);
        assert_eq!(issue.category(), "Unchecked");
        assert_eq!(issue.file_name(), "src/Foo.java");
    }

    #[test]
    fn test_maven_line_without_inline_severity() {
        let text = "[INFO] Compiling 3 source files\n\
                    [WARNING] /ws/src/Foo.java:[12,5] [deprecation] foo() in Bar has been deprecated\n\
                    [ERROR] /ws/src/Baz.java:[3,1] cannot find symbol\n";
        let issues = parse_text(&parser(), text).unwrap();
        assert_eq!(issues.len(), 2);

        let warning = issues.get(0).unwrap();
        assert_eq!(warning.file_name(), "/ws/src/Foo.java");
        assert_eq!(warning.line_start(), 12);
        assert_eq!(warning.column_start(), 5);
        assert_eq!(warning.category(), "Deprecation");
        assert_eq!(warning.priority(), Priority::Normal);
        assert_eq!(warning.message(), "foo() in Bar has been deprecated");

        let error = issues.get(1).unwrap();
        assert_eq!(error.file_name(), "/ws/src/Baz.java");
        assert_eq!(error.priority(), Priority::High);
        assert_eq!(error.category(), "");
        assert_eq!(error.message(), "cannot find symbol");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("rawtypes"), "Rawtypes");
        assert_eq!(capitalize(""), "");
    }
}
