//! JetBrains ReSharper InspectCode XML reports.
//!
//! Issue types are declared under `IssueTypes` and referenced by `TypeId`
//! from each `Issues/Project/Issue` element. Severity is a property of the
//! issue type.

use crate::models::{IssueBuilder, Priority};
use crate::parser::structured::{child_elements, first_child};
use crate::parser::{Rule, RuleSchema, StructuredParser};
use crate::severity::SeverityTable;
use roxmltree::Node;

pub const ID: &str = "resharper";

pub struct ResharperSchema {
    severities: SeverityTable,
}

impl Default for ResharperSchema {
    fn default() -> Self {
        Self {
            severities: SeverityTable::empty()
                .with("ERROR", Priority::High)
                .with("WARNING", Priority::Normal)
                .with("SUGGESTION", Priority::Low)
                .with("HINT", Priority::Low),
        }
    }
}

pub fn parser() -> StructuredParser<ResharperSchema> {
    StructuredParser::new(ResharperSchema::default())
}

impl RuleSchema for ResharperSchema {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        "ReSharper InspectCode"
    }

    fn root_tag(&self) -> &str {
        "Report"
    }

    fn rule_nodes<'a, 'i>(&self, root: Node<'a, 'i>) -> Vec<Node<'a, 'i>> {
        first_child(root, "IssueTypes")
            .map(|types| child_elements(types, "IssueType"))
            .unwrap_or_default()
    }

    fn read_rule(&self, node: Node<'_, '_>) -> Rule {
        let id = node.attribute("Id").unwrap_or_default();
        let mut rule = Rule::new(id, id);
        rule.priority = Some(self.severities.classify(node.attribute("Severity")));
        rule.url = Rule::parse_url(node.attribute("WikiUrl").unwrap_or_default());
        rule.group = node.attribute("Category").unwrap_or_default().to_string();
        rule.description = node.attribute("Description").unwrap_or_default().to_string();
        rule
    }

    fn result_nodes<'a, 'i>(&self, root: Node<'a, 'i>) -> Vec<Node<'a, 'i>> {
        first_child(root, "Issues")
            .map(|issues| {
                child_elements(issues, "Project")
                    .into_iter()
                    .flat_map(|project| child_elements(project, "Issue"))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn rule_ref(&self, result: Node<'_, '_>) -> String {
        result.attribute("TypeId").unwrap_or_default().to_string()
    }

    fn occurrences<'a, 'i>(&self, result: Node<'a, 'i>) -> Vec<Node<'a, 'i>> {
        vec![result]
    }

    fn fill(
        &self,
        rule: &Rule,
        _result: Node<'_, '_>,
        occurrence: Node<'_, '_>,
        builder: &mut IssueBuilder,
    ) {
        let line = occurrence
            .attribute("Line")
            .and_then(|l| l.trim().parse().ok())
            .unwrap_or(0);
        let project = occurrence
            .parent_element()
            .and_then(|p| p.attribute("Name"))
            .unwrap_or_default();
        builder
            .set_file_name(
                occurrence
                    .attribute("File")
                    .unwrap_or_default()
                    .replace('\\', "/"),
            )
            .set_line_start(line)
            .set_line_end(line)
            .set_category(rule.id.as_str())
            .set_type(rule.group.as_str())
            .set_package_name(project)
            .set_reference(rule.url.as_ref().map(|u| u.as_str()).unwrap_or_default())
            .set_message(occurrence.attribute("Message").unwrap_or_default())
            .set_description(rule.description.as_str())
            .set_priority(rule.priority.unwrap_or_default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::parser::parse_text;

    const REPORT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Report ToolsVersion="8.2">
  <Information>
    <Solution>ResharperDemo.sln</Solution>
  </Information>
  <IssueTypes>
    <IssueType Id="CSharpErrors" Category="C# Compiler Errors" Description="C# Compiler Errors" Severity="ERROR" />
    <IssueType Id="ConditionIsAlwaysTrueOrFalse" Category="Potential Code Quality Issues" Description="Expression is always 'true' or always 'false'" Severity="WARNING" WikiUrl="http://confluence.jetbrains.com/display/ReSharper/Expression+is+always+true+or+false" />
    <IssueType Id="ConvertToAutoProperty" Category="Language Usage Opportunities" Description="Convert property to auto-property" Severity="SUGGESTION" />
  </IssueTypes>
  <Issues>
    <Project Name="ResharperDemo">
      <Issue TypeId="CSharpErrors" File="ResharperDemo\Program.cs" Offset="408-416" Line="16" Message="Cannot resolve symbol 'GetError'" />
      <Issue TypeId="ConditionIsAlwaysTrueOrFalse" File="ResharperDemo\Program.cs" Offset="532-539" Line="23" Message="Expression is always true" />
      <Issue TypeId="ConvertToAutoProperty" File="ResharperDemo\Program.cs" Offset="1064-1069" Line="41" Message="Convert to auto-property" />
    </Project>
  </Issues>
</Report>"#;

    #[test]
    fn test_parses_inspect_code_report() {
        let issues = parse_text(&parser(), REPORT).unwrap();
        assert_eq!(issues.len(), 3);

        let mut it = issues.iter();
        let first = it.next().unwrap();
        assert_eq!(first.line_start(), 16);
        assert_eq!(first.line_end(), 16);
        assert_eq!(first.message(), "Cannot resolve symbol 'GetError'");
        assert_eq!(first.file_name(), "ResharperDemo/Program.cs");
        assert_eq!(first.category(), "CSharpErrors");
        assert_eq!(first.priority(), Priority::High);
        assert_eq!(first.package_name(), "ResharperDemo");

        let second = it.next().unwrap();
        assert_eq!(second.line_start(), 23);
        assert_eq!(second.message(), "Expression is always true");
        assert_eq!(second.category(), "ConditionIsAlwaysTrueOrFalse");
        assert_eq!(second.priority(), Priority::Normal);
        assert!(second.reference().starts_with("http://confluence.jetbrains.com/"));

        let third = it.next().unwrap();
        assert_eq!(third.line_start(), 41);
        assert_eq!(third.message(), "Convert to auto-property");
        assert_eq!(third.category(), "ConvertToAutoProperty");
        assert_eq!(third.priority(), Priority::Low);
        assert_eq!(third.type_name(), "Language Usage Opportunities");
    }

    #[test]
    fn test_unknown_type_id_is_fatal() {
        let xml = r#"<Report><IssueTypes/><Issues><Project Name="P">
            <Issue TypeId="Nope" File="a.cs" Line="1" Message="m" />
        </Project></Issues></Report>"#;
        let err = parse_text(&parser(), xml).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::UnknownRule));
    }
}
