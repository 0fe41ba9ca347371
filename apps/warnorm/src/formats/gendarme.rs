//! Mono Gendarme XML reports.
//!
//! ```xml
//! <gendarme-output>
//!   <rules>
//!     <rule Name="AvoidUnusedParametersRule" Type="Method" Uri="https://...">Gendarme.Rules...</rule>
//!   </rules>
//!   <results>
//!     <rule Name="AvoidUnusedParametersRule">
//!       <problem>The parameter is not used.</problem>
//!       <target Name="System.Void Foo::Bar(System.Int32)">
//!         <defect Severity="Medium" Source="c:\src\Foo.cs(≈16)" />
//!       </target>
//!     </rule>
//!   </results>
//! </gendarme-output>
//! ```
//!
//! Only method rules locate their defects; type and assembly rules produce
//! issues with an empty file name and line 0.

use crate::models::IssueBuilder;
use crate::parser::structured::{child_elements, first_child, text_of};
use crate::parser::{extract_location, occurrence_priority, Rule, RuleKind, RuleSchema, StructuredParser};
use roxmltree::Node;

pub const ID: &str = "gendarme";

pub struct GendarmeSchema;

pub fn parser() -> StructuredParser<GendarmeSchema> {
    StructuredParser::new(GendarmeSchema)
}

impl RuleSchema for GendarmeSchema {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        "Gendarme"
    }

    fn root_tag(&self) -> &str {
        "gendarme-output"
    }

    fn rule_nodes<'a, 'i>(&self, root: Node<'a, 'i>) -> Vec<Node<'a, 'i>> {
        first_child(root, "rules")
            .map(|rules| child_elements(rules, "rule"))
            .unwrap_or_default()
    }

    fn read_rule(&self, node: Node<'_, '_>) -> Rule {
        let name = node.attribute("Name").unwrap_or_default();
        let mut rule = Rule::new(name, name);
        rule.kind = RuleKind::parse(node.attribute("Type").unwrap_or_default());
        rule.url = Rule::parse_url(node.attribute("Uri").unwrap_or_default());
        rule.group = text_of(node);
        rule
    }

    fn result_nodes<'a, 'i>(&self, root: Node<'a, 'i>) -> Vec<Node<'a, 'i>> {
        first_child(root, "results")
            .map(|results| child_elements(results, "rule"))
            .unwrap_or_default()
    }

    fn rule_ref(&self, result: Node<'_, '_>) -> String {
        result.attribute("Name").unwrap_or_default().to_string()
    }

    fn occurrences<'a, 'i>(&self, result: Node<'a, 'i>) -> Vec<Node<'a, 'i>> {
        child_elements(result, "target")
    }

    fn fill(
        &self,
        rule: &Rule,
        result: Node<'_, '_>,
        occurrence: Node<'_, '_>,
        builder: &mut IssueBuilder,
    ) {
        // Surrounding whitespace of the problem text is layout, not content
        let problem = first_child(result, "problem").map(text_of).unwrap_or_default();
        let defect = first_child(occurrence, "defect");
        let source = defect
            .and_then(|d| d.attribute("Source"))
            .unwrap_or_default();
        let severity = defect
            .and_then(|d| d.attribute("Severity"))
            .unwrap_or_default();

        let (file, line) = if rule.kind.carries_location() {
            extract_location(source).unwrap_or_default()
        } else {
            (String::new(), 0)
        };

        builder
            .set_file_name(file)
            .set_line_start(line)
            .set_line_end(line)
            .set_category(rule.name.as_str())
            .set_type(rule.group.as_str())
            .set_reference(rule.url.as_ref().map(|u| u.as_str()).unwrap_or_default())
            .set_message(problem)
            .set_priority(occurrence_priority(severity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::Priority;
    use crate::parser::{parse_text, ParseContext, Parser};
    use crate::preprocess::VariableExpander;
    use std::collections::BTreeMap;

    fn report(kind: &str, source: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<gendarme-output version="2.10.0.0">
  <files><file Name="Foo.dll">Foo.dll</file></files>
  <rules>
    <rule Name="R1" Type="{kind}" Uri="https://example.org/R1">Gendarme.Rules.Sample.R1</rule>
  </rules>
  <results>
    <rule Name="R1">
      <problem>Something is wrong.</problem>
      <solution>Fix it.</solution>
      <target Name="System.Void Foo::Bar()" Assembly="Foo, Version=1.0.0.0">
        <defect Severity="High" Confidence="Total" Location="Foo::Bar" Source="{source}" />
      </target>
    </rule>
  </results>
</gendarme-output>"#
        )
    }

    #[test]
    fn test_method_rule_locates_defect() {
        let issues = parse_text(&parser(), &report("Method", "Foo.cs(16)extra")).unwrap();
        assert_eq!(issues.len(), 1);
        let issue = issues.get(0).unwrap();
        assert_eq!(issue.file_name(), "Foo.cs");
        assert_eq!(issue.line_start(), 16);
        assert_eq!(issue.category(), "R1");
        assert_eq!(issue.type_name(), "Gendarme.Rules.Sample.R1");
        assert_eq!(issue.message(), "Something is wrong.");
        assert_eq!(issue.priority(), Priority::High);
        assert_eq!(issue.reference(), "https://example.org/R1");
        assert_eq!(issue.origin(), "gendarme");
    }

    #[test]
    fn test_assembly_rule_has_no_location() {
        let issues = parse_text(&parser(), &report("Assembly", "Foo.cs(16)extra")).unwrap();
        let issue = issues.get(0).unwrap();
        assert_eq!(issue.file_name(), "");
        assert_eq!(issue.line_start(), 0);
        assert_eq!(issue.category(), "R1");
    }

    #[test]
    fn test_approximate_line_marker() {
        let issues = parse_text(&parser(), &report("Method", r"c:\src\Foo.cs(≈42)")).unwrap();
        let issue = issues.get(0).unwrap();
        assert_eq!(issue.file_name(), r"c:\src\Foo.cs");
        assert_eq!(issue.line_start(), 42);
    }

    #[test]
    fn test_one_issue_per_target_sharing_problem() {
        let xml = r#"<gendarme-output>
  <rules>
    <rule Name="T1" Type="Type" Uri="not-a-url">T1Impl</rule>
  </rules>
  <results>
    <rule Name="T1">
      <problem>Type issue.</problem>
      <target Name="A"><defect Severity="Low" Source="" /></target>
      <target Name="B"><defect Severity="Medium" Source="" /></target>
    </rule>
  </results>
</gendarme-output>"#;
        let issues = parse_text(&parser(), xml).unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues.get(0).unwrap().priority(), Priority::Low);
        assert_eq!(issues.get(1).unwrap().priority(), Priority::Normal);
        for issue in &issues {
            assert_eq!(issue.message(), "Type issue.");
            // malformed Uri is dropped, not fatal
            assert_eq!(issue.reference(), "");
        }
    }

    #[test]
    fn test_accepts_doctype_declaration() {
        let xml = report("Method", "Foo.cs(16)").replacen(
            "<gendarme-output",
            "<!DOCTYPE gendarme-output>\n<gendarme-output",
            1,
        );
        let issues = parse_text(&parser(), &xml).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.get(0).unwrap().line_start(), 16);

        let empty = r#"<?xml version="1.0"?><!DOCTYPE gendarme-output><gendarme-output/>"#;
        assert!(parse_text(&parser(), empty).unwrap().is_empty());
    }

    #[test]
    fn test_pre_processor_expands_document_text() {
        let mut vars = BTreeMap::new();
        vars.insert("W".to_string(), "ws".to_string());
        let expander = VariableExpander::new(vars);
        let expand = |raw: &str| expander.expand(raw);
        let ctx = ParseContext::new().with_pre_processor(&expand);
        let xml = report("Method", "${W}/Foo.cs(16)");
        let mut builder = IssueBuilder::new();
        let issues = parser()
            .parse(Box::new(xml.as_bytes()), &mut builder, &ctx)
            .unwrap();
        let issue = issues.get(0).unwrap();
        assert_eq!(issue.file_name(), "ws/Foo.cs");
        assert_eq!(issue.line_start(), 16);
    }

    #[test]
    fn test_undefined_rule_is_fatal() {
        let xml = r#"<gendarme-output>
  <rules><rule Name="R1" Type="Method">X</rule></rules>
  <results>
    <rule Name="R1"><problem>p</problem><target><defect Source="A.cs(1)" /></target></rule>
    <rule Name="Missing"><problem>p</problem><target><defect Source="A.cs(2)" /></target></rule>
  </results>
</gendarme-output>"#;
        let err = parse_text(&parser(), xml).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::UnknownRule));
    }
}
