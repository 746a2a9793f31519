//! Renders the implementation class for one template.

use crate::matcher::EligibleMember;
use std::fmt::Write;

/// One generated method: the template member and the names it returns.
#[derive(Debug, Clone)]
pub struct MethodPlan {
    pub member: EligibleMember,
    pub names: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ImplPlan {
    /// `package.ImplName`
    pub qualified_name: String,
    pub package: String,
    pub template_name: String,
    pub impl_name: String,
    pub methods: Vec<MethodPlan>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SynthOptions {
    pub escape_literals: bool,
}

pub struct ImplSynthesizer {
    options: SynthOptions,
}

impl ImplSynthesizer {
    pub fn new(options: SynthOptions) -> Self {
        Self { options }
    }

    /// Full text of the compilation unit. Output depends only on the plan,
    /// so identical plans render byte-identical text.
    pub fn render(&self, plan: &ImplPlan) -> String {
        let mut output = String::new();

        if !plan.package.is_empty() {
            let _ = write!(output, "package {};\n\n", plan.package);
        }

        let _ = writeln!(
            output,
            "public final class {} implements {} {{",
            plan.impl_name, plan.template_name
        );

        for method in &plan.methods {
            if !method.member.is_abstract {
                // already has a body in the template
                continue;
            }
            output.push_str(&self.render_method(method));
        }

        output.push_str("}\n");
        output
    }

    pub(crate) fn render_method(&self, method: &MethodPlan) -> String {
        let literals: Vec<String> = method
            .names
            .iter()
            .map(|name| format!("\n        \"{}\"", self.literal(name)))
            .collect();

        format!(
            "  public {} {}() {{\n    return java.util.Arrays.asList({}\n    );\n  }}\n",
            method.member.return_type,
            method.member.name,
            literals.join(",")
        )
    }

    fn literal(&self, value: &str) -> String {
        if self.options.escape_literals {
            escape_java_string(value)
        } else {
            value.to_string()
        }
    }
}

/// Escape a value for use between double quotes in Java source.
pub fn escape_java_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{8}' => escaped.push_str("\\b"),
            '\u{c}' => escaped.push_str("\\f"),
            c if c.is_control() => {
                let _ = write!(escaped, "\\u{:04x}", c as u32);
            }
            c => escaped.push(c),
        }
    }
    escaped
}
