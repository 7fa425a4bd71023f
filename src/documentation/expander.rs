use crate::constants::{markers, COMMENT_PREFIX, DOCUMENTATION_PASS_LIMIT};
use crate::documentation::resolver::{DocumentationResolver, ResolvedTag};
use crate::documentation::source::DocumentationSource;
use crate::error::{Error, Result};
use crate::naming::QuantityNames;
use regex::{Captures, Regex};
use std::fmt;

/// Problem found while expanding documentation. Expansion continues after each one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Neither the quantity nor the generic documentation defines the tag.
    UnresolvedTag,
    MalformedCall,
    ParameterNotSpecified { parameter: String },
    UndeclaredParameter { parameter: String, value: String },
    UnmatchedArgument { value: String },
    /// An unnamed argument was bound to the next parameter no named argument claimed.
    PositionalArgument { parameter: String, value: String },
    UnresolvedParameter { parameter: String },
    NotAnArray { parameter: String, value: String },
    IndexOutOfBounds { parameter: String, index: usize, length: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub quantity: String,
    pub tag: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn level(&self) -> log::Level {
        match self.kind {
            DiagnosticKind::PositionalArgument { .. } => log::Level::Info,
            DiagnosticKind::UndeclaredParameter { .. } | DiagnosticKind::UnresolvedParameter { .. } => {
                log::Level::Warn
            }
            _ => log::Level::Error,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::UnresolvedTag => write!(f, "Could not resolve documentation tag"),
            DiagnosticKind::MalformedCall => write!(f, "Documentation call is malformed"),
            DiagnosticKind::ParameterNotSpecified { parameter } => {
                write!(f, "Parameter '{parameter}' was not specified")
            }
            DiagnosticKind::UndeclaredParameter { parameter, value } => {
                write!(f, "Parameter '{parameter}' (value '{value}') is not part of the signature")
            }
            DiagnosticKind::UnmatchedArgument { value } => {
                write!(f, "Unnamed argument '{value}' could not be matched to a parameter")
            }
            DiagnosticKind::PositionalArgument { parameter, value } => {
                write!(f, "Unnamed argument '{value}' was matched to parameter '{parameter}' by position")
            }
            DiagnosticKind::UnresolvedParameter { parameter } => {
                write!(f, "Parameter '{parameter}' is requested but not part of the signature")
            }
            DiagnosticKind::NotAnArray { parameter, value } => {
                write!(f, "Parameter '{parameter}' is indexed but its value '{value}' is not a list")
            }
            DiagnosticKind::IndexOutOfBounds { parameter, index, length } => {
                write!(f, "Index {index} of parameter '{parameter}' is out of bounds for {length} elements")
            }
        }?;
        write!(f, " in tag '{}' of quantity '{}'.", self.tag, self.quantity)
    }
}

/// Result of expanding every documentation tag of a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionOutcome {
    pub text: String,
    /// Whether any tag was expanded.
    pub modified: bool,
    pub diagnostics: Vec<Diagnostic>,
}

/// A `#Document:tag(arguments)#` occurrence in a line.
#[derive(Debug, PartialEq, Eq)]
struct DocumentationCall<'l> {
    tag: &'l str,
    arguments: &'l str,
    start: usize,
    end: usize,
}

/// Expands documentation tags until none is left.
pub struct DocumentationExpander<'r, S: DocumentationSource> {
    resolver: &'r mut DocumentationResolver<S>,
    pass_limit: usize,
}

impl<'r, S: DocumentationSource> DocumentationExpander<'r, S> {
    pub fn new(resolver: &'r mut DocumentationResolver<S>) -> Self {
        Self { resolver, pass_limit: DOCUMENTATION_PASS_LIMIT }
    }

    pub fn with_pass_limit(mut self, pass_limit: usize) -> Self {
        self.pass_limit = pass_limit;
        self
    }

    /// Repeats expansion passes over `text` until a pass expands nothing.
    ///
    /// # Arguments
    /// * `quantity` - Quantity whose documentation is looked up
    /// * `names` - Names substituted into every resolved block
    /// * `text` - Text with documentation tags
    ///
    /// # Returns
    /// * `Ok(ExpansionOutcome)` - The expanded text and collected diagnostics
    /// * `Err(Error::DocumentationPassLimit)` - If tags were still expanded on the last allowed pass
    pub fn expand(&mut self, quantity: &str, names: &QuantityNames, text: &str) -> Result<ExpansionOutcome> {
        let mut diagnostics = Vec::new();
        let mut current = text.to_string();
        let mut modified = false;

        for pass in 1..=self.pass_limit {
            let (next, changed) = self.pass(quantity, names, &current, &mut diagnostics)?;
            if !changed {
                log::debug!("Documentation of '{quantity}' converged after {pass} passes");
                return Ok(ExpansionOutcome { text: current, modified, diagnostics });
            }
            current = next;
            modified = true;
        }

        Err(Error::DocumentationPassLimit { quantity: quantity.to_string(), passes: self.pass_limit })
    }

    /// Expands the first tag of every line once.
    fn pass(
        &mut self,
        quantity: &str,
        names: &QuantityNames,
        text: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(String, bool)> {
        let mut lines = Vec::new();
        let mut modified = false;

        for line in text.split('\n') {
            let Some(start) = line.find(markers::DOCUMENT) else {
                lines.push(line.to_string());
                continue;
            };
            modified = true;

            let (prefix, replacement) = match parse_call(line, start) {
                Some(call) => {
                    let replacement = self.expand_call(quantity, names, &call, diagnostics)?;
                    (&line[..call.start], format!("{replacement}{}", &line[call.end..]))
                }
                None => {
                    report(diagnostics, quantity, malformed_tag(line, start), DiagnosticKind::MalformedCall);
                    (&line[..start], String::new())
                }
            };
            lines.extend(splice(prefix, &replacement));
        }

        Ok((lines.join("\n"), modified))
    }

    fn expand_call(
        &mut self,
        quantity: &str,
        names: &QuantityNames,
        call: &DocumentationCall<'_>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<String> {
        let mut arguments: Vec<String> =
            split_arguments(call.arguments).into_iter().map(str::to_string).collect();

        let mut resolved = self.resolver.resolve_tag(quantity, call.tag)?;
        if resolved.is_none() && arguments.is_empty() {
            if let Some((generic, unit)) = structural_fallback(call.tag) {
                log::trace!("Falling back from '{}' to '{generic}' for '{quantity}'", call.tag);
                resolved = self.resolver.resolve_tag(quantity, generic)?;
                arguments = vec![format!("unit={unit}")];
            }
        }

        let Some(resolved) = resolved else {
            report(diagnostics, quantity, call.tag, DiagnosticKind::UnresolvedTag);
            return Ok(String::new());
        };

        let values = bind_arguments(quantity, call.tag, &resolved, &arguments, diagnostics);
        let text = inject_parameters(quantity, call.tag, &resolved, &values, diagnostics)?;
        Ok(names.substitute(&text))
    }
}

/// Coerces a produced line into a `/// ` comment, whatever slashes it started with.
///
/// # Examples
/// ```
/// use quantigen::documentation::expander::normalize_comment;
///
/// assert_eq!(normalize_comment("// <summary>"), "/// <summary>");
/// assert_eq!(normalize_comment("///"), "///");
/// ```
pub fn normalize_comment(line: &str) -> String {
    let content = line.trim_start_matches(['/', ' ']).trim_end();
    if content.is_empty() {
        COMMENT_PREFIX.trim_end().to_string()
    } else {
        format!("{COMMENT_PREFIX}{content}")
    }
}

/// Lines produced by a call that starts after `prefix` and expanded to `replacement`.
///
/// Text before the call is kept as written, only the lines of the block become comments.
/// Blank block lines stay blank; a call that leaves nothing at all removes its line.
fn splice(prefix: &str, replacement: &str) -> Vec<String> {
    let indent = leading_indent(prefix);
    let inline = !prefix.trim_start_matches(['/', ' ']).is_empty();

    let produced: Vec<String> = replacement
        .split('\n')
        .map(str::trim)
        .enumerate()
        .map(|(index, block_line)| {
            if index == 0 && inline {
                format!("{prefix}{block_line}").trim_end().to_string()
            } else if block_line.is_empty() {
                String::new()
            } else {
                format!("{indent}{}", normalize_comment(block_line))
            }
        })
        .collect();

    if produced.iter().all(String::is_empty) {
        Vec::new()
    } else {
        produced
    }
}

fn report(diagnostics: &mut Vec<Diagnostic>, quantity: &str, tag: &str, kind: DiagnosticKind) {
    let diagnostic = Diagnostic { quantity: quantity.to_string(), tag: tag.to_string(), kind };
    log::log!(diagnostic.level(), "{diagnostic}");
    diagnostics.push(diagnostic);
}

fn leading_indent(line: &str) -> &str {
    &line[..line.len() - line.trim_start_matches(' ').len()]
}

fn malformed_tag(line: &str, start: usize) -> &str {
    let rest = &line[start + markers::DOCUMENT.len()..];
    rest.split(['#', '(']).next().unwrap_or(rest)
}

/// Finds the call starting at `start`, matching parentheses around its arguments.
fn parse_call(line: &str, start: usize) -> Option<DocumentationCall<'_>> {
    let tag_start = start + markers::DOCUMENT.len();
    let tag_length = line[tag_start..].find(['(', '#'])?;
    let tag = &line[tag_start..tag_start + tag_length];
    if tag.is_empty() {
        return None;
    }

    let open = tag_start + tag_length;
    if line[open..].starts_with('#') {
        return Some(DocumentationCall { tag, arguments: "", start, end: open + 1 });
    }

    let mut depth = 0usize;
    for (offset, character) in line[open..].char_indices() {
        match character {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    let close = open + offset;
                    if !line[close + 1..].starts_with('#') {
                        return None;
                    }
                    return Some(DocumentationCall {
                        tag,
                        arguments: &line[open + 1..close],
                        start,
                        end: close + 2,
                    });
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits at commas outside parentheses and brackets.
fn split_arguments(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut arguments = Vec::new();
    let (mut parentheses, mut brackets, mut last) = (0i32, 0i32, 0usize);
    for (index, character) in text.char_indices() {
        match character {
            '(' => parentheses += 1,
            ')' => parentheses -= 1,
            '[' => brackets += 1,
            ']' => brackets -= 1,
            ',' if parentheses == 0 && brackets == 0 => {
                arguments.push(text[last..index].trim());
                last = index + 1;
            }
            _ => {}
        }
    }
    arguments.push(text[last..].trim());
    arguments
}

/// `InMetres` and `OneMetre` fall back to the generic `InUnit` and `OneUnit` blocks.
fn structural_fallback(tag: &str) -> Option<(&'static str, &str)> {
    [("In", "InUnit"), ("One", "OneUnit")].into_iter().find_map(|(prefix, generic)| {
        let unit = tag.strip_prefix(prefix)?;
        let is_unit = tag != generic && unit.starts_with(|c: char| c.is_ascii_uppercase());
        is_unit.then_some((generic, unit))
    })
}

fn bind_arguments(
    quantity: &str,
    tag: &str,
    resolved: &ResolvedTag,
    arguments: &[String],
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<(String, String)> {
    let mut values = Vec::new();
    let mut unnamed = Vec::new();
    for argument in arguments {
        match argument.split_once('=') {
            Some((parameter, value)) => values.push((parameter.trim().to_string(), value.trim().to_string())),
            None => unnamed.push(argument.trim().to_string()),
        }
    }

    if unnamed.is_empty() {
        return values;
    }

    if arguments.len() != resolved.parameters.len() {
        for value in unnamed {
            report(diagnostics, quantity, tag, DiagnosticKind::UnmatchedArgument { value });
        }
        return values;
    }

    let free: Vec<String> = resolved
        .parameters
        .iter()
        .filter(|parameter| !values.iter().any(|(name, _)| name == *parameter))
        .cloned()
        .collect();
    let mut free = free.into_iter();
    for value in unnamed {
        match free.next() {
            Some(parameter) => {
                let kind = DiagnosticKind::PositionalArgument { parameter: parameter.clone(), value: value.clone() };
                report(diagnostics, quantity, tag, kind);
                values.push((parameter, value));
            }
            None => report(diagnostics, quantity, tag, DiagnosticKind::UnmatchedArgument { value }),
        }
    }
    values
}

fn inject_parameters(
    quantity: &str,
    tag: &str,
    resolved: &ResolvedTag,
    values: &[(String, String)],
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<String> {
    let mut text = resolved.text.clone();

    for parameter in &resolved.parameters {
        let token = format!("{}{parameter}#", markers::PARAM);
        match values.iter().find(|(name, _)| name == parameter) {
            Some((_, value)) => {
                text = text.replace(&token, value);
                text = inject_elements(quantity, tag, parameter, value, &text, diagnostics)?;
            }
            None => {
                let kind = DiagnosticKind::ParameterNotSpecified { parameter: parameter.clone() };
                report(diagnostics, quantity, tag, kind);
                text = text.replace(&token, markers::PARAMETER_NOT_SPECIFIED);
            }
        }
    }

    for (parameter, value) in values {
        if !resolved.parameters.contains(parameter) {
            let kind = DiagnosticKind::UndeclaredParameter { parameter: parameter.clone(), value: value.clone() };
            report(diagnostics, quantity, tag, kind);
        }
    }

    if text.contains(markers::PARAM) {
        let leftover = Regex::new(&format!(r"{}([A-Za-z0-9_\-]*)", regex::escape(markers::PARAM)))?;
        for captures in leftover.captures_iter(&text) {
            let parameter = captures[1].to_string();
            report(diagnostics, quantity, tag, DiagnosticKind::UnresolvedParameter { parameter });
        }
    }

    Ok(text)
}

/// Substitutes `#Param:name[i]#` and `#Param:name[%i]#` with elements of a `[a, b]` value.
fn inject_elements(
    quantity: &str,
    tag: &str,
    parameter: &str,
    value: &str,
    text: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<String> {
    let access = Regex::new(&format!(
        r"{}{}\[(%?)([0-9]+)\]#",
        regex::escape(markers::PARAM),
        regex::escape(parameter)
    ))?;
    if !access.is_match(text) {
        return Ok(text.to_string());
    }

    let Some(list) = value.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) else {
        let kind = DiagnosticKind::NotAnArray { parameter: parameter.to_string(), value: value.to_string() };
        report(diagnostics, quantity, tag, kind);
        return Ok(access.replace_all(text, value).into_owned());
    };
    let elements: Vec<&str> = list.split(',').map(str::trim).collect();

    let replaced = access.replace_all(text, |captures: &Captures<'_>| {
        let wraps = &captures[1] == "%";
        let index: usize = captures[2].parse().unwrap_or(usize::MAX);
        if wraps {
            return elements[index % elements.len()].to_string();
        }
        match elements.get(index) {
            Some(element) => element.to_string(),
            None => {
                let kind = DiagnosticKind::IndexOutOfBounds {
                    parameter: parameter.to_string(),
                    index,
                    length: elements.len(),
                };
                report(diagnostics, quantity, tag, kind);
                String::new()
            }
        }
    });
    Ok(replaced.into_owned())
}
