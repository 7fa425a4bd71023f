use crate::error::{Error, Result};
use regex::Regex;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Section { name: String, body: Vec<Segment> },
}

/// Which optional sections of a template are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionToggles {
    toggles: BTreeMap<String, bool>,
}

impl SectionToggles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, section: &str, keep: bool) -> Self {
        self.toggles.insert(section.to_string(), keep);
        self
    }

    /// Whether `section` is kept, `None` for a section nothing decides on.
    pub fn get(&self, section: &str) -> Option<bool> {
        self.toggles.get(section).copied()
    }
}

/// A template split into plain text and named optional sections.
///
/// A section spans from a line holding only `#Name#` to a later line holding only `#/Name#`.
/// Lines holding a placeholder without a matching closing line stay plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parses `text`, `name` identifies the template in errors.
    pub fn parse(name: &str, text: &str) -> Result<Self> {
        let marker = Regex::new(r"^\s*#(/?)([A-Za-z0-9_]+)#\s*$")?;
        let closers: HashSet<&str> = text
            .lines()
            .filter_map(|line| marker.captures(line))
            .filter(|captures| &captures[1] == "/")
            .filter_map(|captures| captures.get(2).map(|name| name.as_str()))
            .collect();

        let mut stack: Vec<(String, Vec<Segment>)> = Vec::new();
        let mut segments = Vec::new();
        for line in text.split_inclusive('\n') {
            let captures = marker.captures(line.trim_end_matches(['\r', '\n']));
            match captures {
                Some(captures) if &captures[1] == "/" => {
                    let section = &captures[2];
                    match stack.pop() {
                        Some((open, body)) if open == section => {
                            let parent = stack.last_mut().map_or(&mut segments, |(_, body)| body);
                            parent.push(Segment::Section { name: open, body });
                        }
                        _ => {
                            return Err(Error::InvalidInput(format!(
                                "template '{name}' closes section '{section}' which is not open"
                            )))
                        }
                    }
                }
                Some(captures) if closers.contains(&captures[2]) => {
                    log::trace!("Template '{name}' opens section '{}'", &captures[2]);
                    stack.push((captures[2].to_string(), Vec::new()));
                }
                _ => {
                    let current = stack.last_mut().map_or(&mut segments, |(_, body)| body);
                    match current.last_mut() {
                        Some(Segment::Text(text)) => text.push_str(line),
                        _ => current.push(Segment::Text(line.to_string())),
                    }
                }
            }
        }

        if let Some((open, _)) = stack.pop() {
            return Err(Error::InvalidInput(format!("template '{name}' never closes section '{open}'")));
        }
        Ok(Self { name: name.to_string(), segments })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of every section, outer sections first.
    pub fn sections(&self) -> Vec<&str> {
        fn collect<'a>(segments: &'a [Segment], names: &mut Vec<&'a str>) {
            for segment in segments {
                if let Segment::Section { name, body } = segment {
                    names.push(name);
                    collect(body, names);
                }
            }
        }
        let mut names = Vec::new();
        collect(&self.segments, &mut names);
        names
    }

    /// Renders the template, keeping the body of kept sections and dropping the others.
    ///
    /// Marker lines never appear in the output.
    ///
    /// # Returns
    /// * `Err(Error::UnknownSection)` - If `toggles` does not decide on a section of the template
    pub fn render(&self, toggles: &SectionToggles) -> Result<String> {
        let mut output = String::new();
        self.render_segments(&self.segments, toggles, &mut output)?;
        Ok(output)
    }

    fn render_segments(&self, segments: &[Segment], toggles: &SectionToggles, output: &mut String) -> Result<()> {
        for segment in segments {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Section { name, body } => match toggles.get(name) {
                    Some(true) => self.render_segments(body, toggles, output)?,
                    Some(false) => log::trace!("Dropping section '{name}' of template '{}'", self.name),
                    None => {
                        return Err(Error::UnknownSection {
                            template: self.name.clone(),
                            section: name.clone(),
                        })
                    }
                },
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "\
head
#Vector3#
    three
#/Vector3#
    #Interfaces#
#DoubleMagnitude#
double
#/DoubleMagnitude#
tail
";

    #[test]
    fn only_closed_markers_are_sections() {
        let template = Template::parse("Vector", TEMPLATE).unwrap();
        assert_eq!(template.sections(), vec!["Vector3", "DoubleMagnitude"]);
        assert_eq!(template.name(), "Vector");
    }

    #[test]
    fn kept_sections_lose_their_markers() {
        let template = Template::parse("Vector", TEMPLATE).unwrap();
        let toggles = SectionToggles::new().with("Vector3", true).with("DoubleMagnitude", false);
        assert_eq!(template.render(&toggles).unwrap(), "head\n    three\n    #Interfaces#\ntail\n");

        let toggles = SectionToggles::new().with("Vector3", false).with("DoubleMagnitude", true);
        assert_eq!(template.render(&toggles).unwrap(), "head\n    #Interfaces#\ndouble\ntail\n");
    }

    #[test]
    fn unknown_section_is_an_error() {
        let template = Template::parse("Vector", TEMPLATE).unwrap();
        let toggles = SectionToggles::new().with("Vector3", true);
        match template.render(&toggles) {
            Err(Error::UnknownSection { template, section }) => {
                assert_eq!(template, "Vector");
                assert_eq!(section, "DoubleMagnitude");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn nested_sections() {
        let text = "#A#\na\n#B#\nb\n#/B#\n#/A#\nend";
        let template = Template::parse("T", text).unwrap();
        assert_eq!(template.sections(), vec!["A", "B"]);
        let toggles = SectionToggles::new().with("A", true).with("B", false);
        assert_eq!(template.render(&toggles).unwrap(), "a\nend");
        let toggles = SectionToggles::new().with("A", false);
        assert_eq!(template.render(&toggles).unwrap(), "end");
    }

    #[test]
    fn text_without_sections_is_unchanged() {
        let text = "plain #Quantity#\n\n#Units#\n";
        let template = Template::parse("Scalar", text).unwrap();
        assert_eq!(template.render(&SectionToggles::new()).unwrap(), text);
    }

    #[test]
    fn unbalanced_markers_are_rejected() {
        assert!(matches!(Template::parse("T", "#A#\n#B#\n#/A#\n#/B#\n"), Err(Error::InvalidInput(_))));
        assert!(matches!(Template::parse("T", "#/A#\n"), Err(Error::InvalidInput(_))));
    }
}
