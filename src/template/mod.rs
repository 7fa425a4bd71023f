//! Template processing engine for quantigen
//!
//! This module contains the core template processing components:
//! - `sections`: Splits templates into text and optional named sections
//! - `context`: Holds the fragments and names substituted into one output file
//! - `generator`: Runs the whole pipeline from a catalogue entry to a formatted file
//! - `operation`: Defines the changes applied to the destination directory

pub mod context;
pub mod generator;
pub mod operation;
pub mod sections;

pub use context::{Fragments, TemplateContext};
pub use generator::{GeneratedFile, Generator, GeneratorOptions};
pub use operation::TemplateOperation;
pub use sections::{SectionToggles, Template};
