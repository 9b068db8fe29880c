pub mod markdown;
pub mod sections;

pub use markdown::MarkdownRenderer;
pub use sections::{PRODUCT_SECTIONS, Section, SectionContent, render_sections};
