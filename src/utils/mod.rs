pub mod text;

pub use text::escape_xml;
