//! The extraction pipeline: normalization, prompting, and response parsing.

pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod spreadsheet;

pub use parser::{parse_response, strip_fences};
pub use pipeline::{run_extraction, SourceFile};
pub use prompt::EXTRACTION_PROMPT;
pub use spreadsheet::sheets_to_text;
