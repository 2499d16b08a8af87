mod error;
pub use error::{InputError, ParserError};

mod line;
pub use line::{BytesLines, Line, LineReader};

mod content_line;
pub use content_line::ContentLineParser;
