pub mod reader;
pub mod row;
pub mod writer;

pub use reader::CsvStreamReader;
pub use row::OutputRow;
pub use writer::{export_rows, CsvStreamWriter, UTF8_BOM};
