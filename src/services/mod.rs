pub mod assembler;
pub mod bank_indexer;
pub mod bank_parser;
pub mod selector;
pub mod tag_matcher;
pub mod template_parser;
pub mod warn_writer;
pub mod zip_packager;

pub use assembler::DocAssembler;
pub use bank_indexer::BankIndex;
pub use bank_parser::BankParser;
pub use selector::{Selector, SlotOutcome};
pub use tag_matcher::TagMatcher;
pub use template_parser::TemplateParser;
pub use warn_writer::WarnWriter;
pub use zip_packager::ZipPackager;
