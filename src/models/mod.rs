pub mod bank;
pub mod loaders;
pub mod question;

pub use bank::QuestionBank;
pub use loaders::{
    parse_bank, FileLoader, Loader, QuestionLoader, RemoteLoader, SourceFormat, StaticLoader,
};
pub use question::{QuestionRecord, RawQuestion};
