//! Language module: translation table, active language and relabeling.

mod language;
mod localizer;
mod table;

pub use language::{
    Language,
    UnknownLanguage,
};
pub use localizer::{
    LanguageChanged,
    Localizer,
};
pub use table::{
    TranslationTable,
    flatten_json,
};
