//! krushi-site
//!
//! 農業ショップ向けのバイリンガル（マラーティー語／英語）サイトレンダラー

pub mod assets;
pub mod cli;
pub mod config;
pub mod crops;
pub mod dom;
pub mod i18n;
pub mod page;
pub mod prefs;
pub mod shop;
pub mod site;
mod test_utils;
pub mod views;

pub use page::{
    Page,
    PageKind,
};
pub use site::SiteBuilder;
