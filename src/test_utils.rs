//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use crate::assets::MemoryAssets;

/// `tests/fixtures/site` のサンプルサイト（ショップ情報・作物・翻訳）
pub(crate) const INFO_TXT: &str = include_str!("../tests/fixtures/site/assets/info.txt");
pub(crate) const CROPS_JSON: &str = include_str!("../tests/fixtures/site/assets/data/crops.json");
pub(crate) const LANGUAGES_JSON: &str =
    include_str!("../tests/fixtures/site/assets/data/languages.json");

/// サンプルサイトのアセットをデフォルト設定のパスで返す
pub(crate) fn site_assets() -> MemoryAssets {
    MemoryAssets::new()
        .with_file("assets/info.txt", INFO_TXT)
        .with_file("assets/data/crops.json", CROPS_JSON)
        .with_file("assets/data/languages.json", LANGUAGES_JSON)
}
