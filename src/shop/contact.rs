//! Contact links built from shop metadata

use url::Url;

use crate::i18n::Language;
use crate::shop::ShopInfo;

/// Click-to-chat endpoint; the number follows.
const WHATSAPP_BASE: &str = "https://wa.me/";

/// `tel:` link for the shop's `PHONE`.
#[must_use]
pub fn tel_link(info: &ShopInfo) -> Option<String> {
    info.get("PHONE").map(|phone| format!("tel:{phone}"))
}

/// WhatsApp chat link for `WHATSAPP`, pre-filled with a greeting in `language`.
///
/// Everything but digits is stripped from the number.
#[must_use]
pub fn whatsapp_link(info: &ShopInfo, language: Language) -> Option<Url> {
    let phone: String = info.get("WHATSAPP")?.chars().filter(char::is_ascii_digit).collect();
    if phone.is_empty() {
        return None;
    }

    let message = match language {
        Language::Marathi => "नमस्कार! मला कृषी माहिती हवी आहे.",
        Language::English => "Hello! I need agriculture information.",
    };

    match Url::parse_with_params(&format!("{WHATSAPP_BASE}{phone}"), [("text", message)]) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!("Invalid WhatsApp number '{phone}': {e}");
            None
        }
    }
}
