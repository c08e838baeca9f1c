// SPDX-License-Identifier: GPL-3.0-only

//! Localization of key labels using fluent translations.
//!
//! Translations live in `i18n/<lang>/fieldboard.ftl` and are embedded into
//! the binary. English is the fallback language and is always loaded, so
//! labels resolve even when [`init`] was never called.

use std::sync::LazyLock;

use i18n_embed::{
    DefaultLocalizer, LanguageLoader, Localizer,
    fluent::{FluentLanguageLoader, fluent_language_loader},
    unic_langid::LanguageIdentifier,
};
use rust_embed::RustEmbed;

/// Applies the requested languages to the shared loader.
pub fn init(requested_languages: &[LanguageIdentifier]) {
    if let Err(why) = localizer().select(requested_languages) {
        tracing::warn!("error while loading fluent localizations: {why}");
    }
}

/// Returns a localizer bound to the embedded translations.
#[must_use]
pub fn localizer() -> Box<dyn Localizer> {
    Box::from(DefaultLocalizer::new(&*LANGUAGE_LOADER, &Localizations))
}

#[derive(RustEmbed)]
#[folder = "i18n/"]
struct Localizations;

/// Shared fluent loader with the fallback language preloaded.
pub static LANGUAGE_LOADER: LazyLock<FluentLanguageLoader> = LazyLock::new(|| {
    let loader: FluentLanguageLoader = fluent_language_loader!();

    loader
        .load_fallback_language(&Localizations)
        .expect("Error while loading fallback language");

    loader
});

/// Request a localized string by ID from the i18n/ directory.
#[macro_export]
macro_rules! fl {
    ($message_id:literal) => {{
        i18n_embed_fl::fl!($crate::i18n::LANGUAGE_LOADER, $message_id)
    }};

    ($message_id:literal, $($args:expr),*) => {{
        i18n_embed_fl::fl!($crate::i18n::LANGUAGE_LOADER, $message_id, $($args), *)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_labels_resolve() {
        assert_eq!(crate::fl!("backspace"), "Backspace");
        assert_eq!(crate::fl!("caps-lock"), "Caps Lock");
        assert_eq!(crate::fl!("layout-symbols"), "&123");
    }

    #[test]
    fn test_loader_has_fallback_language() {
        assert_eq!(LANGUAGE_LOADER.fallback_language().language.as_str(), "en");
    }
}
