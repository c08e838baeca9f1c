// SPDX-License-Identifier: GPL-3.0-only

//! Fieldboard demo application.
//!
//! Opens a sign-up form whose fields are edited through the on-screen
//! keyboard. Set `FIELDBOARD_CONFIG` to a JSON file to change the keyboard
//! configuration.

use fieldboard::{app, app_settings, i18n};

fn main() -> cosmic::iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fieldboard=info")),
        )
        .init();

    // Get the system's preferred languages.
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();
    i18n::init(&requested_languages);

    let settings = cosmic::app::Settings::default().size(cosmic::iced::Size::new(
        app_settings::DEMO_WIDTH,
        app_settings::DEMO_HEIGHT,
    ));

    cosmic::app::run::<app::AppModel>(settings, ())
}
