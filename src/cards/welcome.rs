//! Factory presets for the welcome and leave variants of the base card.

use super::{base_card::BaseCardBuilder, BackgroundColor, TextCard};

/// Base card pre-filled with the welcome-banner defaults. Chain setters on
/// the returned builder to override any of them.
pub fn welcome_card(avatar_img_url: impl Into<String>, nickname_text: TextCard) -> BaseCardBuilder {
    BaseCardBuilder::new()
        .main_text(TextCard::new("WELCOME"))
        .nickname_text(nickname_text)
        .avatar_img_url(avatar_img_url)
        .avatar_border_color("#0CA7FF")
        .color_text_default("#0CA7FF")
        .background_color(BackgroundColor::new("#FFFFFF", "#0CA7FF"))
}

/// Base card pre-filled with the leave-banner defaults.
pub fn leave_card(avatar_img_url: impl Into<String>, nickname_text: TextCard) -> BaseCardBuilder {
    BaseCardBuilder::new()
        .main_text(TextCard::new("LEAVE"))
        .nickname_text(nickname_text)
        .avatar_img_url(avatar_img_url)
        .avatar_border_color("#F44336")
        .color_text_default("#F44336")
        .background_color(BackgroundColor::new("#FFFFFF", "#F44336"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_differ_by_accent() {
        let welcome = welcome_card("http://cdn.example/a.png", TextCard::new("user"));
        let leave = leave_card("http://cdn.example/a.png", TextCard::new("user"));

        assert_eq!(welcome.main_text.as_ref().unwrap().content, "WELCOME");
        assert_eq!(leave.main_text.as_ref().unwrap().content, "LEAVE");
        assert_eq!(welcome.avatar_border_color, "#0CA7FF");
        assert_eq!(leave.avatar_border_color, "#F44336");
        assert_eq!(leave.background_color.accent.as_deref(), Some("#F44336"));
    }

    #[test]
    fn presets_stay_overridable() {
        let card = welcome_card("http://cdn.example/a.png", TextCard::new("user"))
            .main_text(TextCard::new("HELLO"))
            .avatar_border_color("#000000");
        assert_eq!(card.main_text.as_ref().unwrap().content, "HELLO");
        assert_eq!(card.avatar_border_color, "#000000");
    }
}
