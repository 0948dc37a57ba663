//! Emoji shortcode lookup.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Turns `:shortcode:` text into glyphs.
pub trait EmojiResolver {
    /// Replaces known shortcodes in `text`; unknown ones are left as is.
    fn emojize(&self, text: &str) -> String;
}

/// Built-in table covering the common gitmoji and conventional-commit codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortcodeTable;

const SHORTCODES: &[(&str, &str)] = &[
    ("sparkles", "✨"),
    ("bug", "🐛"),
    ("memo", "📝"),
    ("gem", "💎"),
    ("recycle", "♻️"),
    ("zap", "⚡"),
    ("test_tube", "🧪"),
    ("package", "📦"),
    ("hammer", "🔨"),
    ("rewind", "⏪"),
    ("art", "🎨"),
    ("fire", "🔥"),
    ("ambulance", "🚑"),
    ("rocket", "🚀"),
    ("lipstick", "💄"),
    ("tada", "🎉"),
    ("white_check_mark", "✅"),
    ("lock", "🔒"),
    ("bookmark", "🔖"),
    ("rotating_light", "🚨"),
    ("construction", "🚧"),
    ("green_heart", "💚"),
    ("arrow_down", "⬇️"),
    ("arrow_up", "⬆️"),
    ("pushpin", "📌"),
    ("construction_worker", "👷"),
    ("chart_with_upwards_trend", "📈"),
    ("heavy_plus_sign", "➕"),
    ("heavy_minus_sign", "➖"),
    ("wrench", "🔧"),
    ("globe_with_meridians", "🌐"),
    ("pencil2", "✏️"),
    ("poop", "💩"),
    ("truck", "🚚"),
    ("page_facing_up", "📄"),
    ("boom", "💥"),
    ("bento", "🍱"),
    ("wheelchair", "♿"),
    ("bulb", "💡"),
    ("beers", "🍻"),
    ("speech_balloon", "💬"),
    ("card_file_box", "🗃️"),
    ("loud_sound", "🔊"),
    ("mute", "🔇"),
    ("busts_in_silhouette", "👥"),
    ("children_crossing", "🚸"),
    ("building_construction", "🏗️"),
    ("iphone", "📱"),
    ("clown_face", "🤡"),
    ("egg", "🥚"),
    ("see_no_evil", "🙈"),
    ("camera_flash", "📸"),
    ("alembic", "⚗️"),
    ("mag", "🔍"),
    ("label", "🏷️"),
    ("seedling", "🌱"),
    ("triangular_flag_on_post", "🚩"),
    ("goal_net", "🥅"),
    ("dizzy", "💫"),
    ("wastebasket", "🗑️"),
    ("passport_control", "🛂"),
    ("adhesive_bandage", "🩹"),
    ("monocle_face", "🧐"),
    ("coffin", "⚰️"),
    ("necktie", "👔"),
    ("stethoscope", "🩺"),
    ("bricks", "🧱"),
    ("technologist", "🧑‍💻"),
    ("money_with_wings", "💸"),
    ("thread", "🧵"),
    ("safety_vest", "🦺"),
    ("pencil", "📝"),
    ("book", "📖"),
    ("books", "📚"),
    ("lock_with_ink_pen", "🔏"),
    ("twisted_rightwards_arrows", "🔀"),
    ("arrow_right", "➡️"),
    ("heavy_check_mark", "✔️"),
    ("x", "❌"),
    ("warning", "⚠️"),
    ("star", "⭐"),
    ("heart", "❤️"),
    ("+1", "👍"),
    ("-1", "👎"),
    ("smile", "😄"),
];

static TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| SHORTCODES.iter().copied().collect());

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static SHORTCODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([a-z0-9_+\-]+):").unwrap());

impl ShortcodeTable {
    /// Glyph for a bare shortcode name (without colons).
    pub fn lookup(&self, name: &str) -> Option<&'static str> {
        TABLE.get(name).copied()
    }
}

impl EmojiResolver for ShortcodeTable {
    fn emojize(&self, text: &str) -> String {
        SHORTCODE_PATTERN
            .replace_all(text, |caps: &Captures| {
                self.lookup(&caps[1])
                    .map_or_else(|| caps[0].to_string(), str::to_string)
            })
            .into_owned()
    }
}
