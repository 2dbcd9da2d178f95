// Export line keys carrying slash-separated sub-records
pub const UPGRADE_CURRENCIES_KEY: &str = "upgrade_currencies";
pub const SLOT_WATERMARKS_KEY: &str = "slot_high_watermarks";
pub const UPGRADE_ACHIEVEMENTS_KEY: &str = "upgrade_achievements";
pub const CATALYST_CURRENCIES_KEY: &str = "catalyst_currencies";

// Keys on equipped-item lines
pub const ITEM_ID_KEY: &str = "id";
pub const ENCHANT_ID_KEY: &str = "enchant_id";
pub const GEM_ID_KEY: &str = "gem_id";
pub const BONUS_ID_KEY: &str = "bonus_id";
pub const ILEVEL_KEY: &str = "ilevel";

// Any of these on an item line marks it as crafted
pub const CRAFTED_MARKERS: [&str; 2] = ["crafted_stats=", "crafting_quality="];

// Character class keys; the value is the quoted character name
pub const CLASS_KEYS: [&str; 13] = [
    "warrior",
    "paladin",
    "hunter",
    "rogue",
    "priest",
    "deathknight",
    "shaman",
    "mage",
    "warlock",
    "monk",
    "druid",
    "demonhunter",
    "evoker",
];

// Share links
pub const SHARE_FRAGMENT_MARKER: &str = "#d=";
pub const SHARE_QUERY_KEY: &str = "d=";
pub const MAX_SHARE_DECODED_BYTES: u64 = 1024 * 1024; // 1 MiB

// User config
pub const CONFIG_DIR_NAME: &str = ".crestplan";
pub const OPTIONS_FILE: &str = "options.json";
