//! Keyword-based cuisine classification.
//!
//! Rules are checked in a fixed order and the first rule with any keyword
//! present as a whole word wins. Chinese is last: its keywords (`chicken`,
//! `noodle`, `soup`) are broad enough to shadow everything else.
//!
//! Word boundaries are ASCII-only, so a keyword next to a non-ASCII
//! character counts as bounded on that side.

use std::sync::LazyLock;

use regex::bytes::Regex;

use hawkersg_core::Cuisine;

const DESSERT: &[&str] = &[
    "dessert", "ice cream", "chendol", "tau huey", "tau huay", "beancurd", "bean curd",
    "bobo chacha", "pulut hitam", "pudding", "cake", "brownie", "ice kachang", "ice kacang",
    "cheng tng", "mango sago", "bingsu", "snow ice", "orh nee", "yam paste", "sweet soup",
    "ah chew", "tau suan", "almond jelly", "milo dinosaur", "red bean", "green bean",
    "grass jelly", "lucky dessert", "desserts", "mango pomelo", "muah chee", "putu piring",
    "apom", "waffle", "waffles", "egg tart", "egg tarts", "tang yuan", "glutinous rice ball",
    "fresh coconut", "fresh milk", "egg", "eggs", "durian", "fruit", "fruits", "department",
    "cold", "caf", "pancake", "pancakes", "pastry", "pastries", "muffin", "bread", "bake",
    "bakery",
];

const BEVERAGE: &[&str] = &[
    "kopi", "teh", "coffee", "tea", "barley", "bubble tea", "boba", "milk tea", "juice",
    "smoothie", "bandung", "cafe", "coffeeshop", "milo", "horlicks", "yuan yang", "soda",
    "drink", "drinks", "iced lemon", "lime juice", "fruit juice", "sugarcane", "sugar cane",
    "ice lemon tea", "soya bean", "soy milk", "sarsi", "grass jelly drink", "chrysanthemum",
    "luohan", "luo han", "roselle", "cane juice", "soft drink", "canned drink",
    "fresh coconut", "fresh milk", "avocado juice", "beverages", "bubble cup",
    "vietnam coffee", "cold", "101", "soya", "soy",
];

const FUSION: &[&str] = &[
    "fusion", "mix", "mixed", "international", "modern asian", "modern", "western-asian",
    "east meets west", "eating", "house", "asian fusion", "european-asian", "western fusion",
    "global", "contemporary", "twist", "cross", "cross-cuisine", "cooked", "cross culture",
    "multi-cuisine", "creative", "mod-sin", "mod sin", "modsin", "modern singapore", "mod sg",
    "modsg", "bbq", "munchi", "lei cha",
];

const JAPANESE: &[&str] = &[
    "japanese", "ramen", "sushi", "udon", "donburi", "katsu", "yakitori", "gyudon", "tempura",
    "bento", "mentaiko", "teriyaki", "tonkatsu", "unagi", "sashimi", "miso", "takoyaki",
    "okonomiyaki", "onigiri", "matcha", "matchaya", "japan", "ocha", "omakase", "shabu",
    "shabu shabu", "yakisoba", "karage", "karaage", "chawanmushi", "tamago", "chirashi",
    "jap food", "jap",
];

const KOREAN: &[&str] = &[
    "korean", "kimchi", "bibimbap", "tteokbokki", "army stew", "budae jjigae", "budae",
    "korea", "jajangmyeon", "jjajangmyeon", "bulgogi", "samgyeopsal", "soondubu",
    "soondubu jjigae", "kim bap", "kimbap", "dakgalbi", "jjigae", "seoul", "hotpot", "kbbq",
];

const THAI: &[&str] = &[
    "thai", "thailand", "tom yum", "tom yam", "pad thai", "mookata", "moo kata", "som tam",
    "green curry", "red curry", "basil chicken", "thai milk tea", "mango sticky rice",
    "boat noodles", "thai fried rice", "pineapple rice", "thai iced tea", "thai food",
    "thai cuisine", "yum woon sen", "phad thai", "thai bbq", "moo ping", "thai express",
];

const VIETNAMESE: &[&str] = &[
    "vietnamese", "vietnam", "pho", "banh mi", "bun cha", "goi cuon", "spring roll",
    "bun bo hue", "banh xeo", "ca phe", "vietnam food", "vietnam cuisine", "bun thit nuong",
    "broken rice", "com tam", "vietnam rolls", "vietnam coffee",
];

const INDONESIAN: &[&str] = &[
    "indonesian", "indonesia", "indo", "nasi padang", "ayam penyet", "ayam bakar", "bakso",
    "gado gado", "nasi goreng", "soto ayam", "rendang", "pecel lele", "tempeh", "empal",
    "sambal", "indon", "nasi uduk", "bali", "batagor", "martabak",
];

const INDIAN: &[&str] = &[
    "indian", "india", "prata", "roti prata", "biryani", "briyani", "masala", "naan",
    "thosai", "dosa", "murtabak", "tandoori", "jaya", "butter chicken", "curry", "chapati",
    "puri", "maggi goreng", "fish head curry", "paneer", "dal", "samosa", "idli", "rasam",
    "sri", "curries", "vindaloo", "palak", "aloo", "indian food", "indian cuisine",
    "north indian", "south indian", "chettinad", "mutton", "mustafa", "tiffin", "rahaman",
];

const MALAY: &[&str] = &[
    "malay", "malaysia", "malaysian", "nasi lemak", "mee soto", "mee rebus", "mee siam",
    "lontong", "rendang", "satay", "muslim", "halal", "roti john", "ayam goreng", "sambal",
    "otah", "lemak", "soto", "ketupat", "nasi padang", "nasi ayam", "nasi campur", "haji",
    "sarabat", "bismibriyani", "goreng", "suka", "sup tulang", "rojak", "laksa johor",
    "cendol", "lemper", "kuih", "kueh", "kuih muih", "briyani", "mee robus", "mee goreng",
    "nasi", "kak", "hajjah", "al", "abdullah", "hamid", "rahman",
];

const WESTERN: &[&str] = &[
    "western", "west", "steak", "burger", "pasta", "pizza", "grill", "fish and chips",
    "fish & chips", "roast", "carbonara", "spaghetti", "macaroni", "cheese", "lasagna", "chop",
    "chicken chop", "lamb chop", "french fries", "fries", "salad", "sandwich", "wrap",
    "hotdog", "hot dog", "steakhouse", "western food", "western cuisine", "bbq ribs",
    "schnitzel", "bbq", "wings", "wing", "lok",
];

const MEDITERRANEAN: &[&str] = &[
    "mediterranean", "greek", "turkish", "lebanese", "middle eastern", "hummus", "falafel",
    "shawarma", "kebab", "pita", "tabbouleh", "tzatziki", "baba ghanoush", "olive", "feta",
    "gyro", "mezze", "prawn", "couscous", "grilled", "lamb", "shakshuka", "dolma", "baklava",
    "moroccan", "israeli", "arabic", "levantine", "seafood", "kitchenette", "sea", "lobster",
    "crab", "fish", "oyster",
];

const VEGETARIAN: &[&str] = &[
    "vegetarian", "vegan", "meatless", "plant-based", "plant based", "vege", "veg",
    "vegetable", "mock meat", "素", "素食", "vegetarian food", "vegetarian cuisine",
    "vegetarian bee hoon", "veg rice", "veg stall", "vegetarian stall", "vegetables",
];

const CHINESE: &[&str] = &[
    "chinese", "zhong", "china", "dim sum", "dimsum", "hainanese", "teochew", "hokkien",
    "cantonese", "sichuan", "szechuan", "bak kut teh", "chicken rice", "duck rice", "wanton",
    "wanton mee", "char siew", "charsiew", "fish soup", "cai fan", "cai png", "duck",
    "chicken", "tze char", "zi char", "zichar", "noodle", "noodles", "mee", "kway",
    "kway teow", "bee hoon", "hor fun", "ban mian", "lor mee", "xin", "long", "congee",
    "porridge", "yong tau foo", "ytf", "minced pork", "bak chor mee", "carrot cake",
    "chai tow kway", "popiah", "spring roll", "chee cheong fun", "siew mai", "pau", "bao",
    "roast pork", "roast duck", "claypot", "soup", "stir fry", "canton", "white bee hoon",
    "laksa", "sambal", "fried rice", "fried bee hoon", "shanghai", "xiao long bao", "mantou",
    "mapo", "ma po", "chow mein", "lo mein", "egg fried rice", "salted egg", "salted fish",
    "herbal", "herbal soup", "mala", "xiang", "tofu", "zham", "tan", "yong", "jie", "xing",
    "kai", "le", "rice",
];

/// Rule table in evaluation order.
pub const CUISINE_RULES: &[(Cuisine, &[&str])] = &[
    (Cuisine::Dessert, DESSERT),
    (Cuisine::Beverage, BEVERAGE),
    (Cuisine::Fusion, FUSION),
    (Cuisine::Japanese, JAPANESE),
    (Cuisine::Korean, KOREAN),
    (Cuisine::Thai, THAI),
    (Cuisine::Vietnamese, VIETNAMESE),
    (Cuisine::Indonesian, INDONESIAN),
    (Cuisine::Indian, INDIAN),
    (Cuisine::Malay, MALAY),
    (Cuisine::Western, WESTERN),
    (Cuisine::Mediterranean, MEDITERRANEAN),
    (Cuisine::Vegetarian, VEGETARIAN),
    (Cuisine::Chinese, CHINESE),
];

static RULE_PATTERNS: LazyLock<Vec<(Cuisine, Regex)>> = LazyLock::new(|| {
    CUISINE_RULES
        .iter()
        .map(|(cuisine, keywords)| (*cuisine, keyword_pattern(keywords)))
        .collect()
});

/// One alternation per rule, each keyword bounded by ASCII word boundaries.
fn keyword_pattern(keywords: &[&str]) -> Regex {
    let alternation = keywords
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?-u:\b)(?:{alternation})(?-u:\b)")).expect("valid cuisine regex")
}

/// Classifies a stall from its name, description and establishment address.
/// Missing fields count as empty.
#[must_use]
pub fn classify_stall(
    stall_name: Option<&str>,
    description: Option<&str>,
    establishment_address: Option<&str>,
) -> Cuisine {
    let text = format!(
        "{} {} {}",
        stall_name.unwrap_or_default(),
        description.unwrap_or_default(),
        establishment_address.unwrap_or_default()
    );
    classify_text(&text)
}

/// Classifies free text. Returns [`Cuisine::Others`] when no rule matches.
#[must_use]
pub fn classify_text(text: &str) -> Cuisine {
    let blob = text.to_lowercase();
    RULE_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(blob.as_bytes()))
        .map_or(Cuisine::Others, |(cuisine, _)| *cuisine)
}
