//! Keyword-based category inference

use crate::model::Category;

/// Built-in taxonomy. Order matters: the first category with a matching
/// keyword wins.
pub const DEFAULT_CATEGORY_RULES: &[(Category, &[&str])] = &[
    (Category::Streaming, &[
        "netflix", "hulu", "disneyplus", "spotify", "twitch", "youtube",
        "primevideo", "hbomax", "crunchyroll", "deezer", "soundcloud", "vimeo",
    ]),
    (Category::Development, &[
        "github", "gitlab", "bitbucket", "stackoverflow", "npmjs", "docker",
        "vercel", "heroku", "netlify", "pypi", "crates.io", "jetbrains", "atlassian",
    ]),
    (Category::Marketplace, &[
        "amazon", "ebay", "etsy", "aliexpress", "walmart", "shopify",
        "mercadolibre", "craigslist", "bestbuy",
    ]),
    (Category::PaymentProcessor, &[
        "paypal", "stripe", "venmo", "wise.com", "squareup", "klarna",
        "revolut", "coinbase", "cash.app",
    ]),
    (Category::Social, &[
        "facebook", "twitter", "instagram", "linkedin", "reddit", "tiktok",
        "snapchat", "pinterest", "discord", "mastodon", "tumblr",
    ]),
    (Category::Email, &[
        "gmail", "outlook", "protonmail", "proton.me", "yahoo", "hotmail",
        "icloud", "fastmail", "zoho",
    ]),
    (Category::Gaming, &[
        "steampowered", "epicgames", "playstation", "xbox", "nintendo",
        "battle.net", "riotgames",
    ]),
    (Category::CloudStorage, &["dropbox", "onedrive", "box.com", "mega.nz", "pcloud"]),
];

/// Ordered, immutable list of (category, keywords) rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    rules: Vec<(Category, Vec<String>)>,
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::from_rules(DEFAULT_CATEGORY_RULES)
    }
}

impl CategoryTable {
    /// Build a table from static rules, keeping their order
    pub fn from_rules(rules: &[(Category, &[&str])]) -> Self {
        Self {
            rules: rules
                .iter()
                .map(|(category, keywords)| {
                    (*category, keywords.iter().map(|k| k.to_lowercase()).collect())
                })
                .collect(),
        }
    }

    /// Build a table from owned rules, keeping their order
    pub fn new(rules: Vec<(Category, Vec<String>)>) -> Self {
        Self {
            rules: rules
                .into_iter()
                .map(|(category, keywords)| {
                    (category, keywords.into_iter().map(|k| k.to_lowercase()).collect())
                })
                .collect(),
        }
    }

    /// Rules in priority order
    pub fn rules(&self) -> &[(Category, Vec<String>)] {
        &self.rules
    }

    /// Return the first category whose keywords occur in `text`, or `Other`
    pub fn categorize(&self, text: &str) -> Category {
        let text = text.to_lowercase();
        self.rules
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k.as_str())))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Other)
    }
}
