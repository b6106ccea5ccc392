//! Built-in category rules for local (offline) categorization
//!
//! Rules are evaluated in table order and the first match wins, so a URL
//! that satisfies several categories lands in the earliest one. Patterns are
//! lowercase substrings; specific domains and generic keywords may be mixed
//! within one rule.

/// Name of the synthetic bucket for tabs no rule matches
pub const OTHER_CATEGORY: &str = "other";

/// One entry of the rule table
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRule {
    pub name: &'static str,
    pub patterns: &'static [&'static str],
}

impl CategoryRule {
    /// True if any pattern is a substring of the (already lowercased) URL
    pub fn matches(&self, lowercase_url: &str) -> bool {
        self.patterns.iter().any(|p| lowercase_url.contains(p))
    }
}

pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        name: "finance",
        patterns: &[
            "coinbase.com", "binance.com", "robinhood.com", "tradingview.com", "opensea.io",
            "etherscan.io", "bankofamerica", "chase.com", "paypal.com", "venmo.com",
            "fidelity.com", "schwab.com", "vanguard.com", "mint.com", "creditkarma",
            "wellsfargo", "capitalone", "sofi.com", "webull.com", "kraken.com", "crypto.com",
            "metamask.io", "uniswap", "dextools", "dexscreener.com", "birdeye.so",
            "defined.fi", "dex.guru", "gecko.terminal", "coingecko.com", "coinmarketcap.com",
            "blockchain.com", "phantom.app", "jupiter.ag", "raydium.io", "solscan.io",
            "debank.com", "zapper.fi", "aave.com", "lido.fi", "wealthfront", "betterment",
            "plaid.com", "stripe.com", "wise.com", "revolut.com", "finance.yahoo.com",
            "yahoo.com/finance", "money.cnn", "investor.", "morningstar.com",
            "seekingalpha.com", "fool.com", "finviz.com", "stocktwits.com", "tipranks.com",
            "benzinga.com", "zacks.com", "crypto", "swap", "defi", "token", "wallet",
            "finance", "banking", "invest", "trading", "stock", "forex", "etf",
        ],
    },
    CategoryRule {
        name: "social",
        patterns: &[
            "twitter.com", "x.com", "facebook.com", "instagram.com", "linkedin.com",
            "reddit.com", "tiktok.com", "threads.net", "mastodon", "bsky.app", "discord.com",
            "snapchat.com",
        ],
    },
    CategoryRule {
        name: "video",
        patterns: &[
            "youtube.com", "netflix.com", "twitch.tv", "vimeo.com", "hulu.com",
            "disneyplus.com", "hbomax.com", "primevideo.com", "peacock", "crunchyroll",
        ],
    },
    CategoryRule {
        name: "shopping",
        patterns: &[
            "amazon.com", "ebay.com", "etsy.com", "walmart.com", "target.com", "bestbuy.com",
            "shopify.com", "shop.", "nike.com", "adidas.com", "zara.com", "grailed.com",
            "stockx.com",
        ],
    },
    CategoryRule {
        name: "dev",
        patterns: &[
            "github.com", "gitlab.com", "stackoverflow.com", "npmjs.com", "codepen.io",
            "vercel.com", "netlify.com", "localhost", "developer.", "docs.", "replit.com",
            "codesandbox",
        ],
    },
    CategoryRule {
        name: "email",
        patterns: &["mail.google", "outlook.", "mail.yahoo", "protonmail", "fastmail"],
    },
    CategoryRule {
        name: "docs",
        patterns: &[
            "docs.google", "notion.so", "drive.google", "sheets.google", "slides.google",
            "dropbox.com", "airtable.com", "figma.com", "canva.com", "miro.com",
        ],
    },
    CategoryRule {
        name: "news",
        patterns: &[
            "cnn.com", "bbc.com", "nytimes.com", "reuters.com", "techcrunch.com",
            "theverge.com", "arstechnica.com", "news.ycombinator", "bloomberg.com", "cnbc.com",
            "wsj.com", "ft.com", "marketwatch",
        ],
    },
    CategoryRule {
        name: "music",
        patterns: &[
            "spotify.com", "soundcloud.com", "music.apple", "music.youtube", "bandcamp.com",
            "tidal.com",
        ],
    },
    CategoryRule {
        name: "ai",
        patterns: &[
            "chat.openai", "claude.ai", "bard.google", "midjourney", "perplexity.ai",
            "huggingface.co", "anthropic.com", "poe.com", "character.ai",
        ],
    },
    CategoryRule {
        name: "travel",
        patterns: &[
            "airbnb.com", "booking.com", "expedia.com", "kayak.com", "google.com/travel",
            "hotels.com", "tripadvisor", "skyscanner", "united.com", "delta.com",
            "southwest.com",
        ],
    },
    CategoryRule {
        name: "food",
        patterns: &[
            "doordash.com", "ubereats.com", "grubhub.com", "seamless.com", "yelp.com",
            "opentable.com", "resy.com", "caviar.com",
        ],
    },
];

/// Find the first rule in `rules` matching the URL (case-insensitive)
pub fn first_match<'a>(rules: &'a [CategoryRule], url: &str) -> Option<&'a CategoryRule> {
    let lowercase_url = url.to_lowercase();
    rules.iter().find(|rule| rule.matches(&lowercase_url))
}

/// Find the first built-in rule matching the URL
pub fn match_rule(url: &str) -> Option<&'static CategoryRule> {
    first_match(CATEGORY_RULES, url)
}
