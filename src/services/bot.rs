//! Crawler detection for preview rendering
//!
//! A fixed keyword list, matched case-insensitively against the
//! User-Agent header. Deliberately simple: the goal is to hand social
//! crawlers a static preview page, not to classify traffic.

const BOT_SIGNATURES: &[&str] = &[
    "bot",
    "crawler",
    "spider",
    "crawl",
    "facebookexternalhit",
    "facebot",
    "twitterbot",
    "discordbot",
    "telegrambot",
    "whatsapp",
    "slackbot",
    "linkedinbot",
    "pinterest",
    "embedly",
    "quora link preview",
    "skypeuripreview",
    "vkshare",
    "redditbot",
    "applebot",
    "googlebot",
    "bingbot",
    "yandex",
    "baiduspider",
    "duckduckbot",
    "mastodon",
];

pub fn is_bot(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    BOT_SIGNATURES.iter().any(|sig| ua.contains(sig))
}
