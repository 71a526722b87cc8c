use std::sync::LazyLock;

use regex::Regex;

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)|\[.*?\]").expect("valid bracket pattern"));

static NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"official video|lyrics|audio|remastered|remaster|feat\.|ft\.|video|clip")
        .expect("valid noise pattern")
});

/// Anything outside ASCII word characters, whitespace and U+00C0..=U+017F
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^0-9A-Za-z_\s\x{00C0}-\x{017F}]").expect("valid character pattern")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Canonical form of a track name, artist or video title used for comparisons and cache keys.
///
/// Lowercases, drops bracketed parts and noise words such as "official video" or "feat.",
/// removes punctuation while keeping accented Latin letters, and collapses whitespace.
/// The steps are repeated until the output is stable, so normalizing twice never changes
/// the result.
pub fn normalize(s: &str) -> String {
    let mut current = normalize_once(s);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_once(s: &str) -> String {
    let lowered = s.to_lowercase();
    let unbracketed = BRACKETED.replace_all(&lowered, "");
    let denoised = NOISE.replace_all(&unbracketed, "");
    let cleaned = DISALLOWED.replace_all(&denoised, "");
    WHITESPACE.replace_all(&cleaned, " ").trim().to_owned()
}

/// Cache key of a track
pub fn signature(name: &str, artist: &str) -> String {
    normalize(&format!("{name} {artist}"))
}
