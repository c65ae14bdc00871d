//! Share caption text.

use tracing::instrument;

/// Builds the caption summarising named participants.
///
/// Blank names are skipped. Names are joined with ", " and " and " before
/// the last one: `"Ada, Bob and Cy are in my #bingo"`. With no names the
/// caption announces the start of the game instead.
#[instrument(skip(names))]
pub fn share_caption<'a>(names: impl IntoIterator<Item = &'a str>, hashtag: &str) -> String {
    let names: Vec<&str> = names
        .into_iter()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .collect();

    match names.as_slice() {
        [] => format!("Just about to start my #{}!", hashtag),
        [only] => format!("{} is in my #{}", only, hashtag),
        [init @ .., last] => format!("{} and {} are in my #{}", init.join(", "), last, hashtag),
    }
}
