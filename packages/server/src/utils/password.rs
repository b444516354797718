use rand::seq::IndexedRandom;
use rand::Rng;

/// Word list for generated passphrases. Short, common words keep the
/// result easy to read back to a user over the shoulder.
const WORDS: &[&str] = &[
    "acorn", "amber", "anvil", "badge", "bramble", "brass", "candle", "canyon",
    "cedar", "cinder", "clover", "comet", "copper", "coral", "crystal", "dagger",
    "drift", "ember", "fable", "falcon", "fern", "flint", "gale", "glade",
    "goblet", "granite", "grove", "harbor", "hazel", "helm", "hollow", "ivory",
    "juniper", "keep", "lantern", "lark", "lotus", "maple", "meadow", "mirth",
    "moss", "nectar", "oak", "onyx", "opal", "parchment", "pebble", "pine",
    "quill", "raven", "reed", "rune", "saffron", "sage", "slate", "spruce",
    "summit", "thistle", "timber", "torch", "trellis", "walnut", "willow", "wren",
];

/// Generate a human-readable passphrase for a newly bootstrapped user.
///
/// Four capitalized words plus a two-digit suffix, e.g.
/// `Cedar Lantern Thistle Wren 47`. Returned to the caller exactly once
/// and never persisted.
pub fn generate() -> String {
    let mut rng = rand::rng();
    let mut words: Vec<String> = (0..4)
        .map(|_| {
            let word = WORDS.choose(&mut rng).copied().unwrap_or("lantern");
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();
    words.push(format!("{:02}", rng.random_range(0..100u8)));
    words.join(" ")
}
