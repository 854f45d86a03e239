use rand::Rng;

pub(crate) const VOCABULARY: [&str; 20] = [
    "Serendipity",
    "Euphoria",
    "Mellifluous",
    "Nebulous",
    "Quintessential",
    "Ethereal",
    "Resplendent",
    "Epiphany",
    "Eloquence",
    "Opulent",
    "Serene",
    "Magnanimous",
    "Eloquent",
    "Repertoire",
    "Exquisite",
    "Pristine",
    "Enigma",
    "Penumbra",
    "Scintillating",
    "Melancholy",
];

/// Uniform pick over the vocabulary minus its final entry. The range has
/// always stopped one short; kept as-is until someone decides "Melancholy"
/// belongs in the cloud.
pub(crate) fn random_word<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    VOCABULARY[rng.gen_range(0..VOCABULARY.len() - 1)]
}
