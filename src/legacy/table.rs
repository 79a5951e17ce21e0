//! Glyph table for the Bijoy (SutonnyMJ-family) legacy encoding.
//!
//! Keys are the characters a Bijoy-encoded PDF yields when its text layer is
//! read as Latin-1/CP-1252. Values are Unicode Bangla in *visual* order; the
//! converter fixes pre-base vowel signs and reph afterwards.

/// Stand-in for reph until it can be placed before its consonant cluster.
pub const REPH_MARK: char = '\u{E000}';

/// Source key length never exceeds this many characters.
pub const MAX_KEY_CHARS: usize = 3;

/// `(legacy sequence, unicode)` pairs. Multi-character keys take precedence
/// over their prefixes via longest match.
pub const GLYPHS: &[(&str, &str)] = &[
    // Three-character conjunct sequences
    ("š—¡", "ন্ত্ব"),
    ("”Q¡", "চ্ছ্ব"),
    // Two-character sequences
    ("Av", "আ"),
    ("iæ", "রু"),
    ("iƒ", "রূ"),
    ("i¨", "র\u{200D}্য"),
    ("š—", "ন্ত"),
    ("š‘", "ন্তু"),
    ("š’", "ন্থ"),
    ("š¿", "ন্ত্র"),
    ("š^", "ন্ব"),
    ("›U", "ন্ট"),
    ("›`", "ন্দ"),
    ("›Ø", "ন্দ্ব"),
    ("¯—", "স্ত"),
    ("¯’", "স্থ"),
    ("¯¿", "স্ত্র"),
    ("¯‹", "স্ক"),
    ("¯Œ", "স্ক্র"),
    ("¯œ", "স্ন"),
    ("¯ú", "স্প"),
    ("¯^", "স্ব"),
    ("¯§", "স্ম"),
    ("¯ø", "স্ল"),
    ("¤ú", "ম্প"),
    ("¤^", "ম্ব"),
    ("¤¢", "ম্ভ"),
    ("¤£", "ম্ভ্র"),
    ("¤§", "ম্ম"),
    ("¤ø", "ম্ল"),
    ("˜M", "দ্গ"),
    ("˜N", "দ্ঘ"),
    ("˜¡", "দ্ব"),
    ("™¢", "দ্ভ"),
    ("”P", "চ্চ"),
    ("”Q", "চ্ছ"),
    ("”T", "চ্ঞ"),
    ("Ë¡", "ত্ত্ব"),
    ("¾¡", "জ্জ্ব"),
    ("Mœ", "গ্ন"),
    ("M¥", "গ্ম"),
    ("Mø", "গ্ল"),
    ("K¡", "ক্ব"),
    ("K¬", "ক্ল"),
    ("R¡", "জ্ব"),
    ("U¡", "ট্ব"),
    ("U¥", "ট্ম"),
    ("Z¥", "ত্ম"),
    ("Z¡", "ত্ব"),
    ("_¡", "থ্ব"),
    ("aŸ", "ধ্ব"),
    ("a¥", "ধ্ম"),
    ("bœ", "ন্ন"),
    ("b¥", "ন্ম"),
    ("cœ", "প্ন"),
    ("cø", "প্ল"),
    ("d¬", "ফ্ল"),
    ("eŸ", "ব্ব"),
    ("eø", "ব্ল"),
    ("gœ", "ম্ন"),
    ("j¦", "ল্ব"),
    ("jø", "ল্ল"),
    ("kœ", "শ্ন"),
    ("kø", "শ্ল"),
    ("k¦", "শ্ব"),
    ("k¥", "শ্ম"),
    ("nè", "হ্ণ"),
    ("nŸ", "হ্ব"),
    ("n¬", "হ্ল"),
    // Independent vowels
    ("A", "অ"),
    ("B", "ই"),
    ("C", "ঈ"),
    ("D", "উ"),
    ("E", "ঊ"),
    ("F", "ঋ"),
    ("G", "এ"),
    ("H", "ঐ"),
    ("I", "ও"),
    ("J", "ঔ"),
    // Consonants
    ("K", "ক"),
    ("L", "খ"),
    ("M", "গ"),
    ("N", "ঘ"),
    ("O", "ঙ"),
    ("P", "চ"),
    ("Q", "ছ"),
    ("R", "জ"),
    ("S", "ঝ"),
    ("T", "ঞ"),
    ("U", "ট"),
    ("V", "ঠ"),
    ("W", "ড"),
    ("X", "ঢ"),
    ("Y", "ণ"),
    ("Z", "ত"),
    ("_", "থ"),
    ("`", "দ"),
    ("a", "ধ"),
    ("b", "ন"),
    ("c", "প"),
    ("d", "ফ"),
    ("e", "ব"),
    ("f", "ভ"),
    ("g", "ম"),
    ("h", "য"),
    ("i", "র"),
    ("j", "ল"),
    ("k", "শ"),
    ("l", "ষ"),
    ("m", "স"),
    ("n", "হ"),
    ("o", "\u{09DC}"),
    ("p", "\u{09DD}"),
    ("q", "\u{09DF}"),
    ("r", "ৎ"),
    ("s", "ং"),
    ("t", "ঃ"),
    ("u", "ঁ"),
    // Vowel signs
    ("v", "া"),
    ("w", "ি"),
    ("x", "ী"),
    ("y", "ু"),
    ("z", "ু"),
    ("æ", "ু"),
    ("~", "ূ"),
    ("ƒ", "ূ"),
    ("„", "ৃ"),
    ("…", "ৃ"),
    ("‡", "ে"),
    ("†", "ে"),
    ("‰", "ৈ"),
    ("ˆ", "ৈ"),
    ("Š", "ৗ"),
    // Digits and punctuation
    ("0", "০"),
    ("1", "১"),
    ("2", "২"),
    ("3", "৩"),
    ("4", "৪"),
    ("5", "৫"),
    ("6", "৬"),
    ("7", "৭"),
    ("8", "৮"),
    ("9", "৯"),
    ("|", "।"),
    ("&", "্\u{200C}"),
    ("Ò", "“"),
    ("Ó", "”"),
    ("Ô", "‘"),
    ("Õ", "’"),
    // Reph and subscript (phala) forms
    ("©", "\u{E000}"),
    ("¨", "্য"),
    ("ª", "্র"),
    ("«", "্র"),
    ("Ö", "্র"),
    ("Ÿ", "্ব"),
    ("¡", "্ব"),
    ("¦", "্ব"),
    ("^", "্ব"),
    ("œ", "্ন"),
    ("¥", "্ম"),
    ("§", "্ম"),
    ("ø", "্ল"),
    ("¬", "্ল"),
    ("—", "্ত"),
    ("‘", "্তু"),
    ("’", "্থ"),
    ("‹", "্ক"),
    ("Œ", "্ক্র"),
    ("¿", "্ত্র"),
    ("ú", "্প"),
    ("¢", "্ভ"),
    ("£", "্ভ্র"),
    // Half forms
    ("š", "ন্"),
    ("›", "ন্"),
    ("¯", "স্"),
    ("¤", "ম্"),
    ("˜", "দ্"),
    ("™", "দ্"),
    ("”", "চ্"),
    // Conjunct glyphs
    ("°", "ক্ক"),
    ("±", "ক্ট"),
    ("³", "ক্ত"),
    ("µ", "ক্র"),
    ("ÿ", "ক্ষ"),
    ("¶", "ক্স"),
    ("·", "গু"),
    ("¸", "গ্ধ"),
    ("¹", "ঙ্ক"),
    ("»", "ঙ্খ"),
    ("¼", "ঙ্গ"),
    ("½", "ঙ্ঘ"),
    ("¾", "জ্জ"),
    ("À", "জ্ঝ"),
    ("Á", "জ্ঞ"),
    ("Â", "ঞ্চ"),
    ("Ã", "ঞ্ছ"),
    ("Ä", "ঞ্জ"),
    ("Å", "ঞ্ঝ"),
    ("Æ", "ট্ট"),
    ("Ç", "ড্ড"),
    ("È", "ণ্ট"),
    ("É", "ণ্ঠ"),
    ("Ê", "ণ্ড"),
    ("Ë", "ত্ত"),
    ("Ì", "ত্থ"),
    ("Î", "ত্র"),
    ("Ï", "দ্দ"),
    ("×", "দ্ধ"),
    ("Ø", "দ্ব"),
    ("Ù", "দ্ম"),
    ("Ú", "ন্ঠ"),
    ("Û", "ন্ড"),
    ("Ü", "ন্ধ"),
    ("Ý", "ন্স"),
    ("Þ", "প্ট"),
    ("ß", "প্ত"),
    ("à", "প্প"),
    ("á", "প্স"),
    ("â", "ব্জ"),
    ("ã", "ব্দ"),
    ("ä", "ব্ধ"),
    ("å", "ভ্র"),
    ("ç", "ম্ফ"),
    ("é", "ল্ক"),
    ("ê", "ল্গ"),
    ("ë", "ল্প"),
    ("ì", "ল্ট"),
    ("í", "ল্ড"),
    ("î", "ল্ব"),
    ("ï", "শু"),
    ("ð", "শ্চ"),
    ("ñ", "শ্ছ"),
    ("ò", "ষ্ক"),
    ("ó", "ষ্ট"),
    ("ô", "ষ্ঠ"),
    ("õ", "ষ্প"),
    ("ö", "ষ্ফ"),
    ("÷", "ষ্ম"),
    ("ù", "স্ফ"),
    ("û", "হু"),
    ("ü", "হৃ"),
    ("ý", "হ্ন"),
    ("þ", "হ্ম"),
];
