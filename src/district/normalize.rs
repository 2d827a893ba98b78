//! District name to element id conversion.
//!
//! Two ids are derived from a display name:
//!
//! | Function       | `"Bahçelievler"` | `"Büyük Çekmece"` |
//! |----------------|------------------|-------------------|
//! | `normalize_id` | `bahcelievler`   | `buyukcekmece`    |
//! | `path_id`      | `pathBahçelievler` | `pathBüyükÇekmece` |

/// Prefix of every path id.
const PATH_ID_PREFIX: &str = "path";

/// Turkish letters and their closest ASCII equivalent.
const TURKISH_ASCII: &[(char, char)] = &[
    ('ı', 'i'),
    ('İ', 'I'),
    ('ş', 's'),
    ('Ş', 'S'),
    ('ğ', 'g'),
    ('Ğ', 'G'),
    ('ü', 'u'),
    ('Ü', 'U'),
    ('ö', 'o'),
    ('Ö', 'O'),
    ('ç', 'c'),
    ('Ç', 'C'),
];

#[inline]
fn to_ascii(c: char) -> char {
    TURKISH_ASCII
        .iter()
        .find(|(from, _)| *from == c)
        .map_or(c, |(_, to)| *to)
}

/// Convert a display name into a lowercase ASCII element id.
///
/// Turkish letters are folded to ASCII first, then everything that is not an
/// ASCII letter or digit is dropped.
///
/// # Examples
///
/// - `"Beşiktaş"` -> `"besiktas"`
/// - `"Ataşehir"` -> `"atasehir"`
/// - `"Eyüp Sultan"` -> `"eyupsultan"`
pub fn normalize_id(name: &str) -> String {
    name.chars()
        .map(to_ascii)
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Build the id of the first shape inside a district group.
///
/// Keeps the original letters, only whitespace is removed.
pub fn path_id(name: &str) -> String {
    let mut id = String::with_capacity(PATH_ID_PREFIX.len() + name.len());
    id.push_str(PATH_ID_PREFIX);
    id.extend(name.chars().filter(|c| !c.is_whitespace()));
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_turkish_letters() {
        assert_eq!(normalize_id("Beşiktaş"), "besiktas");
        assert_eq!(normalize_id("Şişli"), "sisli");
        assert_eq!(normalize_id("Üsküdar"), "uskudar");
        assert_eq!(normalize_id("Çatalca"), "catalca");
        assert_eq!(normalize_id("Göztepe"), "goztepe");
        assert_eq!(normalize_id("Ağrı"), "agri");
        assert_eq!(normalize_id("İstanbul"), "istanbul");
        assert_eq!(normalize_id("ĞÖÇ"), "goc");
    }

    #[test]
    fn test_normalize_drops_spaces_and_punctuation() {
        assert_eq!(normalize_id("Eyüp Sultan"), "eyupsultan");
        assert_eq!(normalize_id("Adalar (Prens)"), "adalarprens");
        assert_eq!(normalize_id("District-7"), "district7");
    }

    #[test]
    fn test_normalize_drops_unmapped_diacritics() {
        // Only the Turkish table is folded; other accents are dropped
        assert_eq!(normalize_id("Café"), "caf");
    }

    #[test]
    fn test_normalize_output_charset() {
        let names = ["Beşiktaş", "Sultan Gazi", "Büyükçekmece", "Arnavutköy", "Ş ı ğ ü ö ç"];
        for name in names {
            let id = normalize_id(name);
            assert!(
                id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
                "{name} -> {id}"
            );
        }
    }

    #[test]
    fn test_normalize_idempotent() {
        for name in ["Kadıköy", "Bahçelievler", "Eyüp Sultan", "abc123", ""] {
            let once = normalize_id(name);
            assert_eq!(normalize_id(&once), once);
        }
    }

    #[test]
    fn test_path_id_keeps_letters() {
        assert_eq!(path_id("Beşiktaş"), "pathBeşiktaş");
        assert_eq!(path_id("Eyüp Sultan"), "pathEyüpSultan");
        assert_eq!(path_id(" Büyük\tÇekmece "), "pathBüyükÇekmece");
    }
}
