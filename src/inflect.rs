//! English inflection helpers for deriving model names from attribute names.
//!
//! Relationship declarations name an attribute (`headshot`, `lawyers`) and the
//! related model is derived from it (`Headshot`, `Lawyer`). Nested addresses go
//! the other way, from a model name to a path segment (`Lawyer` -> `lawyer_id`,
//! `lawyers`). The rule tables cover the regular English forms plus the usual
//! irregular and uncountable words; anything else can be set explicitly with a
//! `class_name` option or a collection name override.

use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered `(pattern, replacement)` rules. The last matching rule wins.
type Rules = Vec<(Regex, &'static str)>;

fn rules(table: &[(&str, &'static str)]) -> Rules {
    table
        .iter()
        .map(|(pattern, replacement)| {
            let regex = Regex::new(&format!("(?i){}", pattern))
                .unwrap_or_else(|e| panic!("invalid inflection rule {:?}: {}", pattern, e));
            (regex, *replacement)
        })
        .collect()
}

static PLURALS: Lazy<Rules> = Lazy::new(|| {
    rules(&[
        ("$", "s"),
        ("s$", "s"),
        ("^(ax|test)is$", "${1}es"),
        ("(octop|vir)us$", "${1}i"),
        ("(alias|status)$", "${1}es"),
        ("(bu)s$", "${1}ses"),
        ("(buffal|tomat)o$", "${1}oes"),
        ("([ti])um$", "${1}a"),
        ("sis$", "ses"),
        ("(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
        ("(hive)$", "${1}s"),
        ("([^aeiouy]|qu)y$", "${1}ies"),
        ("(x|ch|ss|sh)$", "${1}es"),
        ("(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
        ("^(m|l)ouse$", "${1}ice"),
        ("^(ox)$", "${1}en"),
        ("(quiz)$", "${1}zes"),
    ])
});

static SINGULARS: Lazy<Rules> = Lazy::new(|| {
    rules(&[
        ("s$", ""),
        ("(ss)$", "${1}"),
        ("([ti])a$", "${1}um"),
        ("((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$", "${1}sis"),
        ("(^analy)(sis|ses)$", "${1}sis"),
        ("([^f])ves$", "${1}fe"),
        ("(hive)s$", "${1}"),
        ("(tive)s$", "${1}"),
        ("([lr])ves$", "${1}f"),
        ("([^aeiouy]|qu)ies$", "${1}y"),
        ("(s)eries$", "${1}eries"),
        ("(m)ovies$", "${1}ovie"),
        ("(x|ch|ss|sh)es$", "${1}"),
        ("^(m|l)ice$", "${1}ouse"),
        ("(bus)(es)?$", "${1}"),
        ("(o)es$", "${1}"),
        ("(shoe)s$", "${1}"),
        ("(cris|test)(is|es)$", "${1}is"),
        ("^(a)x[ie]s$", "${1}xis"),
        ("(octop|vir)(us|i)$", "${1}us"),
        ("(alias|status)(es)?$", "${1}"),
        ("^(ox)en", "${1}"),
        ("(vert|ind)ices$", "${1}ex"),
        ("(matr)ices$", "${1}ix"),
        ("(quiz)zes$", "${1}"),
        ("(database)s$", "${1}"),
    ])
});

/// `(singular, plural)` pairs that no rule produces
const IRREGULARS: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("zombie", "zombies"),
];

const UNCOUNTABLES: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
    "news",
];

static ACRONYM_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z\d]+)([A-Z][a-z])").expect("static regex"));
static WORD_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("static regex"));

/// Plural form of an underscored word (`lawyer` -> `lawyers`)
pub fn pluralize(word: &str) -> String {
    inflect(word, &PLURALS, |(singular, plural)| (singular, plural))
}

/// Singular form of an underscored word (`addresses` -> `address`)
pub fn singularize(word: &str) -> String {
    inflect(word, &SINGULARS, |(singular, plural)| (plural, singular))
}

/// Applies to the last `_` separated segment only, so `law_firms` keeps its prefix.
fn inflect(
    word: &str,
    rules: &Rules,
    direction: impl Fn((&'static str, &'static str)) -> (&'static str, &'static str),
) -> String {
    if word.is_empty() {
        return String::new();
    }
    let (head, last) = match word.rfind('_') {
        Some(idx) => word.split_at(idx + 1),
        None => ("", word),
    };
    let lower = last.to_lowercase();
    if UNCOUNTABLES.contains(&lower.as_str()) {
        return word.to_string();
    }
    for pair in IRREGULARS {
        let (from, to) = direction(*pair);
        if lower == from {
            return format!("{}{}", head, match_case(last, to));
        }
    }
    for (pattern, replacement) in rules.iter().rev() {
        if pattern.is_match(last) {
            return format!("{}{}", head, pattern.replace(last, *replacement));
        }
    }
    word.to_string()
}

fn match_case(original: &str, replacement: &str) -> String {
    let mut chars = replacement.chars();
    match (original.chars().next(), chars.next()) {
        (Some(first), Some(r)) if first.is_uppercase() => r.to_uppercase().chain(chars).collect(),
        _ => replacement.to_string(),
    }
}

/// Upper camel case, with `/` turned into namespace separators
/// (`admin/law_firm` -> `Admin::LawFirm`)
pub fn camelize(term: &str) -> String {
    term.split('/')
        .map(|segment| {
            segment
                .split('_')
                .filter(|piece| !piece.is_empty())
                .map(|piece| {
                    let mut chars = piece.chars();
                    match chars.next() {
                        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                        None => String::new(),
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("::")
}

/// Lower snake case, with namespaces turned into `/` (`Api::LawFirm` -> `api/law_firm`)
pub fn underscore(term: &str) -> String {
    let word = term.replace("::", "/");
    let word = ACRONYM_BOUNDARY.replace_all(&word, "${1}_${2}");
    let word = WORD_BOUNDARY.replace_all(&word, "${1}_${2}");
    word.replace('-', "_").to_lowercase()
}

/// Last segment of a namespaced name (`Api::V1::Lawyer` -> `Lawyer`)
pub fn demodulize(name: &str) -> &str {
    name.rsplit("::").next().unwrap_or(name)
}

/// Namespace part of a name, if any (`Api::V1::Lawyer` -> `Api::V1`)
pub fn deconstantize(name: &str) -> Option<&str> {
    name.rfind("::").map(|idx| &name[..idx])
}
