//! Porter stemmer with the NLTK extensions, the behavior of NLTK's default `PorterStemmer`.
//!
//! Rule lists are tried in order and the first rule whose suffix matches decides
//! the outcome, even when its condition then fails.

type Rule = (&'static str, &'static str, fn(&[char]) -> bool);

const IRREGULAR: &[(&str, &str)] = &[
    ("sky", "sky"), ("skies", "sky"),
    ("dying", "die"), ("lying", "lie"), ("tying", "tie"),
    ("news", "news"),
    ("innings", "inning"), ("inning", "inning"),
    ("outings", "outing"), ("outing", "outing"),
    ("cannings", "canning"), ("canning", "canning"),
    ("howe", "howe"),
    ("proceed", "proceed"), ("exceed", "exceed"), ("succeed", "succeed"),
];

/// Stem a single lowercase token.
pub fn stem(token: &str) -> String {
    let word = token.to_lowercase();
    if let Some((_, fixed)) = IRREGULAR.iter().find(|(form, _)| *form == word) {
        return (*fixed).to_string();
    }
    let w: Vec<char> = word.chars().collect();
    if w.len() <= 2 {
        return word;
    }
    let w = step1a(w);
    let w = step1b(w);
    let w = step1c(w);
    let w = step2(w);
    let w = step3(w);
    let w = step4(w);
    let w = step5a(w);
    let w = step5b(w);
    w.into_iter().collect()
}

fn is_consonant(w: &[char], i: usize) -> bool {
    match w[i] {
        'a' | 'e' | 'i' | 'o' | 'u' => false,
        'y' => i == 0 || !is_consonant(w, i - 1),
        _ => true,
    }
}

/// Number of vowel-consonant sequences, the `m` in `[C](VC)^m[V]`.
fn measure(w: &[char]) -> usize {
    let mut m = 0;
    let mut prev_vowel = false;
    for i in 0..w.len() {
        let consonant = is_consonant(w, i);
        if prev_vowel && consonant {
            m += 1;
        }
        prev_vowel = !consonant;
    }
    m
}

fn contains_vowel(w: &[char]) -> bool {
    (0..w.len()).any(|i| !is_consonant(w, i))
}

fn ends_double_consonant(w: &[char]) -> bool {
    let n = w.len();
    n >= 2 && w[n - 1] == w[n - 2] && is_consonant(w, n - 1)
}

fn ends_cvc(w: &[char]) -> bool {
    let n = w.len();
    (n >= 3
        && is_consonant(w, n - 3)
        && !is_consonant(w, n - 2)
        && is_consonant(w, n - 1)
        && !matches!(w[n - 1], 'w' | 'x' | 'y'))
        || (n == 2 && !is_consonant(w, 0) && is_consonant(w, 1))
}

fn ends_with(w: &[char], suffix: &str) -> bool {
    let n = suffix.len();
    w.len() >= n && w[w.len() - n..].iter().copied().eq(suffix.chars())
}

fn replace_suffix(mut w: Vec<char>, suffix_len: usize, replacement: &str) -> Vec<char> {
    w.truncate(w.len() - suffix_len);
    w.extend(replacement.chars());
    w
}

fn apply_rules(w: Vec<char>, rules: &[Rule]) -> Vec<char> {
    for &(suffix, replacement, condition) in rules {
        if ends_with(&w, suffix) {
            return if condition(&w[..w.len() - suffix.len()]) {
                replace_suffix(w, suffix.len(), replacement)
            } else {
                w
            };
        }
    }
    w
}

fn always(_: &[char]) -> bool { true }
fn positive(stem: &[char]) -> bool { measure(stem) > 0 }
fn above_one(stem: &[char]) -> bool { measure(stem) > 1 }

fn with_l(stem: &[char]) -> Vec<char> {
    let mut w = stem.to_vec();
    w.push('l');
    w
}

// the "l" of "logi" counts toward the stem so "geologi" reduces like "archaeologi"
fn logi_condition(stem: &[char]) -> bool { positive(&with_l(stem)) }
fn ion_condition(stem: &[char]) -> bool { above_one(stem) && matches!(stem.last().copied(), Some('s' | 't')) }
fn ll_condition(stem: &[char]) -> bool { above_one(&with_l(stem)) }

const STEP1A: &[Rule] = &[("sses", "ss", always), ("ies", "i", always), ("ss", "ss", always), ("s", "", always)];

const STEP2: &[Rule] = &[
    ("ational", "ate", positive),
    ("tional", "tion", positive),
    ("enci", "ence", positive),
    ("anci", "ance", positive),
    ("izer", "ize", positive),
    ("bli", "ble", positive),
    ("alli", "al", positive),
    ("entli", "ent", positive),
    ("eli", "e", positive),
    ("ousli", "ous", positive),
    ("ization", "ize", positive),
    ("ation", "ate", positive),
    ("ator", "ate", positive),
    ("alism", "al", positive),
    ("iveness", "ive", positive),
    ("fulness", "ful", positive),
    ("ousness", "ous", positive),
    ("aliti", "al", positive),
    ("iviti", "ive", positive),
    ("biliti", "ble", positive),
    ("fulli", "ful", positive),
    ("logi", "log", logi_condition),
];

const STEP3: &[Rule] = &[
    ("icate", "ic", positive),
    ("ative", "", positive),
    ("alize", "al", positive),
    ("iciti", "ic", positive),
    ("ical", "ic", positive),
    ("ful", "", positive),
    ("ness", "", positive),
];

const STEP4: &[Rule] = &[
    ("al", "", above_one),
    ("ance", "", above_one),
    ("ence", "", above_one),
    ("er", "", above_one),
    ("ic", "", above_one),
    ("able", "", above_one),
    ("ible", "", above_one),
    ("ant", "", above_one),
    ("ement", "", above_one),
    ("ment", "", above_one),
    ("ent", "", above_one),
    ("ion", "", ion_condition),
    ("ou", "", above_one),
    ("ism", "", above_one),
    ("ate", "", above_one),
    ("iti", "", above_one),
    ("ous", "", above_one),
    ("ive", "", above_one),
    ("ize", "", above_one),
];

const STEP5B: &[Rule] = &[("ll", "l", ll_condition)];

fn step1a(w: Vec<char>) -> Vec<char> {
    // "dies" -> "die", but "flies" -> "fli"
    if w.len() == 4 && ends_with(&w, "ies") {
        return replace_suffix(w, 3, "ie");
    }
    apply_rules(w, STEP1A)
}

fn step1b(w: Vec<char>) -> Vec<char> {
    if ends_with(&w, "ied") {
        let replacement = if w.len() == 4 { "ie" } else { "i" };
        return replace_suffix(w, 3, replacement);
    }
    if ends_with(&w, "eed") {
        return if positive(&w[..w.len() - 3]) { replace_suffix(w, 1, "") } else { w };
    }
    let stem = ["ed", "ing"].iter().find_map(|suffix| {
        let stem = &w[..w.len().saturating_sub(suffix.len())];
        (ends_with(&w, suffix) && contains_vowel(stem)).then(|| stem.to_vec())
    });
    let Some(mut stem) = stem else { return w };

    if ends_with(&stem, "at") || ends_with(&stem, "bl") || ends_with(&stem, "iz") {
        stem.push('e');
    } else if ends_double_consonant(&stem) {
        if !matches!(stem[stem.len() - 1], 'l' | 's' | 'z') {
            stem.pop();
        }
    } else if measure(&stem) == 1 && ends_cvc(&stem) {
        stem.push('e');
    }
    stem
}

fn step1c(mut w: Vec<char>) -> Vec<char> {
    // y -> i only after a consonant that is not the whole stem: "happy" -> "happi", "enjoy" stays
    let n = w.len();
    if n > 2 && w[n - 1] == 'y' && is_consonant(&w, n - 2) {
        w[n - 1] = 'i';
    }
    w
}

fn step2(w: Vec<char>) -> Vec<char> {
    if ends_with(&w, "alli") && positive(&w[..w.len() - 4]) {
        return step2(replace_suffix(w, 4, "al"));
    }
    apply_rules(w, STEP2)
}

fn step3(w: Vec<char>) -> Vec<char> {
    apply_rules(w, STEP3)
}

fn step4(w: Vec<char>) -> Vec<char> {
    apply_rules(w, STEP4)
}

fn step5a(w: Vec<char>) -> Vec<char> {
    if ends_with(&w, "e") {
        let stem = &w[..w.len() - 1];
        let m = measure(stem);
        if m > 1 || (m == 1 && !ends_cvc(stem)) {
            return stem.to_vec();
        }
    }
    w
}

fn step5b(w: Vec<char>) -> Vec<char> {
    apply_rules(w, STEP5B)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(pairs: &[(&str, &str)]) {
        for (word, expected) in pairs {
            assert_eq!(stem(word), *expected, "stem({word:?})");
        }
    }

    #[test]
    fn plurals_and_participles() {
        check(&[
            ("caresses", "caress"), ("ponies", "poni"), ("dies", "die"), ("flies", "fli"),
            ("cats", "cat"), ("shoes", "shoe"), ("running", "run"), ("hopping", "hop"),
            ("hoping", "hope"), ("filing", "file"), ("agreed", "agre"), ("feed", "feed"),
            ("falling", "fall"), ("printed", "print"),
        ]);
    }

    #[test]
    fn y_and_derivational_suffixes() {
        check(&[
            ("happy", "happi"), ("enjoy", "enjoy"), ("quickly", "quickli"), ("fairly", "fairli"),
            ("generously", "gener"), ("relational", "relat"), ("conditional", "condit"),
            ("comfortable", "comfort"), ("breathable", "breathabl"),
        ]);
    }

    #[test]
    fn irregular_and_short_words() {
        check(&[("skies", "sky"), ("dying", "die"), ("news", "news"), ("is", "is"), ("2", "2")]);
    }
}
