/// Camel-case a reporter identifier.
///
/// Words are split on non-alphanumeric characters, lower-to-upper case
/// transitions, and the end of an upper-case run followed by a lower-case
/// letter. A run of digits is a word of its own. The first word is
/// lower-cased; the rest are capitalised.
pub fn camel_case(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len());
    for (i, word) in words(identifier).iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
        } else {
            let mut chars = lower.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out
}

fn words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    for chunk in input.split(|c: char| !c.is_alphanumeric()) {
        let chars: Vec<char> = chunk.chars().collect();
        let mut current = String::new();
        for (i, &c) in chars.iter().enumerate() {
            // k8s | teamcity2
            if !current.is_empty() && c.is_numeric() != chars[i - 1].is_numeric() {
                words.push(std::mem::take(&mut current));
            } else if !current.is_empty() && c.is_uppercase() {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                // fooBar | XMLReporter
                if !prev.is_uppercase() || next_is_lower {
                    words.push(std::mem::take(&mut current));
                }
            }
            current.push(c);
        }
        if !current.is_empty() {
            words.push(current);
        }
    }
    words
}
