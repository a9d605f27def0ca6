//! Small text helpers shared by storage and display

/// Upper-cases the first letter of each alphabetic run, lower-cases the rest
///
/// "scattered clouds" becomes "Scattered Clouds"; "stratford-upon-avon"
/// becomes "Stratford-Upon-Avon".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
