//! Elemental types and the matchup chart.

/// Elemental type of a combatant or move.
///
/// The five charted elements counter each other; `Normal` sits outside the
/// chart and is neutral against everything.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Element {
    Holy,
    Water,
    Earth,
    Spirit,
    Dark,
    #[default]
    Normal,
}

/// Effectiveness multiplier for a move of `attack` element hitting `defend`.
///
/// ```text
///            Holy  Water Earth Spirit Dark
/// Holy       1.0   1.0   1.0   1.0    2.0
/// Water      1.0   0.5   2.0   1.0    1.0
/// Earth      1.0   0.5   1.0   1.0    1.0
/// Spirit     1.5   1.0   1.0   1.0    1.5
/// Dark       0.5   1.0   1.0   0.5    1.0
/// ```
///
/// Pairs absent from the chart (anything involving `Normal`) are 1.0.
pub const fn effectiveness(attack: Element, defend: Element) -> f64 {
    use Element::*;
    match (attack, defend) {
        (Holy, Dark) => 2.0,
        (Water, Water) => 0.5,
        (Water, Earth) => 2.0,
        (Earth, Water) => 0.5,
        (Spirit, Holy) | (Spirit, Dark) => 1.5,
        (Dark, Holy) | (Dark, Spirit) => 0.5,
        _ => 1.0,
    }
}

/// Elements the given defender is weak to (multiplier above 1.0).
///
/// Surfaced by reveal effects.
pub fn weaknesses(defend: Element) -> Vec<Element> {
    use strum::IntoEnumIterator;
    Element::iter()
        .filter(|attack| effectiveness(*attack, defend) > 1.0)
        .collect()
}
