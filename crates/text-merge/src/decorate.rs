/// Wraps the core of one variant before the cores are joined.
///
/// `variant` is the caller's index for the variant: the input position for a
/// fuzzy merge, the tier number for a tier merge.
pub trait VariantDecorator {
    fn decorate(&self, variant: usize, core: &str) -> String;
}

impl<F> VariantDecorator for F
where
    F: Fn(usize, &str) -> String,
{
    fn decorate(&self, variant: usize, core: &str) -> String {
        self(variant, core)
    }
}

/// Leaves cores untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl VariantDecorator for Plain {
    fn decorate(&self, _variant: usize, core: &str) -> String {
        core.to_string()
    }
}

/// Rich-text colour per rarity tier: simple, fine, heroic, mythical, divine, eternal
const RARITY_COLOURS: [&str; 6] = [
    "0.80,0.80,0.80",
    "0.55,0.82,0.42",
    "0.36,0.60,1.00",
    "0.81,0.42,0.98",
    "1.00,0.50,0.20",
    "0.93,0.31,0.31",
];

/// Colours each core with the rarity colour of its tier
#[derive(Debug, Clone, Copy, Default)]
pub struct RarityColours;

impl VariantDecorator for RarityColours {
    fn decorate(&self, variant: usize, core: &str) -> String {
        match RARITY_COLOURS.get(variant) {
            Some(colour) => format!("<color={colour}>{core}</color>"),
            None => core.to_string(),
        }
    }
}
