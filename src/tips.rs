//! Static wellness tip catalog

/// Returned for any category not in the catalog
pub const TIP_NOT_FOUND: &str = "Tip not found for that category.";

/// Category -> advice text. Never mutated.
pub const TIPS: &[(&str, &str)] = &[
    (
        "nutrition",
        "Eat balanced meals with veggies, proteins, and whole grains. Try adding spinach to your salad for iron!",
    ),
    (
        "stress",
        "Practice deep breathing: Inhale for 4 seconds, hold for 4, exhale for 4. Repeat 5 times.",
    ),
    (
        "workout",
        "Quick home workout: 10 push-ups, 20 squats, 30-second plank. No equipment needed!",
    ),
];

/// Look up the tip for a category (exact match)
pub fn get_tip(category: &str) -> &'static str {
    TIPS.iter()
        .find(|(name, _)| *name == category)
        .map(|(_, tip)| *tip)
        .unwrap_or(TIP_NOT_FOUND)
}

/// Known categories, in catalog order
pub fn categories() -> impl Iterator<Item = &'static str> {
    TIPS.iter().map(|(name, _)| *name)
}
