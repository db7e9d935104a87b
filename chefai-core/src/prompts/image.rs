//! Image generation prompt for recipe photos.

/// How many ingredients the photo prompt mentions.
const MAX_INGREDIENTS: usize = 5;

/// How many instruction steps the photo prompt mentions.
const MAX_STEPS: usize = 3;

/// Render a food-photography prompt for a generated recipe.
///
/// Uses the title plus the first few ingredients and instruction steps to
/// anchor the scene, and spells out negative constraints so the image
/// model doesn't render photography gear or text into the shot.
/// Deterministic, no I/O.
pub fn render_image_prompt(title: &str, ingredients: &[String], instructions: &[String]) -> String {
    let mut prompt = format!(
        "Ultra-realistic photograph of '{title}', styled like a professional magazine food photo."
    );

    let featured: Vec<&str> = ingredients
        .iter()
        .take(MAX_INGREDIENTS)
        .map(String::as_str)
        .collect();
    if !featured.is_empty() {
        prompt.push_str(&format!(" Made with {}.", featured.join(", ")));
    }

    let steps: Vec<&str> = instructions
        .iter()
        .take(MAX_STEPS)
        .map(String::as_str)
        .collect();
    if !steps.is_empty() {
        prompt.push_str(&format!(" Prepared by: {}", steps.join(" ")));
        if !prompt.ends_with('.') {
            prompt.push('.');
        }
    }

    prompt.push_str(
        " Use natural lighting with soft shadows, realistic colors, and authentic textures \
         (visible grains, slight imperfections, natural steam or moisture). Beautifully plated \
         on a clean surface with real-world imperfections like crumbs or sauce smears. Captured \
         with a shallow depth of field and a softly blurred background for a natural DSLR look. \
         The image must only show the food and background. Do NOT include: cameras, camera \
         lenses, human hands, reflections, photography equipment, tripods, studio lights, \
         photographers, lens flare, camera flash, watermark, text. The final output should feel \
         like it was taken with a DSLR, but no camera or gear should be present in the image at \
         all.",
    );

    prompt
}
