//! Option tables, dependency maps and prompt templates of each Mundo module.

pub mod life;
pub mod sport;
pub mod style;
pub mod travel;

/// Identity and full-body framing instruction shared by StyleMundo and LifeMundo.
pub const FULL_BODY_IDENTITY: &str = "**ABSOLUTE PARAMOUNT CRUCIAL: The PRIMARY focus is to generate a full-body image of the person from the uploaded image, ensuring the MOST PERFECT AND UNWAVERING facial identity and features are maintained. The person's face MUST be recognizable and consistent with the original. The generated image MUST showcase a full-body view, dynamically placing the person in the chosen scenario, clearly depicting their entire clothing and style. The full body of the person from the original image must be entirely visible and integrated into the scene.**";

/// Sport variant: keeps the athletic form and the uniform in frame.
pub const SPORT_IDENTITY: &str = "**ABSOLUTE PARAMOUNT CRUCIAL: The PRIMARY focus is to generate a full-body image of the person from the uploaded image, ensuring the MOST PERFECT AND UNWAVERING facial identity and features are maintained. The person's face MUST be recognizable and consistent with the original. The generated image MUST showcase a full-body view, dynamically placing the person in the chosen sport scenario and action, clearly depicting their athletic form and entire uniform/clothing.**";
