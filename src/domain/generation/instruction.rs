//! 원격 생성 지시문 빌더
//!
//! 엔진 프로파일, 사용자 요청, 화면 비율을 묶어 텍스트 생성 API에 보낼
//! 지시문을 만든다. 자동 생성 주기에는 창작 방향 힌트를 하나 섞어
//! 연속 사이클의 반복 출력을 줄인다. 힌트는 로컬 폴백에는 영향이 없다.

use rand::Rng;

use super::engine::EngineProfile;

/// 자동 생성 사이클용 창작 방향 힌트 풀
const VARIETY_HINTS: &[&str] = &[
    "emphasize dramatic lighting contrasts",
    "set the scene during golden hour",
    "focus on a single member's close-up moment",
    "use an unexpected location",
    "lean into retro film aesthetics",
    "highlight dynamic choreography mid-motion",
    "frame the shot through reflections or glass",
    "push saturated neon color grading",
];

/// 힌트 풀에서 하나를 뽑는다
pub fn pick_variety_hint(rng: &mut impl Rng) -> &'static str {
    VARIETY_HINTS[rng.gen_range(0..VARIETY_HINTS.len())]
}

/// 랜덤 모드 지시문
pub fn random_instruction(
    profile: &EngineProfile,
    aspect_ratio: &str,
    hint: Option<&str>,
) -> String {
    format!(
        "Create a unique and creative {label} prompt for a QWER-style K-pop girl group music video scene.\n\
         \n\
         Requirements:\n\
         - 4-member rock/alternative K-pop girl group like QWER\n\
         - Each member should have distinct individual styling and personality\n\
         - Include authentic musician elements (instruments, performance aspects)\n\
         - Mix of edgy and cute styling elements\n\
         - Creative and unexpected scene concepts\n\
         - Professional music video quality descriptions\n\
         - Specific camera angles and lighting details\n\
         - Rich visual descriptions with colors, textures, atmosphere\n\
         {hint_line}\
         \n\
         Format the response as a complete {label} prompt ending with: {suffix}\n\
         \n\
         Generate only the prompt text, no additional explanation.",
        label = profile.label,
        hint_line = hint_line(hint),
        suffix = profile.suffix(aspect_ratio),
    )
}

/// 커스텀 모드 지시문
pub fn custom_instruction(
    profile: &EngineProfile,
    phrase: &str,
    aspect_ratio: &str,
    hint: Option<&str>,
) -> String {
    format!(
        "Create a detailed {label} prompt for a QWER-style K-pop girl group music video based on this user request: \"{phrase}\"\n\
         \n\
         Requirements:\n\
         - 4-member rock/alternative K-pop girl group like QWER\n\
         - Incorporate the user's request creatively into the scene\n\
         - Each member should have distinct individual styling and personality\n\
         - Include authentic musician elements (instruments, performance aspects)\n\
         - Mix of edgy and cute styling elements\n\
         - Professional music video quality descriptions\n\
         - Specific camera angles and lighting details\n\
         - Rich visual descriptions with colors, textures, atmosphere\n\
         - If the request is in Korean, interpret it naturally and create an English prompt\n\
         {hint_line}\
         \n\
         Format the response as a complete {label} prompt ending with: {suffix}\n\
         \n\
         Generate only the prompt text, no additional explanation.",
        label = profile.label,
        phrase = phrase,
        hint_line = hint_line(hint),
        suffix = profile.suffix(aspect_ratio),
    )
}

fn hint_line(hint: Option<&str>) -> String {
    match hint {
        Some(hint) => format!("- Creative direction for this cycle: {}\n", hint),
        None => String::new(),
    }
}
