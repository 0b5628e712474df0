//! 템플릿 라이브러리 / 랜덤 조합 생성기 (로컬 폴백 경로)
//!
//! 장면·스타일·카메라·분위기 네 개의 고정 풀에서 각각 하나씩 균등하게
//! 뽑아 조합한다. 뽑기마다 독립이고 반복 선택이 허용된다. 난수원은
//! 호출자가 주입하므로 시드를 고정하면 결과를 재현할 수 있다.

use rand::Rng;

use super::engine::EngineProfile;

/// 프롬프트 조각 풀 묶음
pub struct TemplatePools<'a> {
    pub scenes: &'a [&'a str],
    pub styles: &'a [&'a str],
    pub cameras: &'a [&'a str],
    pub moods: &'a [&'a str],
}

const SCENES: &[&str] = &[
    "QWER-style rock K-pop girl group performing with electric guitars in neon-lit underground venue",
    "four-member alternative girl band in edgy streetwear dancing on rooftop with city skyline",
    "rock-influenced K-pop group with colorful hair playing instruments in abandoned warehouse",
    "girl band rehearsing in a cramped practice room covered in posters and tangled cables",
    "four members walking through rain-soaked neon streets carrying guitar cases",
    "band playing an acoustic set on a beach stage at golden hour",
];

const STYLES: &[&str] = &[
    "alternative fashion with mix of edgy and cute elements",
    "matching stage outfits with individual punk accents",
    "oversized vintage band tees with layered accessories",
    "pastel streetwear contrasted with dark leather details",
];

const CAMERAS: &[&str] = &[
    "dynamic low-angle tracking shot",
    "sweeping crane shot over the crowd",
    "handheld close-up with shallow depth of field",
    "slow dolly-in through stage haze",
];

const MOODS: &[&str] = &[
    "electric and rebellious atmosphere",
    "dreamy nostalgic atmosphere with soft film grain",
    "high-energy concert atmosphere with strobing lights",
    "intimate late-night rehearsal atmosphere",
];

/// 기본 풀 묶음
pub const DEFAULT_POOLS: TemplatePools<'static> = TemplatePools {
    scenes: SCENES,
    styles: STYLES,
    cameras: CAMERAS,
    moods: MOODS,
};

/// 풀에서 하나를 균등하게 뽑는다
pub fn pick<'a>(rng: &mut impl Rng, pool: &[&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

/// 랜덤 모드 폴백 프롬프트 조합
pub fn compose_random(
    rng: &mut impl Rng,
    pools: &TemplatePools<'_>,
    profile: &EngineProfile,
    aspect_ratio: &str,
) -> String {
    format!(
        "{}, {}, {}, {}, each member with distinct personal styling, {}",
        pick(rng, pools.scenes),
        pick(rng, pools.styles),
        pick(rng, pools.cameras),
        pick(rng, pools.moods),
        profile.suffix(aspect_ratio),
    )
}

/// 커스텀 모드 폴백 프롬프트 조합 — 사전 치환을 마친 문구를 받는다
pub fn compose_custom(translated: &str, profile: &EngineProfile, aspect_ratio: &str) -> String {
    format!(
        "Rock-style K-pop girl group like QWER music video scene: {}, \
         four members with distinct individual styling, \
         alternative fashion with mix of edgy and cute elements, \
         authentic musician vibes with instruments, dynamic lighting, {}",
        translated,
        profile.suffix(aspect_ratio),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::engine::TargetEngine;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn compose_random_should_be_deterministic_with_single_element_pools() {
        // Arrange
        let pools = TemplatePools {
            scenes: &["one scene"],
            styles: &["one style"],
            cameras: &["one camera"],
            moods: &["one mood"],
        };
        let profile = TargetEngine::Midjourney.profile();
        let mut rng = rand::thread_rng();

        // Act
        let first = compose_random(&mut rng, &pools, profile, "16:9");
        let second = compose_random(&mut rng, &pools, profile, "16:9");

        // Assert
        assert_eq!(first, second);
        assert_eq!(
            first,
            "one scene, one style, one camera, one mood, \
             each member with distinct personal styling, \
             professional music video quality, ultra-detailed, photorealistic, \
             8K resolution, --ar 16:9 --v 6"
        );
    }

    #[test]
    fn compose_random_should_be_reproducible_with_seeded_rng() {
        // Arrange
        let profile = TargetEngine::Midjourney.profile();

        // Act
        let mut first_rng = StdRng::seed_from_u64(17);
        let first = compose_random(&mut first_rng, &DEFAULT_POOLS, profile, "16:9");

        let mut second_rng = StdRng::seed_from_u64(17);
        let second = compose_random(&mut second_rng, &DEFAULT_POOLS, profile, "16:9");

        // Assert
        assert_eq!(first, second);
    }

    #[test]
    fn compose_random_should_end_with_engine_suffix() {
        // Arrange
        let mut rng = StdRng::seed_from_u64(3);

        // Act
        let prompt = compose_random(
            &mut rng,
            &DEFAULT_POOLS,
            TargetEngine::Midjourney.profile(),
            "9:16",
        );

        // Assert
        assert!(prompt.ends_with("--ar 9:16 --v 6"));
    }

    #[test]
    fn pick_should_only_return_pool_members() {
        // Arrange
        let pool = ["a", "b", "c"];
        let mut rng = StdRng::seed_from_u64(42);

        // Act & Assert — 독립 추출이므로 모든 결과가 풀 안에 있다
        for _ in 0..100 {
            let picked = pick(&mut rng, &pool);
            assert!(pool.contains(&picked));
        }
    }

    #[test]
    fn compose_custom_should_embed_translated_phrase_and_suffix() {
        // Arrange
        let profile = TargetEngine::Midjourney.profile();

        // Act
        let prompt = compose_custom("rooftop sing scene", profile, "1:1");

        // Assert
        assert!(prompt.starts_with("Rock-style K-pop girl group like QWER music video scene: "));
        assert!(prompt.contains("rooftop sing scene"));
        assert!(prompt.ends_with("--ar 1:1 --v 6"));
    }
}
