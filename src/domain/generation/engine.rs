//! 대상 이미지 생성 엔진
//!
//! 엔진은 지시문 문구와 폴백 접미사 문법만 바꾼다. 전송 방식이나
//! 엔드포인트는 엔진과 무관하다.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 지원 엔진 Enum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetEngine {
    #[default]
    Midjourney,
    Niji,
    StableDiffusion,
}

/// 엔진별 설정 레코드 — 한 번 조회해서 쓰고, 이후 분기하지 않는다
#[derive(Debug)]
pub struct EngineProfile {
    /// 지시문에 들어가는 엔진 이름
    pub label: &'static str,
    /// 기술 파라미터 접미사 템플릿 (`{ar}` 자리에 화면 비율이 들어간다)
    suffix_template: &'static str,
}

impl EngineProfile {
    /// 화면 비율을 채운 접미사 반환
    pub fn suffix(&self, aspect_ratio: &str) -> String {
        self.suffix_template.replace("{ar}", aspect_ratio)
    }
}

const MIDJOURNEY_PROFILE: EngineProfile = EngineProfile {
    label: "Midjourney",
    suffix_template:
        "professional music video quality, ultra-detailed, photorealistic, 8K resolution, --ar {ar} --v 6",
};

const NIJI_PROFILE: EngineProfile = EngineProfile {
    label: "Niji Journey",
    suffix_template:
        "professional music video quality, ultra-detailed, anime key visual, 8K resolution, --ar {ar} --niji 6",
};

const STABLE_DIFFUSION_PROFILE: EngineProfile = EngineProfile {
    label: "Stable Diffusion",
    suffix_template:
        "masterpiece, best quality, professional music video still, ultra-detailed, 8K, aspect ratio {ar}",
};

impl TargetEngine {
    pub fn profile(self) -> &'static EngineProfile {
        match self {
            TargetEngine::Midjourney => &MIDJOURNEY_PROFILE,
            TargetEngine::Niji => &NIJI_PROFILE,
            TargetEngine::StableDiffusion => &STABLE_DIFFUSION_PROFILE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_engine_as_screaming_snake_case() {
        // Arrange & Act
        let json = serde_json::to_string(&TargetEngine::StableDiffusion).unwrap();

        // Assert
        assert_eq!(json, "\"STABLE_DIFFUSION\"");
    }

    #[test]
    fn should_deserialize_engine_from_screaming_snake_case() {
        // Arrange & Act
        let engine: TargetEngine = serde_json::from_str("\"NIJI\"").unwrap();

        // Assert
        assert_eq!(engine, TargetEngine::Niji);
    }

    #[test]
    fn should_reject_unknown_engine() {
        // Arrange & Act
        let result: Result<TargetEngine, _> = serde_json::from_str("\"DALL_E\"");

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn midjourney_suffix_should_end_with_aspect_ratio_and_version() {
        // Arrange
        let profile = TargetEngine::Midjourney.profile();

        // Act
        let suffix = profile.suffix("9:16");

        // Assert
        assert!(suffix.ends_with("--ar 9:16 --v 6"));
    }

    #[test]
    fn niji_suffix_should_use_niji_version_token() {
        // Arrange
        let profile = TargetEngine::Niji.profile();

        // Act
        let suffix = profile.suffix("1:1");

        // Assert
        assert!(suffix.ends_with("--ar 1:1 --niji 6"));
        assert!(!suffix.contains("--v 6"));
    }

    #[test]
    fn stable_diffusion_suffix_should_not_use_dashed_parameters() {
        // Arrange
        let profile = TargetEngine::StableDiffusion.profile();

        // Act
        let suffix = profile.suffix("16:9");

        // Assert
        assert!(suffix.contains("aspect ratio 16:9"));
        assert!(!suffix.contains("--ar"));
    }

    #[test]
    fn default_engine_should_be_midjourney() {
        assert_eq!(TargetEngine::default(), TargetEngine::Midjourney);
    }
}
