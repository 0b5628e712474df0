//! 한국어 → 영어 사전 치환
//!
//! 고정 사전으로 사용자 문구의 한국어 조각을 영어로 바꾼다. 긴 조각을
//! 먼저 치환해서 여러 단어짜리 구문이 구성 단어에 선점되지 않게 한다.
//! 단어 경계 검사는 하지 않는다 — 다른 단어 안에 포함된 짧은 조각도
//! 치환된다.

use std::sync::OnceLock;

/// 고정 번역 사전
const TRANSLATIONS: &[(&str, &str)] = &[
    // 장소/위치
    ("네온", "neon"),
    ("도시", "city"),
    ("밤", "night"),
    ("무대", "stage"),
    ("옥상", "rooftop"),
    ("지하", "underground"),
    ("클럽", "club"),
    ("카페", "cafe"),
    ("학교", "school"),
    ("교실", "classroom"),
    ("복도", "hallway"),
    ("운동장", "playground"),
    ("바다", "ocean"),
    ("해변", "beach"),
    ("산", "mountain"),
    ("공원", "park"),
    ("거리", "street"),
    ("골목", "alley"),
    ("건물", "building"),
    ("창고", "warehouse"),
    ("스튜디오", "studio"),
    // 이벤트/콘서트
    ("워터밤", "water bomb festival"),
    ("콘서트", "concert"),
    ("페스티벌", "festival"),
    ("축제", "festival"),
    ("파티", "party"),
    ("쇼", "show"),
    // 동작/활동
    ("춤", "dance"),
    ("노래", "sing"),
    ("공연", "performance"),
    ("연주", "playing instruments"),
    ("포즈", "pose"),
    ("걷기", "walking"),
    ("뛰기", "running"),
    // 스타일/외관
    ("의상", "outfit"),
    ("조명", "lighting"),
    ("배경", "background"),
    ("화려한", "glamorous"),
    ("아름다운", "beautiful"),
    ("멋진", "cool"),
    ("예쁜", "pretty"),
    ("강렬한", "intense"),
    ("부드러운", "soft"),
    ("어두운", "dark"),
    ("밝은", "bright"),
    ("컬러풀한", "colorful"),
    ("빈티지", "vintage"),
    ("모던", "modern"),
    ("클래식", "classic"),
    ("로맨틱", "romantic"),
    ("드라마틱", "dramatic"),
    // 기본 단어
    ("장면", "scene"),
    ("분위기", "atmosphere"),
    ("느낌", "vibe"),
    ("스타일", "style"),
    ("컨셉", "concept"),
    ("테마", "theme"),
    ("이미지", "image"),
    ("사진", "photo"),
    ("영상", "video"),
    ("뮤직비디오", "music video"),
    // 물/여름 관련
    ("물", "water"),
    ("여름", "summer"),
    ("시원한", "cool refreshing"),
    ("젖은", "wet"),
    ("물놀이", "water play"),
    ("수영복", "swimwear"),
    ("비키니", "bikini"),
];

/// 긴 구문부터 치환하도록 정렬한 사전 (안정 정렬이라 같은 길이는 사전 순서 유지)
fn sorted_translations() -> &'static [(&'static str, &'static str)] {
    static SORTED: OnceLock<Vec<(&'static str, &'static str)>> = OnceLock::new();
    SORTED.get_or_init(|| {
        let mut table = TRANSLATIONS.to_vec();
        table.sort_by_key(|(korean, _)| std::cmp::Reverse(korean.chars().count()));
        table
    })
}

/// 한국어 문구를 영어로 치환한다. 모든 출현을 전부 바꾼다.
pub fn translate_korean_to_english(text: &str) -> String {
    let mut translated = text.to_string();

    for (korean, english) in sorted_translations() {
        if translated.contains(korean) {
            translated = translated.replace(korean, english);
        }
    }

    translated
}
